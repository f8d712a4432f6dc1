//! Drives an inner join and an ordering through the public visitor API.

use std::sync::Arc;

use hashbrown::HashMap;
use tabula_physical::{
    datatypes::{ColumnData, StringPool},
    ordering::{CharacterVectorOrderer, Lexicographic},
    tabular::DataFrame,
    visitors::{
        DataFrameJoinVisitors, DataFrameSubsetVisitors, JoinOptions, JoinRow, JoinVisitor,
        SubsetVectorVisitor,
    },
};

fn tables(pool: &mut StringPool) -> (DataFrame, DataFrame) {
    let orders = DataFrame::new(vec![
        ("customer", pool.column([Some("bo"), Some("al"), Some("cy"), Some("al"), None])),
        ("amount", ColumnData::Integer(vec![Some(5), Some(7), Some(1), Some(3), Some(9)])),
    ])
    .expect("columns have equal length");

    let customers = DataFrame::new(vec![
        ("name", ColumnData::Factor(pool.factor([Some("al"), Some("bo"), None]))),
        ("city", pool.column([Some("Oslo"), Some("Rome"), Some("Nowhere")])),
    ])
    .expect("columns have equal length");

    (orders, customers)
}

/// Pairs of matching rows, in order of the left table.
fn inner_join(visitors: &DataFrameJoinVisitors<'_>) -> Vec<(usize, usize)> {
    let mut buckets = HashMap::<u64, Vec<usize>>::new();
    for row in 0..visitors.right().nrows() {
        buckets
            .entry(visitors.hash(JoinRow::Right(row)))
            .or_default()
            .push(row);
    }

    let mut pairs = Vec::new();
    for row in 0..visitors.left().nrows() {
        let left = JoinRow::Left(row);
        if let Some(candidates) = buckets.get(&visitors.hash(left)) {
            pairs.extend(
                candidates
                    .iter()
                    .filter(|&&candidate| visitors.equal(left, JoinRow::Right(candidate)))
                    .map(|&candidate| (row, candidate)),
            );
        }
    }

    pairs
}

#[test]
fn inner_join_with_missing_keys() {
    let mut pool = StringPool::new();
    let (orders, customers) = tables(&mut pool);

    let matching = DataFrameJoinVisitors::new(
        &orders,
        &customers,
        &["customer"],
        &["name"],
        JoinOptions::default(),
    )
    .expect("keys exist");
    assert!(matching.warnings().is_empty());
    assert_eq!(
        inner_join(&matching),
        vec![(0, 1), (1, 0), (3, 0), (4, 2)]
    );

    let strict = DataFrameJoinVisitors::new(
        &orders,
        &customers,
        &["customer"],
        &["name"],
        JoinOptions::default().with_na_match(false),
    )
    .expect("keys exist");
    let pairs = inner_join(&strict);
    assert_eq!(pairs, vec![(0, 1), (1, 0), (3, 0)]);

    // assemble the result: key column, left payload, right payload
    let key = strict
        .get_by_name("customer")
        .expect("customer is a left key")
        .materialize(&pairs.iter().map(|&(left, _)| JoinRow::Left(left)).collect::<Vec<_>>());
    let amounts = DataFrameSubsetVisitors::with_names(&orders, &["amount"])
        .expect("amount exists")
        .subset(&pairs.iter().map(|&(left, _)| left).collect::<Vec<_>>(), &["data.frame"])
        .expect("rows exist");
    let cities = DataFrameSubsetVisitors::with_names(&customers, &["city"])
        .expect("city exists");
    let city = cities
        .get(0)
        .materialize(&pairs.iter().map(|&(_, right)| right).collect::<Vec<_>>());

    assert_eq!(key, ColumnData::strings([Some("bo"), Some("al"), Some("al")]));
    assert_eq!(
        amounts.column(0).data(),
        &ColumnData::Integer(vec![Some(5), Some(7), Some(3)])
    );
    assert_eq!(city, ColumnData::strings([Some("Rome"), Some("Oslo"), Some("Oslo")]));
}

#[test]
fn arrange_by_rank() {
    let mut pool = StringPool::new();
    let (orders, _) = tables(&mut pool);

    let ColumnData::String(customers) = orders.column(0).data() else {
        panic!("customer is a string column");
    };
    let ranks = CharacterVectorOrderer::new(customers, &Lexicographic)
        .expect("complete collation")
        .into_orders();
    assert_eq!(ranks, vec![2, 1, 3, 1, 4]);

    let mut order = (0..orders.nrows()).collect::<Vec<_>>();
    order.sort_by_key(|&row| ranks[row]);

    let arranged = DataFrameSubsetVisitors::new(&orders)
        .subset(&order, &["data.frame"])
        .expect("rows exist");
    let expected: Vec<Option<Arc<str>>> = vec![
        Some(pool.intern("al")),
        Some(pool.intern("al")),
        Some(pool.intern("bo")),
        Some(pool.intern("cy")),
        None,
    ];
    assert_eq!(arranged.column(0).data(), &ColumnData::String(expected));
    assert_eq!(
        arranged.column(1).data(),
        &ColumnData::Integer(vec![Some(7), Some(3), Some(5), Some(1), Some(9)])
    );
}
