//! This module defines the trait [JoinVisitor] and its implementations,
//! as well as [JoinVisitorEnum],
//! which collects all implementations of [JoinVisitor] into a single object.

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use crate::{
    datatypes::{ColumnData, Real},
    error::TypeMismatch,
    tabular::Column,
};

use super::{
    hash_value,
    join_key::{FactorCode, JoinKey, KeySource, ListCell, Text},
    options::JoinOptions,
    subset_visitor::SubsetVectorVisitor,
    vector_visitor::{visitor, ColumnVisitor, FactorVisitor, TypedVisitor, VectorVisitor},
    NA_HASH,
};

/// Reference to a row on one side of a join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinRow {
    /// Row of the left table
    Left(usize),
    /// Row of the right table
    Right(usize),
}

/// Compares rows of a left and a right column,
/// which may be of different but compatible physical types.
pub trait JoinVisitor: Debug {
    /// Returns a hash of the given row.
    /// Rows that are [JoinVisitor::equal] hash identically, regardless of their side.
    fn hash(&self, row: JoinRow) -> u64;

    /// Returns true iff the two rows match.
    /// Missing values only match each other, and only if the visitor was built with `na_match`.
    fn equal(&self, first: JoinRow, second: JoinRow) -> bool;

    /// Returns false iff the two columns have incompatible types,
    /// in which case no left row ever matches a right row.
    fn is_compatible(&self) -> bool;

    /// Build the key column of a join result from the given rows.
    fn materialize(&self, rows: &[JoinRow]) -> ColumnData;
}

/// [JoinVisitor] converting both sides to keys of type `K`.
#[derive(Debug)]
pub struct TypedJoinVisitor<L, R, K> {
    left: L,
    right: R,
    na_match: bool,
    _key: PhantomData<fn() -> K>,
}

impl<L: Copy, R: Copy, K> Clone for TypedJoinVisitor<L, R, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: Copy, R: Copy, K> Copy for TypedJoinVisitor<L, R, K> {}

impl<L, R, K> TypedJoinVisitor<L, R, K>
where
    L: KeySource<K>,
    R: KeySource<K>,
    K: JoinKey,
{
    /// Create a new [TypedJoinVisitor].
    pub fn new(left: L, right: R, na_match: bool) -> Self {
        Self {
            left,
            right,
            na_match,
            _key: PhantomData,
        }
    }

    /// Return the visitor of the left column.
    pub fn left(&self) -> L {
        self.left
    }

    /// Return the visitor of the right column.
    pub fn right(&self) -> R {
        self.right
    }

    fn key(&self, row: JoinRow) -> Option<K> {
        match row {
            JoinRow::Left(index) => self.left.key(index),
            JoinRow::Right(index) => self.right.key(index),
        }
    }
}

impl<L, R, K> JoinVisitor for TypedJoinVisitor<L, R, K>
where
    L: KeySource<K>,
    R: KeySource<K>,
    K: JoinKey,
{
    fn hash(&self, row: JoinRow) -> u64 {
        self.key(row).map_or(NA_HASH, |key| hash_value(&key))
    }

    fn equal(&self, first: JoinRow, second: JoinRow) -> bool {
        match (self.key(first), self.key(second)) {
            (Some(first), Some(second)) => first == second,
            (None, None) => self.na_match,
            _ => false,
        }
    }

    fn is_compatible(&self) -> bool {
        true
    }

    fn materialize(&self, rows: &[JoinRow]) -> ColumnData {
        K::into_column(rows.iter().map(|&row| self.key(row)).collect())
    }
}

/// [JoinVisitor] for columns of incompatible types.
///
/// Rows of the same side are compared with the visitor of that side,
/// rows of different sides never match.
#[derive(Debug, Clone, Copy)]
pub struct MismatchJoinVisitor<'a> {
    left: ColumnVisitor<'a>,
    right: ColumnVisitor<'a>,
    na_match: bool,
}

impl<'a> MismatchJoinVisitor<'a> {
    /// Create a new [MismatchJoinVisitor].
    pub fn new(left: ColumnVisitor<'a>, right: ColumnVisitor<'a>, na_match: bool) -> Self {
        Self {
            left,
            right,
            na_match,
        }
    }

    /// Return the visitor of the left column.
    pub fn left(&self) -> ColumnVisitor<'a> {
        self.left
    }

    /// Return the visitor of the right column.
    pub fn right(&self) -> ColumnVisitor<'a> {
        self.right
    }

    fn side_equal(&self, side: &ColumnVisitor<'a>, first: usize, second: usize) -> bool {
        if self.na_match {
            side.equal_or_both_na(first, second)
        } else {
            side.equal(first, second)
        }
    }
}

impl JoinVisitor for MismatchJoinVisitor<'_> {
    fn hash(&self, row: JoinRow) -> u64 {
        match row {
            JoinRow::Left(index) => self.left.hash(index),
            JoinRow::Right(index) => self.right.hash(index),
        }
    }

    fn equal(&self, first: JoinRow, second: JoinRow) -> bool {
        match (first, second) {
            (JoinRow::Left(first), JoinRow::Left(second)) => {
                self.side_equal(&self.left, first, second)
            }
            (JoinRow::Right(first), JoinRow::Right(second)) => {
                self.side_equal(&self.right, first, second)
            }
            _ => false,
        }
    }

    fn is_compatible(&self) -> bool {
        false
    }

    /// The key column keeps the type of the left column; right rows become missing.
    fn materialize(&self, rows: &[JoinRow]) -> ColumnData {
        let indices = rows
            .iter()
            .map(|row| match row {
                JoinRow::Left(index) => Some(*index),
                JoinRow::Right(_) => None,
            })
            .collect::<Vec<_>>();

        self.left.materialize_with_missing(&indices)
    }
}

type TypedPair<'a, L, R, K> = TypedJoinVisitor<TypedVisitor<'a, L>, TypedVisitor<'a, R>, K>;

/// Forward a call to the join visitor held by each variant.
macro_rules! forward_to_join_visitor {
    ($self:ident, |$visitor:ident| $body:expr) => {
        match $self {
            Self::Logical($visitor) => $body,
            Self::Integer($visitor) => $body,
            Self::IntegerReal($visitor) => $body,
            Self::RealInteger($visitor) => $body,
            Self::Real($visitor) => $body,
            Self::String($visitor) => $body,
            Self::StringFactor($visitor) => $body,
            Self::FactorString($visitor) => $body,
            Self::Factor($visitor) => $body,
            Self::FactorCodes($visitor) => $body,
            Self::List($visitor) => $body,
            Self::Mismatch($visitor) => $body,
        }
    };
}

/// Enum collecting one join visitor per supported pair of physical types.
#[derive(Debug, Clone, Copy)]
pub enum JoinVisitorEnum<'a> {
    /// Logical with logical
    Logical(TypedPair<'a, bool, bool, bool>),
    /// Integer with integer
    Integer(TypedPair<'a, i32, i32, i32>),
    /// Integer with real, compared as reals
    IntegerReal(TypedPair<'a, i32, f64, Real>),
    /// Real with integer, compared as reals
    RealInteger(TypedPair<'a, f64, i32, Real>),
    /// Real with real
    Real(TypedPair<'a, f64, f64, Real>),
    /// String with string
    String(TypedPair<'a, Arc<str>, Arc<str>, Text<'a>>),
    /// String with factor, compared by decoded value
    StringFactor(TypedJoinVisitor<TypedVisitor<'a, Arc<str>>, FactorVisitor<'a>, Text<'a>>),
    /// Factor with string, compared by decoded value
    FactorString(TypedJoinVisitor<FactorVisitor<'a>, TypedVisitor<'a, Arc<str>>, Text<'a>>),
    /// Factors with different dictionaries, compared by decoded value
    Factor(TypedJoinVisitor<FactorVisitor<'a>, FactorVisitor<'a>, Text<'a>>),
    /// Factors sharing their dictionary, compared by code
    FactorCodes(TypedJoinVisitor<FactorVisitor<'a>, FactorVisitor<'a>, FactorCode<'a>>),
    /// List with list, compared by identity
    List(TypedPair<'a, Arc<ColumnData>, Arc<ColumnData>, ListCell<'a>>),
    /// Any pair of incompatible types
    Mismatch(MismatchJoinVisitor<'a>),
}

impl<'a> JoinVisitorEnum<'a> {
    /// Return the visitor of the left column.
    pub fn left(&self) -> ColumnVisitor<'a> {
        forward_to_join_visitor!(self, |visitor| visitor.left().into())
    }

    /// Return the visitor of the right column.
    pub fn right(&self) -> ColumnVisitor<'a> {
        forward_to_join_visitor!(self, |visitor| visitor.right().into())
    }
}

impl JoinVisitor for JoinVisitorEnum<'_> {
    fn hash(&self, row: JoinRow) -> u64 {
        forward_to_join_visitor!(self, |visitor| visitor.hash(row))
    }

    fn equal(&self, first: JoinRow, second: JoinRow) -> bool {
        forward_to_join_visitor!(self, |visitor| visitor.equal(first, second))
    }

    fn is_compatible(&self) -> bool {
        forward_to_join_visitor!(self, |visitor| visitor.is_compatible())
    }

    fn materialize(&self, rows: &[JoinRow]) -> ColumnData {
        forward_to_join_visitor!(self, |visitor| visitor.materialize(rows))
    }
}

/// Return a [TypeMismatch] if `left` and `right` cannot be compared.
pub fn type_mismatch(left: Column<'_>, right: Column<'_>) -> Option<TypeMismatch> {
    (!left.type_name().is_compatible(right.type_name())).then(|| TypeMismatch {
        name_left: left.name().to_owned(),
        name_right: right.name().to_owned(),
        type_left: left.type_name(),
        type_right: right.type_name(),
    })
}

/// Build the join visitor matching the physical types of `left` and `right`.
///
/// Only `options.na_match` is read here. Incompatible pairs yield a [MismatchJoinVisitor]
/// without any diagnostic; reporting them according to `options.warn` is left to
/// [`super::DataFrameJoinVisitors::new`], which calls [type_mismatch] for each key pair.
pub fn join_visitor<'a>(
    left: Column<'a>,
    right: Column<'a>,
    options: &JoinOptions,
) -> JoinVisitorEnum<'a> {
    use ColumnData::{Factor, Integer, List, Logical, String};

    log::trace!(
        "building join visitor for `{}` ({}) and `{}` ({})",
        left.name(),
        left.type_name(),
        right.name(),
        right.type_name()
    );

    let na_match = options.na_match;

    match (left.data(), right.data()) {
        (Logical(l), Logical(r)) => JoinVisitorEnum::Logical(TypedJoinVisitor::new(
            TypedVisitor::new(l),
            TypedVisitor::new(r),
            na_match,
        )),
        (Integer(l), Integer(r)) => JoinVisitorEnum::Integer(TypedJoinVisitor::new(
            TypedVisitor::new(l),
            TypedVisitor::new(r),
            na_match,
        )),
        (Integer(l), ColumnData::Real(r)) => JoinVisitorEnum::IntegerReal(TypedJoinVisitor::new(
            TypedVisitor::new(l),
            TypedVisitor::new(r),
            na_match,
        )),
        (ColumnData::Real(l), Integer(r)) => JoinVisitorEnum::RealInteger(TypedJoinVisitor::new(
            TypedVisitor::new(l),
            TypedVisitor::new(r),
            na_match,
        )),
        (ColumnData::Real(l), ColumnData::Real(r)) => JoinVisitorEnum::Real(
            TypedJoinVisitor::new(TypedVisitor::new(l), TypedVisitor::new(r), na_match),
        ),
        (String(l), String(r)) => JoinVisitorEnum::String(TypedJoinVisitor::new(
            TypedVisitor::new(l),
            TypedVisitor::new(r),
            na_match,
        )),
        (String(l), Factor(r)) => JoinVisitorEnum::StringFactor(TypedJoinVisitor::new(
            TypedVisitor::new(l),
            FactorVisitor::new(r),
            na_match,
        )),
        (Factor(l), String(r)) => JoinVisitorEnum::FactorString(TypedJoinVisitor::new(
            FactorVisitor::new(l),
            TypedVisitor::new(r),
            na_match,
        )),
        (Factor(l), Factor(r)) if l.shares_levels(r) => JoinVisitorEnum::FactorCodes(
            TypedJoinVisitor::new(FactorVisitor::new(l), FactorVisitor::new(r), na_match),
        ),
        (Factor(l), Factor(r)) => JoinVisitorEnum::Factor(TypedJoinVisitor::new(
            FactorVisitor::new(l),
            FactorVisitor::new(r),
            na_match,
        )),
        (List(l), List(r)) => JoinVisitorEnum::List(TypedJoinVisitor::new(
            TypedVisitor::new(l),
            TypedVisitor::new(r),
            na_match,
        )),
        (Logical(_), Integer(_) | ColumnData::Real(_) | String(_) | Factor(_) | List(_))
        | (Integer(_) | ColumnData::Real(_), Logical(_) | String(_) | Factor(_) | List(_))
        | (String(_) | Factor(_), Logical(_) | Integer(_) | ColumnData::Real(_) | List(_))
        | (List(_), Logical(_) | Integer(_) | ColumnData::Real(_) | String(_) | Factor(_)) => {
            JoinVisitorEnum::Mismatch(MismatchJoinVisitor::new(
                visitor(left),
                visitor(right),
                na_match,
            ))
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        datatypes::{ColumnData, ColumnTypeName, StringPool},
        tabular::Column,
        visitors::{JoinOptions, VectorVisitor},
    };
    use test_log::test;

    use super::{join_visitor, type_mismatch, JoinRow, JoinVisitor, JoinVisitorEnum};

    fn build<'a>(left: &'a ColumnData, right: &'a ColumnData, na_match: bool) -> JoinVisitorEnum<'a> {
        join_visitor(
            Column::new(left, "l"),
            Column::new(right, "r"),
            &JoinOptions::default().with_na_match(na_match),
        )
    }

    #[test]
    fn integer_with_real_promotes() {
        let left = ColumnData::Integer(vec![Some(1), Some(2), None]);
        let right = ColumnData::Real(vec![Some(2.0), Some(1.5), Some(1.0), None]);
        let visitor = build(&left, &right, true);

        assert!(matches!(visitor, JoinVisitorEnum::IntegerReal(_)));
        assert!(visitor.equal(JoinRow::Left(0), JoinRow::Right(2)));
        assert!(visitor.equal(JoinRow::Left(1), JoinRow::Right(0)));
        assert!(!visitor.equal(JoinRow::Left(0), JoinRow::Right(1)));
        assert_eq!(
            visitor.hash(JoinRow::Left(1)),
            visitor.hash(JoinRow::Right(0))
        );
        assert!(visitor.equal(JoinRow::Left(2), JoinRow::Right(3)));

        assert_eq!(
            visitor.materialize(&[JoinRow::Left(1), JoinRow::Right(1)]),
            ColumnData::Real(vec![Some(2.0), Some(1.5)])
        );
    }

    #[test]
    fn na_match_is_uniform() {
        let mut pool = StringPool::new();
        let pairs = vec![
            ColumnData::Logical(vec![None]),
            ColumnData::Integer(vec![None]),
            ColumnData::Real(vec![None]),
            ColumnData::strings([None::<&str>]),
            ColumnData::Factor(pool.factor([None::<&str>])),
            ColumnData::List(vec![None]),
        ];

        for data in &pairs {
            let matching = build(data, data, true);
            let strict = build(data, data, false);

            assert!(matching.equal(JoinRow::Left(0), JoinRow::Right(0)));
            assert!(!strict.equal(JoinRow::Left(0), JoinRow::Right(0)));
            assert!(!strict.equal(JoinRow::Left(0), JoinRow::Left(0)));
        }
    }

    #[test]
    fn strings_and_factors() {
        let mut pool = StringPool::new();
        let strings = ColumnData::strings([Some("x"), Some("y")]);
        let factor = ColumnData::Factor(pool.factor([Some("y"), Some("x"), Some("z")]));
        let visitor = build(&strings, &factor, true);

        assert!(matches!(visitor, JoinVisitorEnum::StringFactor(_)));
        assert!(visitor.equal(JoinRow::Left(0), JoinRow::Right(1)));
        assert!(visitor.equal(JoinRow::Left(1), JoinRow::Right(0)));
        assert!(!visitor.equal(JoinRow::Left(0), JoinRow::Right(2)));
        assert_eq!(
            visitor.hash(JoinRow::Left(0)),
            visitor.hash(JoinRow::Right(1))
        );
        assert_eq!(
            visitor.materialize(&[JoinRow::Right(2), JoinRow::Left(0)]),
            ColumnData::strings([Some("z"), Some("x")])
        );
    }

    #[test]
    fn factors_with_different_dictionaries_decode() {
        let mut pool = StringPool::new();
        let left = ColumnData::Factor(pool.factor([Some("a"), Some("b")]));
        let right = ColumnData::Factor(pool.factor([Some("b"), Some("a")]));
        let same = ColumnData::Factor(pool.factor([Some("a"), Some("b")]));

        let decoded = build(&left, &right, true);
        assert!(matches!(decoded, JoinVisitorEnum::Factor(_)));
        assert!(decoded.equal(JoinRow::Left(0), JoinRow::Right(1)));
        assert!(!decoded.equal(JoinRow::Left(0), JoinRow::Right(0)));

        let codes = build(&left, &same, true);
        assert!(matches!(codes, JoinVisitorEnum::FactorCodes(_)));
        assert!(codes.equal(JoinRow::Left(1), JoinRow::Right(1)));
        let ColumnData::Factor(keys) = codes.materialize(&[JoinRow::Right(0)]) else {
            panic!("shared dictionaries keep the factor type");
        };
        assert_eq!(keys.codes(), &[Some(0)]);
    }

    #[test]
    fn mismatched_types_never_match() {
        let left = ColumnData::strings([Some("1"), Some("1")]);
        let right = ColumnData::Integer(vec![Some(1)]);
        let visitor = build(&left, &right, true);

        assert!(!visitor.is_compatible());
        assert!(!visitor.equal(JoinRow::Left(0), JoinRow::Right(0)));
        assert!(visitor.equal(JoinRow::Left(0), JoinRow::Left(1)));
        assert_eq!(visitor.left().type_name(), ColumnTypeName::String);
        assert_eq!(visitor.right().type_name(), ColumnTypeName::Integer);
        assert_eq!(
            visitor.materialize(&[JoinRow::Left(1), JoinRow::Right(0)]),
            ColumnData::strings([Some("1"), None])
        );

        let mismatch = type_mismatch(Column::new(&left, "l"), Column::new(&right, "r"))
            .expect("string and integer are incompatible");
        assert_eq!(mismatch.type_left, ColumnTypeName::String);
        assert_eq!(mismatch.type_right, ColumnTypeName::Integer);
        assert!(type_mismatch(Column::new(&left, "l"), Column::new(&left, "l")).is_none());
    }

    #[test]
    fn equality_is_reflexive_and_symmetric() {
        let shared = Arc::new(ColumnData::Logical(vec![]));
        let columns = vec![
            ColumnData::Logical(vec![Some(true), Some(false), Some(true)]),
            ColumnData::Integer(vec![Some(3), Some(4), Some(3)]),
            ColumnData::Real(vec![Some(0.5), Some(-1.0), Some(0.5)]),
            ColumnData::strings([Some("p"), Some("q"), Some("p")]),
            ColumnData::List(vec![Some(shared.clone()), None, Some(shared)]),
        ];

        for data in &columns {
            let visitor = build(data, data, true);
            for first in 0..3 {
                for second in 0..3 {
                    let left = JoinRow::Left(first);
                    let right = JoinRow::Right(second);
                    assert_eq!(visitor.equal(left, right), visitor.equal(right, left));
                    if visitor.equal(left, right) {
                        assert_eq!(visitor.hash(left), visitor.hash(right));
                    }
                }
                assert!(visitor.equal(JoinRow::Left(first), JoinRow::Right(first)));
            }
            assert!(visitor.equal(JoinRow::Left(0), JoinRow::Right(2)));
        }
    }

    #[test]
    fn warn_does_not_change_matching() {
        let left = ColumnData::Logical(vec![Some(true), None]);
        let right = ColumnData::Real(vec![Some(1.0), None]);

        for warn in [true, false] {
            let visitor = join_visitor(
                Column::new(&left, "l"),
                Column::new(&right, "r"),
                &JoinOptions::default().with_warn(warn),
            );

            assert!(matches!(visitor, JoinVisitorEnum::Mismatch(_)));
            assert!(!visitor.equal(JoinRow::Left(0), JoinRow::Right(0)));
            assert!(!visitor.equal(JoinRow::Left(1), JoinRow::Right(1)));
            assert!(visitor.equal(JoinRow::Left(1), JoinRow::Left(1)));
        }
    }
}
