//! This module defines [CharacterVectorOrderer].

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use crate::error::Error;

use super::Collation;

/// Returns true iff both cells hold the same string allocation, or are both missing.
///
/// This is only a shortcut: equal strings in different allocations are not detected.
fn identical(first: &Option<Arc<str>>, second: &Option<Arc<str>>) -> bool {
    match (first, second) {
        (Some(first), Some(second)) => Arc::ptr_eq(first, second),
        (None, None) => true,
        _ => false,
    }
}

/// Dense ranks of the values of a string column.
///
/// `orders()[i]` is the 1-based position of the `i`-th value
/// among the distinct values of the column, sorted by a [Collation].
/// Missing values rank after every present value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterVectorOrderer {
    orders: Vec<usize>,
}

impl CharacterVectorOrderer {
    /// Rank the values of `data` according to `collation`.
    ///
    /// Runs of the same interned string are ranked without hashing,
    /// so grouped or sorted input is processed faster.
    ///
    /// # Errors
    /// Returns [Error::IncompleteCollation] if `collation` does not return
    /// every value it was asked to sort.
    pub fn new<C: Collation + ?Sized>(
        data: &[Option<Arc<str>>],
        collation: &C,
    ) -> Result<Self, Error> {
        if data.is_empty() {
            return Ok(Self { orders: Vec::new() });
        }

        // gather the distinct values
        let mut set = HashSet::<&str>::new();
        let mut has_na = false;
        let mut previous: Option<&Option<Arc<str>>> = None;
        for value in data {
            if previous.is_some_and(|previous| identical(previous, value)) {
                continue;
            }

            match value {
                Some(string) => {
                    set.insert(&**string);
                }
                None => has_na = true,
            }
            previous = Some(value);
        }

        let uniques = set.into_iter().collect::<Vec<_>>();
        log::debug!(
            "Sorting {} unique character elements{}",
            uniques.len(),
            if has_na { " and a missing value" } else { "" }
        );

        let sorted = collation.sort(&uniques);

        // position of each unique value within the sorted copy
        let mut positions = HashMap::<&str, usize>::with_capacity(sorted.len());
        for (position, value) in sorted.iter().enumerate() {
            positions.entry(*value).or_insert(position + 1);
        }
        let rank_of_unique = uniques
            .iter()
            .map(|value| {
                positions
                    .get(value)
                    .copied()
                    .ok_or_else(|| Error::IncompleteCollation((*value).to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ranks = uniques
            .iter()
            .copied()
            .zip(rank_of_unique)
            .collect::<HashMap<&str, usize>>();
        let na_rank = ranks.len() + 1;

        let mut orders = Vec::with_capacity(data.len());
        let mut previous: Option<(&Option<Arc<str>>, usize)> = None;
        for value in data {
            let rank = match previous {
                Some((previous, rank)) if identical(previous, value) => rank,
                _ => match value {
                    Some(string) => ranks
                        .get(&**string)
                        .copied()
                        .ok_or_else(|| Error::IncompleteCollation(string.to_string()))?,
                    None => na_rank,
                },
            };

            orders.push(rank);
            previous = Some((value, rank));
        }

        Ok(Self { orders })
    }

    /// Return the rank of every row.
    pub fn orders(&self) -> &[usize] {
        &self.orders
    }

    /// Consume the orderer and return the rank of every row.
    pub fn into_orders(self) -> Vec<usize> {
        self.orders
    }
}

/// Return the distinct values occurring in `left` or `right`, in no particular order.
pub fn get_uniques<C: Collation + ?Sized>(
    left: &[Option<Arc<str>>],
    right: &[Option<Arc<str>>],
    collation: &C,
) -> Vec<Option<Arc<str>>> {
    let mut big = Vec::with_capacity(left.len() + right.len());
    big.extend_from_slice(left);
    big.extend_from_slice(right);

    collation.unique(&big)
}

#[cfg(test)]
mod test {
    use std::{collections::BTreeSet, sync::Arc};

    use quickcheck_macros::quickcheck;
    use rand::{seq::SliceRandom, SeedableRng};
    use rand_pcg::Pcg64;
    use test_log::test;

    use crate::{
        datatypes::StringPool,
        error::Error,
        ordering::{CaseInsensitive, Collation, Lexicographic},
        test_util::strings,
    };

    use super::{get_uniques, CharacterVectorOrderer};

    #[test]
    fn ranks_follow_the_collation() {
        let data = strings(&["b", "a", "a", "c", "b"]);
        let orderer = CharacterVectorOrderer::new(&data, &Lexicographic).expect("complete collation");

        assert_eq!(orderer.orders(), &[2, 1, 1, 3, 2]);
    }

    #[test]
    fn empty_input() {
        let orderer = CharacterVectorOrderer::new(&[], &Lexicographic).expect("nothing to sort");
        assert!(orderer.orders().is_empty());
    }

    #[test]
    fn interned_runs() {
        let mut pool = StringPool::new();
        let data = ["x", "x", "x", "b", "b", "x", "a"]
            .iter()
            .map(|value| Some(pool.intern(value)))
            .collect::<Vec<_>>();

        let orderer = CharacterVectorOrderer::new(&data, &Lexicographic).expect("complete collation");
        assert_eq!(orderer.into_orders(), vec![3, 3, 3, 2, 2, 3, 1]);
    }

    #[test]
    fn missing_values_rank_last() {
        let data: Vec<Option<Arc<str>>> = vec![None, Some(Arc::from("m")), None, Some(Arc::from("a"))];
        let orderer = CharacterVectorOrderer::new(&data, &Lexicographic).expect("complete collation");

        assert_eq!(orderer.orders(), &[3, 2, 3, 1]);
    }

    #[test]
    fn custom_collation() {
        let data = strings(&["b", "A", "a", "B"]);
        let orderer = CharacterVectorOrderer::new(&data, &CaseInsensitive).expect("complete collation");

        assert_eq!(orderer.orders(), &[4, 1, 2, 3]);
    }

    #[derive(Debug)]
    struct Forgetful;

    impl Collation for Forgetful {
        fn sort<'s>(&self, values: &[&'s str]) -> Vec<&'s str> {
            values.iter().copied().filter(|value| *value != "lost").collect()
        }
    }

    #[test]
    fn incomplete_collation() {
        let data = strings(&["kept", "lost"]);

        assert_eq!(
            CharacterVectorOrderer::new(&data, &Forgetful),
            Err(Error::IncompleteCollation("lost".to_string()))
        );
    }

    #[test]
    fn shuffled_input_keeps_ranks() {
        let values = (0..200).map(|i| format!("value-{}", i % 37)).collect::<Vec<_>>();
        let data = values
            .iter()
            .map(|value| Some(Arc::<str>::from(value.as_str())))
            .collect::<Vec<_>>();
        let expected = CharacterVectorOrderer::new(&data, &Lexicographic).expect("complete collation");

        let mut rng = Pcg64::seed_from_u64(7);
        let mut permutation = (0..data.len()).collect::<Vec<_>>();
        permutation.shuffle(&mut rng);

        let shuffled = permutation.iter().map(|&i| data[i].clone()).collect::<Vec<_>>();
        let orderer = CharacterVectorOrderer::new(&shuffled, &Lexicographic).expect("complete collation");

        for (position, &source) in permutation.iter().enumerate() {
            assert_eq!(orderer.orders()[position], expected.orders()[source]);
        }
    }

    #[test]
    fn uniques_of_two_columns() {
        let uniques = get_uniques(&strings(&["a", "b"]), &strings(&["b", "c"]), &Lexicographic);

        let set = uniques.into_iter().flatten().map(|value| value.to_string()).collect::<BTreeSet<_>>();
        assert_eq!(
            set,
            ["a", "b", "c"].iter().map(|value| value.to_string()).collect::<BTreeSet<_>>()
        );
    }

    #[quickcheck]
    #[cfg_attr(miri, ignore)]
    fn ranks_are_dense_and_consistent(values: Vec<Option<String>>) -> bool {
        log::debug!("used values: {:?}", values);

        let data = values
            .iter()
            .map(|value| value.as_deref().map(Arc::<str>::from))
            .collect::<Vec<_>>();
        let Ok(orderer) = CharacterVectorOrderer::new(&data, &Lexicographic) else {
            return false;
        };
        let orders = orderer.orders();

        let distinct = values.iter().collect::<BTreeSet<_>>();
        let used = orders.iter().copied().collect::<BTreeSet<_>>();
        if used != (1..=distinct.len()).collect::<BTreeSet<_>>() {
            return false;
        }

        (0..values.len()).all(|i| {
            (0..values.len()).all(|j| {
                (orders[i] == orders[j]) == (values[i] == values[j])
                    && match (&values[i], &values[j]) {
                        (Some(first), Some(second)) => {
                            (first < second) == (orders[i] < orders[j])
                        }
                        (None, Some(_)) => orders[i] > orders[j],
                        _ => true,
                    }
            })
        })
    }
}
