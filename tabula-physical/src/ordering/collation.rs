use std::{fmt::Debug, sync::Arc};

use itertools::Itertools;

/// Canonical order and uniqueness of strings,
/// as supplied by the environment the engine is embedded in.
pub trait Collation: Debug {
    /// Return a sorted copy of `values`.
    ///
    /// The result must contain every value of the input exactly as often as the input does.
    fn sort<'s>(&self, values: &[&'s str]) -> Vec<&'s str>;

    /// Return the distinct values of `values`, in no particular order.
    /// Missing values are kept as a single missing value.
    fn unique(&self, values: &[Option<Arc<str>>]) -> Vec<Option<Arc<str>>> {
        values.iter().unique().cloned().collect()
    }
}

/// Orders strings by their bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexicographic;

impl Collation for Lexicographic {
    fn sort<'s>(&self, values: &[&'s str]) -> Vec<&'s str> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted
    }
}

/// Orders strings ignoring case, with byte order as a tiebreak.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseInsensitive;

impl Collation for CaseInsensitive {
    fn sort<'s>(&self, values: &[&'s str]) -> Vec<&'s str> {
        values
            .iter()
            .map(|value| (value.to_lowercase(), *value))
            .sorted_unstable()
            .map(|(_, value)| value)
            .collect()
    }
}
