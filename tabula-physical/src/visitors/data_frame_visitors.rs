//! This module defines [DataFrameVisitors].

use crate::{error::Error, tabular::DataFrame};

use super::{
    hash_combine,
    vector_visitor::{visitor, ColumnVisitor, VectorVisitor},
};

/// One [VectorVisitor] per selected column of a [DataFrame].
///
/// `visitors[i]` always belongs to the column named `visitor_names[i]`.
#[derive(Debug)]
pub struct DataFrameVisitors<'a> {
    data: &'a DataFrame,
    visitors: Vec<ColumnVisitor<'a>>,
    visitor_names: Vec<String>,
}

impl<'a> DataFrameVisitors<'a> {
    /// Build one visitor for every column of `data`, in table order.
    pub fn new(data: &'a DataFrame) -> Self {
        Self {
            data,
            visitors: data.columns().map(visitor).collect(),
            visitor_names: data.names().to_vec(),
        }
    }

    /// Build one visitor for each of the given column names.
    ///
    /// # Errors
    /// Returns [Error::UnknownColumn] for the first name that is not a column of `data`.
    pub fn with_names<S: AsRef<str>>(data: &'a DataFrame, names: &[S]) -> Result<Self, Error> {
        let indices = data.match_names(names);

        let visitors = names
            .iter()
            .zip(indices)
            .map(|(name, index)| {
                index
                    .map(|index| visitor(data.column(index)))
                    .ok_or_else(|| Error::UnknownColumn(name.as_ref().to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            data,
            visitors,
            visitor_names: names.iter().map(|name| name.as_ref().to_owned()).collect(),
        })
    }

    /// Return the number of visitors.
    pub fn size(&self) -> usize {
        self.visitors.len()
    }

    /// Return the visitor at position `k`.
    ///
    /// # Panics
    /// Panics if `k` is out of bounds.
    pub fn get(&self, k: usize) -> &ColumnVisitor<'a> {
        &self.visitors[k]
    }

    /// Return the name of the column visited at position `k`.
    ///
    /// # Panics
    /// Panics if `k` is out of bounds.
    pub fn name(&self, k: usize) -> &str {
        &self.visitor_names[k]
    }

    /// Return the names of the visited columns.
    pub fn names(&self) -> &[String] {
        &self.visitor_names
    }

    /// Return the row count of the visited table.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Return a hash of row `i` over all visited columns.
    pub fn hash(&self, i: usize) -> u64 {
        self.visitors
            .iter()
            .fold(0, |seed, visitor| hash_combine(seed, visitor.hash(i)))
    }

    /// Returns true iff rows `i` and `j` agree on every visited column.
    /// Missing values are considered equal to each other.
    pub fn equal(&self, i: usize, j: usize) -> bool {
        i == j
            || self
                .visitors
                .iter()
                .all(|visitor| visitor.equal_or_both_na(i, j))
    }
}
