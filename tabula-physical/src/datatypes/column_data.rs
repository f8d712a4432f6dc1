//! This module defines [ColumnData],
//! which collects the storage of every physical column type into a single object.

use std::sync::Arc;

use itertools::Itertools;

use crate::error::Error;

use super::ColumnTypeName;

/// Storage for a column of dictionary-encoded strings.
///
/// Every code refers to an entry of `levels`, which may be shared between columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorColumn {
    codes: Vec<Option<u32>>,
    levels: Arc<[Arc<str>]>,
}

impl FactorColumn {
    /// Create a new [FactorColumn] from its codes and its dictionary.
    ///
    /// # Errors
    /// Returns an error if `levels` contains a string twice,
    /// or if a code does not refer to an entry of `levels`.
    pub fn new(codes: Vec<Option<u32>>, levels: Arc<[Arc<str>]>) -> Result<Self, Error> {
        // codes are only comparable if each string has exactly one code
        if let Some(level) = levels.iter().duplicates().next() {
            return Err(Error::DuplicateFactorLevel(level.to_string()));
        }

        if let Some(code) = codes
            .iter()
            .flatten()
            .find(|&&code| code as usize >= levels.len())
        {
            return Err(Error::FactorCodeOutOfRange {
                code: *code,
                levels: levels.len(),
            });
        }

        Ok(Self::from_parts(codes, levels))
    }

    /// Assemble a [FactorColumn] from codes already known to be valid for `levels`.
    pub(crate) fn from_parts(codes: Vec<Option<u32>>, levels: Arc<[Arc<str>]>) -> Self {
        debug_assert!(levels.iter().all_unique());
        debug_assert!(codes
            .iter()
            .flatten()
            .all(|&code| (code as usize) < levels.len()));

        Self { codes, levels }
    }

    /// Return the codes of this column.
    pub fn codes(&self) -> &[Option<u32>] {
        &self.codes
    }

    /// Return the dictionary of this column.
    pub fn levels(&self) -> &Arc<[Arc<str>]> {
        &self.levels
    }

    /// Return the number of rows.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true iff the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Return the decoded string at the given row, or `None` if it is missing.
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn decode(&self, row: usize) -> Option<&Arc<str>> {
        self.codes[row].map(|code| &self.levels[code as usize])
    }

    /// Returns true iff codes of `self` and `other` denote the same strings.
    pub fn shares_levels(&self, other: &FactorColumn) -> bool {
        Arc::ptr_eq(&self.levels, &other.levels) || self.levels[..] == other.levels[..]
    }
}

/// The values of a single column, one variant per [ColumnTypeName].
///
/// Missing values are represented as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Case [ColumnTypeName::Logical]
    Logical(Vec<Option<bool>>),
    /// Case [ColumnTypeName::Integer]
    Integer(Vec<Option<i32>>),
    /// Case [ColumnTypeName::Real]
    Real(Vec<Option<f64>>),
    /// Case [ColumnTypeName::String]
    String(Vec<Option<Arc<str>>>),
    /// Case [ColumnTypeName::Factor]
    Factor(FactorColumn),
    /// Case [ColumnTypeName::List]
    List(Vec<Option<Arc<ColumnData>>>),
}

impl ColumnData {
    /// Create a string column from the given values without interning them.
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        Self::String(
            values
                .into_iter()
                .map(|value| value.map(|value| Arc::from(value.as_ref())))
                .collect(),
        )
    }

    /// Return the [ColumnTypeName] of this column.
    pub fn type_name(&self) -> ColumnTypeName {
        match self {
            ColumnData::Logical(_) => ColumnTypeName::Logical,
            ColumnData::Integer(_) => ColumnTypeName::Integer,
            ColumnData::Real(_) => ColumnTypeName::Real,
            ColumnData::String(_) => ColumnTypeName::String,
            ColumnData::Factor(_) => ColumnTypeName::Factor,
            ColumnData::List(_) => ColumnTypeName::List,
        }
    }

    /// Return the number of rows.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Logical(values) => values.len(),
            ColumnData::Integer(values) => values.len(),
            ColumnData::Real(values) => values.len(),
            ColumnData::String(values) => values.len(),
            ColumnData::Factor(factor) => factor.len(),
            ColumnData::List(values) => values.len(),
        }
    }

    /// Returns true iff the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true iff the value at the given row is missing.
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn is_na(&self, row: usize) -> bool {
        match self {
            ColumnData::Logical(values) => values[row].is_none(),
            ColumnData::Integer(values) => values[row].is_none(),
            ColumnData::Real(values) => values[row].is_none(),
            ColumnData::String(values) => values[row].is_none(),
            ColumnData::Factor(factor) => factor.codes()[row].is_none(),
            ColumnData::List(values) => values[row].is_none(),
        }
    }
}
