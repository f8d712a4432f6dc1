//! This module defines the trait [VectorVisitor] and its implementations,
//! as well as [ColumnVisitor],
//! which collects all implementations of [VectorVisitor] into a single object.

use std::{
    fmt::Debug,
    hash::{BuildHasher, Hasher},
    sync::Arc,
};

use crate::{
    datatypes::{ColumnData, ColumnTypeName, FactorColumn},
    tabular::Column,
};

use super::{cell::CellValue, NA_HASH};

/// Per-column operations that do not depend on the physical type of the column.
pub trait VectorVisitor: Debug {
    /// Returns the number of rows of the visited column.
    fn len(&self) -> usize;

    /// Returns true iff the visited column has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the physical type of the visited column.
    fn type_name(&self) -> ColumnTypeName;

    /// Returns true iff the value at row `i` is missing.
    fn is_na(&self, i: usize) -> bool;

    /// Returns a hash of the value at row `i`.
    /// Rows for which [VectorVisitor::equal_or_both_na] holds hash identically.
    fn hash(&self, i: usize) -> u64;

    /// Returns true iff the values at rows `i` and `j` are present and equal.
    fn equal(&self, i: usize, j: usize) -> bool;

    /// Returns true iff the values at rows `i` and `j` are equal or both missing.
    fn equal_or_both_na(&self, i: usize, j: usize) -> bool {
        self.equal(i, j) || (self.is_na(i) && self.is_na(j))
    }
}

/// [VectorVisitor] over a column whose values are stored directly.
#[derive(Debug)]
pub struct TypedVisitor<'a, T> {
    values: &'a [Option<T>],
}

impl<T> Clone for TypedVisitor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedVisitor<'_, T> {}

impl<'a, T: CellValue> TypedVisitor<'a, T> {
    /// Create a new [TypedVisitor] over the given values.
    pub fn new(values: &'a [Option<T>]) -> Self {
        Self { values }
    }

    /// Return the visited values.
    pub fn values(&self) -> &'a [Option<T>] {
        self.values
    }
}

impl<T: CellValue> VectorVisitor for TypedVisitor<'_, T> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn type_name(&self) -> ColumnTypeName {
        T::TYPE
    }

    fn is_na(&self, i: usize) -> bool {
        self.values[i].is_none()
    }

    fn hash(&self, i: usize) -> u64 {
        match &self.values[i] {
            Some(value) => {
                let mut state = super::HASH_BUILDER.build_hasher();
                value.cell_hash(&mut state);
                state.finish()
            }
            None => NA_HASH,
        }
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        match (&self.values[i], &self.values[j]) {
            (Some(left), Some(right)) => left.cell_eq(right),
            _ => false,
        }
    }
}

/// [VectorVisitor] over a dictionary-encoded column.
/// Rows are compared by their codes, as they all share one dictionary.
#[derive(Debug, Clone, Copy)]
pub struct FactorVisitor<'a> {
    factor: &'a FactorColumn,
}

impl<'a> FactorVisitor<'a> {
    /// Create a new [FactorVisitor] for the given column.
    pub fn new(factor: &'a FactorColumn) -> Self {
        Self { factor }
    }

    /// Return the visited column.
    pub fn factor(&self) -> &'a FactorColumn {
        self.factor
    }

    /// Return the decoded value at row `i`.
    pub fn decode(&self, i: usize) -> Option<&'a Arc<str>> {
        self.factor.decode(i)
    }
}

impl VectorVisitor for FactorVisitor<'_> {
    fn len(&self) -> usize {
        self.factor.len()
    }

    fn type_name(&self) -> ColumnTypeName {
        ColumnTypeName::Factor
    }

    fn is_na(&self, i: usize) -> bool {
        self.factor.codes()[i].is_none()
    }

    fn hash(&self, i: usize) -> u64 {
        self.factor.codes()[i].map_or(NA_HASH, |code| super::hash_value(&code))
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        let codes = self.factor.codes();
        matches!((codes[i], codes[j]), (Some(left), Some(right)) if left == right)
    }
}

/// Forward a call to the visitor held by each variant.
macro_rules! forward_to_visitor {
    ($self:ident, |$visitor:ident| $body:expr) => {
        match $self {
            Self::Logical($visitor) => $body,
            Self::Integer($visitor) => $body,
            Self::Real($visitor) => $body,
            Self::String($visitor) => $body,
            Self::Factor($visitor) => $body,
            Self::List($visitor) => $body,
        }
    };
}
pub(crate) use forward_to_visitor;

/// Enum collecting one visitor implementation per [ColumnTypeName].
#[derive(Debug, Clone, Copy)]
pub enum ColumnVisitor<'a> {
    /// Case [ColumnTypeName::Logical]
    Logical(TypedVisitor<'a, bool>),
    /// Case [ColumnTypeName::Integer]
    Integer(TypedVisitor<'a, i32>),
    /// Case [ColumnTypeName::Real]
    Real(TypedVisitor<'a, f64>),
    /// Case [ColumnTypeName::String]
    String(TypedVisitor<'a, Arc<str>>),
    /// Case [ColumnTypeName::Factor]
    Factor(FactorVisitor<'a>),
    /// Case [ColumnTypeName::List]
    List(TypedVisitor<'a, Arc<ColumnData>>),
}

impl VectorVisitor for ColumnVisitor<'_> {
    fn len(&self) -> usize {
        forward_to_visitor!(self, |visitor| visitor.len())
    }

    fn type_name(&self) -> ColumnTypeName {
        forward_to_visitor!(self, |visitor| visitor.type_name())
    }

    fn is_na(&self, i: usize) -> bool {
        forward_to_visitor!(self, |visitor| visitor.is_na(i))
    }

    fn hash(&self, i: usize) -> u64 {
        forward_to_visitor!(self, |visitor| visitor.hash(i))
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        forward_to_visitor!(self, |visitor| visitor.equal(i, j))
    }

    fn equal_or_both_na(&self, i: usize, j: usize) -> bool {
        forward_to_visitor!(self, |visitor| visitor.equal_or_both_na(i, j))
    }
}

impl<'a> From<TypedVisitor<'a, bool>> for ColumnVisitor<'a> {
    fn from(visitor: TypedVisitor<'a, bool>) -> Self {
        Self::Logical(visitor)
    }
}

impl<'a> From<TypedVisitor<'a, i32>> for ColumnVisitor<'a> {
    fn from(visitor: TypedVisitor<'a, i32>) -> Self {
        Self::Integer(visitor)
    }
}

impl<'a> From<TypedVisitor<'a, f64>> for ColumnVisitor<'a> {
    fn from(visitor: TypedVisitor<'a, f64>) -> Self {
        Self::Real(visitor)
    }
}

impl<'a> From<TypedVisitor<'a, Arc<str>>> for ColumnVisitor<'a> {
    fn from(visitor: TypedVisitor<'a, Arc<str>>) -> Self {
        Self::String(visitor)
    }
}

impl<'a> From<FactorVisitor<'a>> for ColumnVisitor<'a> {
    fn from(visitor: FactorVisitor<'a>) -> Self {
        Self::Factor(visitor)
    }
}

impl<'a> From<TypedVisitor<'a, Arc<ColumnData>>> for ColumnVisitor<'a> {
    fn from(visitor: TypedVisitor<'a, Arc<ColumnData>>) -> Self {
        Self::List(visitor)
    }
}

/// Build the visitor matching the physical type of `column`.
pub fn visitor(column: Column<'_>) -> ColumnVisitor<'_> {
    log::trace!(
        "building {} visitor for column `{}`",
        column.type_name(),
        column.name()
    );

    match column.data() {
        ColumnData::Logical(values) => ColumnVisitor::Logical(TypedVisitor::new(values)),
        ColumnData::Integer(values) => ColumnVisitor::Integer(TypedVisitor::new(values)),
        ColumnData::Real(values) => ColumnVisitor::Real(TypedVisitor::new(values)),
        ColumnData::String(values) => ColumnVisitor::String(TypedVisitor::new(values)),
        ColumnData::Factor(factor) => ColumnVisitor::Factor(FactorVisitor::new(factor)),
        ColumnData::List(values) => ColumnVisitor::List(TypedVisitor::new(values)),
    }
}
