//! This module defines the trait [SubsetVectorVisitor].

use crate::datatypes::{ColumnData, FactorColumn};

use super::{
    cell::CellValue,
    vector_visitor::{forward_to_visitor, ColumnVisitor, FactorVisitor, TypedVisitor, VectorVisitor},
};

/// A [VectorVisitor] that can produce new columns from a selection of its rows.
///
/// Indices are 0-based. The produced column always has the physical type of the visited one.
pub trait SubsetVectorVisitor: VectorVisitor {
    /// Return a new column containing the rows at `indices`, in that order.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    fn materialize(&self, indices: &[usize]) -> ColumnData;

    /// Return a new column containing the rows at `indices`,
    /// where `None` produces a missing value.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    fn materialize_with_missing(&self, indices: &[Option<usize>]) -> ColumnData;
}

impl<T: CellValue> SubsetVectorVisitor for TypedVisitor<'_, T> {
    fn materialize(&self, indices: &[usize]) -> ColumnData {
        let values = self.values();
        T::into_column(indices.iter().map(|&index| values[index].clone()).collect())
    }

    fn materialize_with_missing(&self, indices: &[Option<usize>]) -> ColumnData {
        let values = self.values();
        T::into_column(
            indices
                .iter()
                .map(|index| index.and_then(|index| values[index].clone()))
                .collect(),
        )
    }
}

impl SubsetVectorVisitor for FactorVisitor<'_> {
    fn materialize(&self, indices: &[usize]) -> ColumnData {
        let codes = self.factor().codes();
        ColumnData::Factor(FactorColumn::from_parts(
            indices.iter().map(|&index| codes[index]).collect(),
            self.factor().levels().clone(),
        ))
    }

    fn materialize_with_missing(&self, indices: &[Option<usize>]) -> ColumnData {
        let codes = self.factor().codes();
        ColumnData::Factor(FactorColumn::from_parts(
            indices
                .iter()
                .map(|index| index.and_then(|index| codes[index]))
                .collect(),
            self.factor().levels().clone(),
        ))
    }
}

impl SubsetVectorVisitor for ColumnVisitor<'_> {
    fn materialize(&self, indices: &[usize]) -> ColumnData {
        forward_to_visitor!(self, |visitor| visitor.materialize(indices))
    }

    fn materialize_with_missing(&self, indices: &[Option<usize>]) -> ColumnData {
        forward_to_visitor!(self, |visitor| visitor.materialize_with_missing(indices))
    }
}
