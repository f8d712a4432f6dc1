//! This module defines [DataFrameSubsetVisitors].

use itertools::Itertools;

use crate::{error::Error, tabular::DataFrame};

use super::{
    subset_visitor::SubsetVectorVisitor,
    vector_visitor::{visitor, ColumnVisitor},
};

/// One [SubsetVectorVisitor] per selected column of a [DataFrame],
/// used to derive new tables from a selection of rows.
#[derive(Debug)]
pub struct DataFrameSubsetVisitors<'a> {
    data: &'a DataFrame,
    visitors: Vec<ColumnVisitor<'a>>,
    visitor_names: Vec<String>,
}

impl<'a> DataFrameSubsetVisitors<'a> {
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
        let mut visitors = Vec::with_capacity(names.len());
        let mut visitor_names = Vec::with_capacity(names.len());

        for (name, index) in names.iter().zip(data.match_names(names)) {
            let index = index.ok_or_else(|| Error::UnknownColumn(name.as_ref().to_owned()))?;
            let column = data.column(index);

            visitors.push(visitor(column));
            visitor_names.push(column.name().to_owned());
        }

        Ok(Self {
            data,
            visitors,
            visitor_names,
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

    /// Return the row count of the visited table.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Turn `target` into a table shaped like the visited one:
    /// attributes and auxiliary variables are copied from the source,
    /// class tags are set to `classes`, the row count to `nrows`,
    /// and the columns are named after the visited columns.
    ///
    /// # Errors
    /// Returns [Error::NameCountMismatch] if `target` does not have one column per visitor,
    /// and [Error::ColumnLengthMismatch] if a column of `target` does not have `nrows` rows.
    /// `target` is left unchanged on error.
    pub fn structure<S: AsRef<str>>(
        &self,
        target: &mut DataFrame,
        nrows: usize,
        classes: &[S],
    ) -> Result<(), Error> {
        if self.visitor_names.len() != target.ncol() {
            return Err(Error::NameCountMismatch {
                names: self.visitor_names.len(),
                columns: target.ncol(),
            });
        }
        target.check_row_count(nrows)?;

        target.copy_most_attributes(self.data);
        target.set_classes(classes);
        target.set_row_count(nrows)?;
        target.set_names(self.visitor_names.clone())?;
        target.copy_vars(self.data);

        Ok(())
    }

    /// Return a new table containing the rows at the given 0-based `indices`, in that order.
    ///
    /// # Errors
    /// Returns [Error::IndexOutOfBounds] if an index exceeds the row count.
    pub fn subset<S: AsRef<str>>(&self, indices: &[usize], classes: &[S]) -> Result<DataFrame, Error> {
        let nrows = self.nrows();
        if let Some(&index) = indices.iter().find(|&&index| index >= nrows) {
            return Err(Error::IndexOutOfBounds { index, nrows });
        }

        let columns = self
            .visitors
            .iter()
            .map(|visitor| visitor.materialize(indices))
            .collect();

        let mut result = DataFrame::from_columns(columns, indices.len());
        self.structure(&mut result, indices.len(), classes)?;

        Ok(result)
    }

    /// Return a new table containing the rows for which `mask` is true.
    ///
    /// # Errors
    /// Returns [Error::MaskLengthMismatch] if `mask` does not have one entry per row.
    pub fn subset_mask<S: AsRef<str>>(&self, mask: &[bool], classes: &[S]) -> Result<DataFrame, Error> {
        if mask.len() != self.nrows() {
            return Err(Error::MaskLengthMismatch {
                mask: mask.len(),
                nrows: self.nrows(),
            });
        }

        let indices = mask.iter().positions(|&selected| selected).collect::<Vec<_>>();
        self.subset(&indices, classes)
    }
}
