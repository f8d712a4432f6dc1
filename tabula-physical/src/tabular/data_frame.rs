//! This module defines [DataFrame], the host container of named columns.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{datatypes::ColumnData, error::Error};

use super::Column;

/// A table of named, independently typed columns of equal length.
///
/// Besides its columns a [DataFrame] carries class tags,
/// non-structural attributes and a list of auxiliary variables (e.g. grouping columns),
/// which are carried over when new tables are derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<ColumnData>,
    names: Vec<String>,
    nrows: usize,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    vars: Vec<String>,
}

impl DataFrame {
    /// Create a new [DataFrame] from a list of named columns.
    ///
    /// # Errors
    /// Returns an error if the columns differ in length.
    pub fn new<S: Into<String>>(columns: Vec<(S, ColumnData)>) -> Result<Self, Error> {
        let (names, columns): (Vec<String>, Vec<ColumnData>) = columns
            .into_iter()
            .map(|(name, data)| (name.into(), data))
            .unzip();

        let nrows = columns.first().map_or(0, ColumnData::len);
        if let Some((name, data)) = names
            .iter()
            .zip(columns.iter())
            .find(|(_, data)| data.len() != nrows)
        {
            return Err(Error::ColumnLengthMismatch {
                name: name.clone(),
                expected: nrows,
                found: data.len(),
            });
        }

        Ok(Self {
            columns,
            names,
            nrows,
            ..Default::default()
        })
    }

    /// Create a table without names or metadata from raw columns of `nrows` rows.
    /// The result is meant to be completed by [`crate::visitors::DataFrameSubsetVisitors::structure`].
    pub(crate) fn from_columns(columns: Vec<ColumnData>, nrows: usize) -> Self {
        debug_assert!(columns.iter().all(|column| column.len() == nrows));

        Self {
            columns,
            nrows,
            ..Default::default()
        }
    }

    /// Return the number of columns.
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the column at the given position.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn column(&self, index: usize) -> Column<'_> {
        Column::new(&self.columns[index], self.name(index))
    }

    /// Return the first column with the given name.
    pub fn column_by_name(&self, name: &str) -> Option<Column<'_>> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| self.column(index))
    }

    /// Return an iterator over all columns in table order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> {
        (0..self.ncol()).map(|index| self.column(index))
    }

    /// Return the name of the column at the given position.
    /// Columns without a name are reported with an empty name.
    pub fn name(&self, index: usize) -> &str {
        self.names.get(index).map_or("", String::as_str)
    }

    /// Return the column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Replace the column names.
    ///
    /// # Errors
    /// Returns an error if the number of names differs from the number of columns.
    pub fn set_names(&mut self, names: Vec<String>) -> Result<(), Error> {
        if names.len() != self.ncol() {
            return Err(Error::NameCountMismatch {
                names: names.len(),
                columns: self.ncol(),
            });
        }

        self.names = names;
        Ok(())
    }

    /// For each requested name, return the position of the first column with that name.
    pub fn match_names<S: AsRef<str>>(&self, requested: &[S]) -> Vec<Option<usize>> {
        requested
            .iter()
            .map(|name| self.names.iter().position(|candidate| candidate == name.as_ref()))
            .collect()
    }

    /// Return the class tags.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Replace the class tags.
    pub fn set_classes<S: AsRef<str>>(&mut self, classes: &[S]) {
        self.classes = classes.iter().map(|class| class.as_ref().to_owned()).collect();
    }

    /// Check that every column has `nrows` rows.
    ///
    /// # Errors
    /// Returns [Error::ColumnLengthMismatch] for the first column of a different length.
    pub fn check_row_count(&self, nrows: usize) -> Result<(), Error> {
        match self.columns().find(|column| column.len() != nrows) {
            Some(column) => Err(Error::ColumnLengthMismatch {
                name: column.name().to_owned(),
                expected: nrows,
                found: column.len(),
            }),
            None => Ok(()),
        }
    }

    /// Set the row count of a table.
    ///
    /// # Errors
    /// Returns an error if a column does not have `nrows` rows.
    /// The table is left unchanged in that case.
    pub fn set_row_count(&mut self, nrows: usize) -> Result<(), Error> {
        self.check_row_count(nrows)?;
        self.nrows = nrows;

        Ok(())
    }

    /// Return the non-structural attributes.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Set a non-structural attribute.
    pub fn set_attribute<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Return the auxiliary variables of this table.
    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    /// Replace the auxiliary variables of this table.
    pub fn set_vars<S: AsRef<str>>(&mut self, vars: &[S]) {
        self.vars = vars.iter().map(|var| var.as_ref().to_owned()).collect();
    }

    /// Copy all non-structural attributes of `source` onto `self`.
    ///
    /// Attributes are merged: an attribute present in both tables takes the value of `source`,
    /// attributes only present in `self` are kept.
    /// Names, classes and the row count are left untouched.
    pub fn copy_most_attributes(&mut self, source: &DataFrame) {
        self.attributes.extend(
            source
                .attributes
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }

    /// Copy the auxiliary variables of `source` onto `self`.
    pub fn copy_vars(&mut self, source: &DataFrame) {
        self.vars.clone_from(&source.vars);
    }

    /// Consume the table and return its columns.
    pub fn into_columns(self) -> Vec<ColumnData> {
        self.columns
    }
}

impl std::fmt::Display for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DataFrame [{} x {}] ({})",
            self.nrows,
            self.ncol(),
            self.columns()
                .map(|column| format!("{}: {}", column.name(), column.type_name()))
                .join(", ")
        )
    }
}
