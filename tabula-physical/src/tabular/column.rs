use crate::datatypes::{ColumnData, ColumnTypeName};

/// A named column borrowed from a [`super::DataFrame`].
///
/// Visitors built from a [Column] borrow its data,
/// so none of them can outlive the table the column belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    data: &'a ColumnData,
    name: &'a str,
}

impl<'a> Column<'a> {
    /// Create a new [Column].
    pub fn new(data: &'a ColumnData, name: &'a str) -> Self {
        Self { data, name }
    }

    /// Return the values of this column.
    pub fn data(&self) -> &'a ColumnData {
        self.data
    }

    /// Return the name of this column.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Return the physical type of this column.
    pub fn type_name(&self) -> ColumnTypeName {
        self.data.type_name()
    }

    /// Return the number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true iff the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
