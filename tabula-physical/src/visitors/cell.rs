use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::datatypes::{ColumnData, ColumnTypeName, Real};

/// Element type of a column whose values are stored directly,
/// i.e. every physical type except [ColumnTypeName::Factor].
pub trait CellValue: Clone + Debug + Send + Sync {
    /// The physical type of columns holding this value.
    const TYPE: ColumnTypeName;

    /// Returns true iff both values are equal.
    fn cell_eq(&self, other: &Self) -> bool;

    /// Feed this value into `state`, consistently with [CellValue::cell_eq].
    fn cell_hash<H: Hasher>(&self, state: &mut H);

    /// Wrap a vector of values into a column.
    fn into_column(values: Vec<Option<Self>>) -> ColumnData;
}

impl CellValue for bool {
    const TYPE: ColumnTypeName = ColumnTypeName::Logical;

    fn cell_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn cell_hash<H: Hasher>(&self, state: &mut H) {
        self.hash(state)
    }

    fn into_column(values: Vec<Option<Self>>) -> ColumnData {
        ColumnData::Logical(values)
    }
}

impl CellValue for i32 {
    const TYPE: ColumnTypeName = ColumnTypeName::Integer;

    fn cell_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn cell_hash<H: Hasher>(&self, state: &mut H) {
        self.hash(state)
    }

    fn into_column(values: Vec<Option<Self>>) -> ColumnData {
        ColumnData::Integer(values)
    }
}

impl CellValue for f64 {
    const TYPE: ColumnTypeName = ColumnTypeName::Real;

    fn cell_eq(&self, other: &Self) -> bool {
        Real::new(*self) == Real::new(*other)
    }

    fn cell_hash<H: Hasher>(&self, state: &mut H) {
        Real::new(*self).hash(state)
    }

    fn into_column(values: Vec<Option<Self>>) -> ColumnData {
        ColumnData::Real(values)
    }
}

impl CellValue for Arc<str> {
    const TYPE: ColumnTypeName = ColumnTypeName::String;

    fn cell_eq(&self, other: &Self) -> bool {
        // interned strings are recognized without looking at their bytes
        Arc::ptr_eq(self, other) || **self == **other
    }

    fn cell_hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state)
    }

    fn into_column(values: Vec<Option<Self>>) -> ColumnData {
        ColumnData::String(values)
    }
}

/// List elements are opaque and only equal to themselves.
impl CellValue for Arc<ColumnData> {
    const TYPE: ColumnTypeName = ColumnTypeName::List;

    fn cell_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }

    fn cell_hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(self), state)
    }

    fn into_column(values: Vec<Option<Self>>) -> ColumnData {
        ColumnData::List(values)
    }
}
