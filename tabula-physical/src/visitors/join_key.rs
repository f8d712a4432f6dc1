//! This module defines the keys under which join visitors compare rows,
//! and how each side of a join produces them.

use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::datatypes::{ColumnData, FactorColumn, Real};

use super::vector_visitor::{FactorVisitor, TypedVisitor};

/// Value both sides of a join are converted to before comparing rows.
pub trait JoinKey: Copy + Eq + Hash + Debug {
    /// Build a column from a sequence of keys.
    fn into_column(keys: Vec<Option<Self>>) -> ColumnData;
}

/// One side of a join, viewed as a sequence of keys of type `K`.
pub trait KeySource<K>: Copy + Debug {
    /// Return the key at the given row, or `None` if the value is missing.
    fn key(&self, row: usize) -> Option<K>;
}

impl JoinKey for bool {
    fn into_column(keys: Vec<Option<Self>>) -> ColumnData {
        ColumnData::Logical(keys)
    }
}

impl JoinKey for i32 {
    fn into_column(keys: Vec<Option<Self>>) -> ColumnData {
        ColumnData::Integer(keys)
    }
}

impl JoinKey for Real {
    fn into_column(keys: Vec<Option<Self>>) -> ColumnData {
        ColumnData::Real(keys.into_iter().map(|key| key.map(Real::value)).collect())
    }
}

/// Borrowed string compared by value, with pointer identity as a shortcut.
#[derive(Debug, Clone, Copy)]
pub struct Text<'a>(pub &'a Arc<str>);

impl PartialEq for Text<'_> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self.0, other.0) || **self.0 == **other.0
    }
}

impl Eq for Text<'_> {}

impl Hash for Text<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self.0).hash(state)
    }
}

impl JoinKey for Text<'_> {
    fn into_column(keys: Vec<Option<Self>>) -> ColumnData {
        ColumnData::String(
            keys.into_iter()
                .map(|key| key.map(|Text(value)| value.clone()))
                .collect(),
        )
    }
}

/// Code of a factor whose dictionary is shared by both sides of a join.
#[derive(Debug, Clone, Copy)]
pub struct FactorCode<'a> {
    code: u32,
    levels: &'a Arc<[Arc<str>]>,
}

impl PartialEq for FactorCode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for FactorCode<'_> {}

impl Hash for FactorCode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state)
    }
}

/// If every key is missing, the resulting factor has no levels.
impl JoinKey for FactorCode<'_> {
    fn into_column(keys: Vec<Option<Self>>) -> ColumnData {
        let levels = keys
            .iter()
            .flatten()
            .next()
            .map_or_else(|| Arc::from(Vec::new()), |key| key.levels.clone());

        ColumnData::Factor(FactorColumn::from_parts(
            keys.into_iter().map(|key| key.map(|key| key.code)).collect(),
            levels,
        ))
    }
}

/// Element of a list column, compared by identity.
#[derive(Debug, Clone, Copy)]
pub struct ListCell<'a>(pub &'a Arc<ColumnData>);

impl PartialEq for ListCell<'_> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self.0, other.0)
    }
}

impl Eq for ListCell<'_> {}

impl Hash for ListCell<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(self.0), state)
    }
}

impl JoinKey for ListCell<'_> {
    fn into_column(keys: Vec<Option<Self>>) -> ColumnData {
        ColumnData::List(
            keys.into_iter()
                .map(|key| key.map(|ListCell(value)| value.clone()))
                .collect(),
        )
    }
}

impl KeySource<bool> for TypedVisitor<'_, bool> {
    fn key(&self, row: usize) -> Option<bool> {
        self.values()[row]
    }
}

impl KeySource<i32> for TypedVisitor<'_, i32> {
    fn key(&self, row: usize) -> Option<i32> {
        self.values()[row]
    }
}

impl KeySource<Real> for TypedVisitor<'_, i32> {
    fn key(&self, row: usize) -> Option<Real> {
        self.values()[row].map(Real::from)
    }
}

impl KeySource<Real> for TypedVisitor<'_, f64> {
    fn key(&self, row: usize) -> Option<Real> {
        self.values()[row].map(Real::from)
    }
}

impl<'a> KeySource<Text<'a>> for TypedVisitor<'a, Arc<str>> {
    fn key(&self, row: usize) -> Option<Text<'a>> {
        self.values()[row].as_ref().map(Text)
    }
}

impl<'a> KeySource<Text<'a>> for FactorVisitor<'a> {
    fn key(&self, row: usize) -> Option<Text<'a>> {
        self.decode(row).map(Text)
    }
}

impl<'a> KeySource<FactorCode<'a>> for FactorVisitor<'a> {
    fn key(&self, row: usize) -> Option<FactorCode<'a>> {
        let factor = self.factor();
        factor.codes()[row].map(|code| FactorCode {
            code,
            levels: factor.levels(),
        })
    }
}

impl<'a> KeySource<ListCell<'a>> for TypedVisitor<'a, Arc<ColumnData>> {
    fn key(&self, row: usize) -> Option<ListCell<'a>> {
        self.values()[row].as_ref().map(ListCell)
    }
}
