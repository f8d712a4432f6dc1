//! Helpers shared by the unit tests of this crate.

use std::sync::Arc;

use crate::{datatypes::ColumnData, tabular::DataFrame};

/// Build a [DataFrame] from columns known to have equal length.
pub(crate) fn frame(columns: Vec<(&str, ColumnData)>) -> DataFrame {
    DataFrame::new(columns).expect("test columns have equal length")
}

/// Build the values of a string column without missing values.
pub(crate) fn strings(values: &[&str]) -> Vec<Option<Arc<str>>> {
    values.iter().map(|value| Some(Arc::from(*value))).collect()
}
