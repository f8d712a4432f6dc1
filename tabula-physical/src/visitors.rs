//! This module defines the column visitors: objects bound to one column
//! (or to a pair of columns) that compare, hash and materialize rows
//! without their caller knowing the physical type of the column.

use std::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;
use once_cell::sync::Lazy;

pub(crate) mod cell;
pub use cell::CellValue;
pub(crate) mod data_frame_join_visitors;
pub use data_frame_join_visitors::DataFrameJoinVisitors;
pub(crate) mod data_frame_subset_visitors;
pub use data_frame_subset_visitors::DataFrameSubsetVisitors;
pub(crate) mod data_frame_visitors;
pub use data_frame_visitors::DataFrameVisitors;
pub(crate) mod join_key;
pub use join_key::{FactorCode, JoinKey, KeySource, ListCell, Text};
pub(crate) mod join_visitor;
pub use join_visitor::{
    join_visitor, type_mismatch, JoinRow, JoinVisitor, JoinVisitorEnum, MismatchJoinVisitor,
    TypedJoinVisitor,
};
pub(crate) mod options;
pub use options::JoinOptions;
pub(crate) mod subset_visitor;
pub use subset_visitor::SubsetVectorVisitor;
pub(crate) mod vector_visitor;
pub use vector_visitor::{visitor, ColumnVisitor, FactorVisitor, TypedVisitor, VectorVisitor};

/// Hash builder shared by all visitors, so that hashes of equal values agree
/// between visitors of the same process.
static HASH_BUILDER: Lazy<DefaultHashBuilder> = Lazy::new(DefaultHashBuilder::default);

/// Hash reported for missing values.
pub(crate) const NA_HASH: u64 = 0x9e37_79b9_7f4a_7c15;

/// Hash `value` with the shared hash builder.
pub(crate) fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
    HASH_BUILDER.hash_one(value)
}

/// Mix the hash of another column into the hash of a row.
pub(crate) fn hash_combine(seed: u64, hash: u64) -> u64 {
    seed ^ hash
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}
