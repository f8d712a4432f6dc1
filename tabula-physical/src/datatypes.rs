//! This module defines the physical column types of the engine
//! together with the storage used for their values.

pub(crate) mod column_data;
pub use column_data::{ColumnData, FactorColumn};
pub(crate) mod column_type_name;
pub use column_type_name::{ColumnTypeName, TypeFamily, COLUMN_TYPES, NUM_COLUMN_TYPES};
pub(crate) mod real;
pub use real::Real;
pub(crate) mod string_pool;
pub use string_pool::StringPool;
