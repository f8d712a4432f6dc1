//! This module defines the table container and the borrowed column handles
//! that visitors are built from.

pub(crate) mod column;
pub use column::Column;
pub(crate) mod data_frame;
pub use data_frame::DataFrame;
