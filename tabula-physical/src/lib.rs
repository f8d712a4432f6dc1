//! This crate defines the physical layer of a columnar table engine:
//! typed column storage, type-dispatched column visitors used to compare,
//! hash and materialize rows, and the dense ranking of string columns
//! on which grouping and ordering are built.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod datatypes;
pub mod error;
pub mod ordering;
pub mod tabular;
pub mod visitors;

#[cfg(test)]
pub(crate) mod test_util;
