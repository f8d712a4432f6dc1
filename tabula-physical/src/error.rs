//! Error-handling module for the crate

use std::fmt::Display;

use thiserror::Error;

use crate::datatypes::ColumnTypeName;

/// Side of a join on which a key column is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinSide {
    /// The left-hand table
    Left,
    /// The right-hand table
    Right,
}

impl Display for JoinSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinSide::Left => write!(f, "lhs"),
            JoinSide::Right => write!(f, "rhs"),
        }
    }
}

/// Error-Collection for all the possible Errors occurring in this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A requested column does not exist in the table
    #[error("column `{0}` is unknown")]
    UnknownColumn(String),
    /// A join key could not be resolved on one side of the join
    #[error("`{name}` column not found in {side}, cannot join")]
    JoinKeyMissing {
        /// Name of the missing key column
        name: String,
        /// Side from which the column is missing
        side: JoinSide,
    },
    /// Lookup of a join visitor by (left) key name failed
    #[error("visitor not found for name `{0}`")]
    VisitorNotFound(String),
    /// The left and right join key lists differ in length
    #[error("join needs the same number of keys on both sides, got {left} on lhs and {right} on rhs")]
    JoinKeyCountMismatch {
        /// Number of left keys
        left: usize,
        /// Number of right keys
        right: usize,
    },
    /// A column's length differs from the row count of its table
    #[error("column `{name}` has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        /// Name of the offending column
        name: String,
        /// Row count of the table
        expected: usize,
        /// Length of the column
        found: usize,
    },
    /// The number of names does not match the number of columns
    #[error("got {names} names for {columns} columns")]
    NameCountMismatch {
        /// Number of names supplied
        names: usize,
        /// Number of columns
        columns: usize,
    },
    /// A row index exceeds the row count of the table
    #[error("row index {index} is out of bounds for a table with {nrows} rows")]
    IndexOutOfBounds {
        /// The offending index
        index: usize,
        /// Row count of the table
        nrows: usize,
    },
    /// A logical mask does not cover exactly the rows of the table
    #[error("logical mask has length {mask}, but the table has {nrows} rows")]
    MaskLengthMismatch {
        /// Length of the mask
        mask: usize,
        /// Row count of the table
        nrows: usize,
    },
    /// A factor code does not refer to an entry of its dictionary
    #[error("factor code {code} exceeds the {levels} levels of the dictionary")]
    FactorCodeOutOfRange {
        /// The offending code
        code: u32,
        /// Number of levels in the dictionary
        levels: usize,
    },
    /// A factor dictionary lists the same string more than once
    #[error("factor level `{0}` appears more than once in the dictionary")]
    DuplicateFactorLevel(String),
    /// The canonical sort dropped one of the values handed to it
    #[error("collation did not return the value `{0}` it was asked to sort")]
    IncompleteCollation(String),
}

/// Non-fatal diagnostic raised when a pair of join keys spans
/// incompatible type families. Rows of such a pair never match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("joining `{name_left}` ({type_left}) with `{name_right}` ({type_right}): incompatible types, rows will never match")]
pub struct TypeMismatch {
    /// Name of the left key column
    pub name_left: String,
    /// Name of the right key column
    pub name_right: String,
    /// Physical type of the left key column
    pub type_left: ColumnTypeName,
    /// Physical type of the right key column
    pub type_right: ColumnTypeName,
}
