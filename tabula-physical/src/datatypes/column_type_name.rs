use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Number of physical column types
pub const NUM_COLUMN_TYPES: usize = 6;

/// Descriptors to refer to the physical type of a column at runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnTypeName {
    /// Boolean values
    Logical,
    /// 32-bit signed integers
    Integer,
    /// 64-bit floating point numbers
    Real,
    /// Strings, stored as shared [`std::sync::Arc<str>`]
    String,
    /// Codes into a shared dictionary of strings
    Factor,
    /// Opaque nested values, compared by identity
    List,
}

/// A list of [ColumnTypeName],
/// in the order they appear in the enum.
pub const COLUMN_TYPES: &[ColumnTypeName; NUM_COLUMN_TYPES] = &[
    ColumnTypeName::Logical,
    ColumnTypeName::Integer,
    ColumnTypeName::Real,
    ColumnTypeName::String,
    ColumnTypeName::Factor,
    ColumnTypeName::List,
];

/// Groups of [ColumnTypeName] whose values can be compared with each other.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TypeFamily {
    /// [ColumnTypeName::Logical]
    Logical,
    /// [ColumnTypeName::Integer] and [ColumnTypeName::Real]
    Numeric,
    /// [ColumnTypeName::String] and [ColumnTypeName::Factor]
    Text,
    /// [ColumnTypeName::List]
    List,
}

impl ColumnTypeName {
    /// Return the [TypeFamily] this type belongs to.
    pub fn family(&self) -> TypeFamily {
        match self {
            ColumnTypeName::Logical => TypeFamily::Logical,
            ColumnTypeName::Integer | ColumnTypeName::Real => TypeFamily::Numeric,
            ColumnTypeName::String | ColumnTypeName::Factor => TypeFamily::Text,
            ColumnTypeName::List => TypeFamily::List,
        }
    }

    /// Returns true iff values of `self` and `other` can be compared for equality.
    pub fn is_compatible(&self, other: ColumnTypeName) -> bool {
        self.family() == other.family()
    }
}

impl Display for ColumnTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnTypeName::Logical => write!(f, "logical"),
            ColumnTypeName::Integer => write!(f, "integer"),
            ColumnTypeName::Real => write!(f, "real"),
            ColumnTypeName::String => write!(f, "string"),
            ColumnTypeName::Factor => write!(f, "factor"),
            ColumnTypeName::List => write!(f, "list"),
        }
    }
}
