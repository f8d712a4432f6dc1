//! This module defines the dense ranking of string columns
//! and the collations it is parameterized with.

pub(crate) mod character_orderer;
pub use character_orderer::{get_uniques, CharacterVectorOrderer};
pub(crate) mod collation;
pub use collation::{CaseInsensitive, Collation, Lexicographic};
