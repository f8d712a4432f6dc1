//! This module defines a wrapper type [Real] for [f64] that can be hashed and compared for equality.

use std::hash::{Hash, Hasher};

/// Wrapper for [f64] with total equality.
///
/// All NaN payloads are equal to each other and `0.0` equals `-0.0`,
/// so that [Hash] agrees with [Eq].
#[derive(Copy, Clone, Debug, Default)]
pub struct Real(f64);

impl Real {
    /// Bit pattern used to hash every NaN value.
    const CANONICAL_NAN: u64 = 0x7ff8_0000_0000_0000;

    /// Wraps the given [f64]-`value`.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the wrapped [f64].
    pub fn value(self) -> f64 {
        self.0
    }

    fn canonical_bits(self) -> u64 {
        if self.0.is_nan() {
            Self::CANONICAL_NAN
        } else if self.0 == 0.0 {
            0
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 || (self.0.is_nan() && other.0.is_nan())
    }
}

impl Eq for Real {}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i32> for Real {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}
