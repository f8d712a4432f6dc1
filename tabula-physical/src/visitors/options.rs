use serde::{Deserialize, Serialize};

/// Parameters controlling how join visitors are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    /// Whether a key pair of incompatible types is reported as a warning.
    pub warn: bool,
    /// Whether two missing values match each other.
    pub na_match: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            warn: true,
            na_match: true,
        }
    }
}

impl JoinOptions {
    /// Return a copy of these options with the given `warn` setting.
    pub fn with_warn(mut self, warn: bool) -> Self {
        self.warn = warn;
        self
    }

    /// Return a copy of these options with the given `na_match` setting.
    pub fn with_na_match(mut self, na_match: bool) -> Self {
        self.na_match = na_match;
        self
    }
}
