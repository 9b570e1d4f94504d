use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A custom item identifier, either minted by the engine or entered by a
/// user.
///
/// The value carries no shape invariants of its own: shape conformance is
/// defined by the owning inventory's [`IdFormat`](crate::template::IdFormat),
/// and uniqueness by the storage layer's unique (inventory, identifier)
/// index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomId(String);

impl CustomId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for CustomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
