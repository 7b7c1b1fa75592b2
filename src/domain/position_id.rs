//! Opaque LP position identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque, immutable position identifier, assigned at mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionId(u128);

impl PositionId {
    /// Creates a `PositionId` from a raw value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position-{:#x}", self.0)
    }
}
