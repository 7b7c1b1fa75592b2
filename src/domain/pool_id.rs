//! Opaque pool identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque, immutable pool identifier.
///
/// Assigned once by the factory at creation and never reused. The 128-bit
/// width leaves room for hosts that derive ids from hashes instead of
/// counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(u128);

impl PoolId {
    /// Creates a `PoolId` from a raw value.
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

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool-{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(PoolId::new(7).get(), 7);
    }

    #[test]
    fn ordering_follows_value() {
        assert!(PoolId::new(1) < PoolId::new(2));
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", PoolId::new(255)), "pool-0xff");
    }
}
