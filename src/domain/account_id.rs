//! Opaque principal identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque 32-byte principal: pool creators and fee recipients.
///
/// The engine never authenticates principals — identity and authorization
/// live outside the core. All 32-byte sequences are valid, so construction
/// is infallible.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero principal, useful as a placeholder in tests.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First eight bytes in hex identify a principal well enough for logs.
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 32];
        assert_eq!(AccountId::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(AccountId::zero().as_bytes(), [0u8; 32]);
    }

    #[test]
    fn display_is_prefixed_hex() {
        let id = AccountId::from_bytes([0xab; 32]);
        let shown = format!("{id}");
        assert!(shown.starts_with("abababab"));
    }

    #[test]
    fn inequality_on_different_bytes() {
        assert_ne!(AccountId::from_bytes([1; 32]), AccountId::from_bytes([2; 32]));
    }
}
