//! Opaque, totally-ordered token identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An opaque token-type identifier with a total order.
///
/// Wraps a fixed 16-byte, zero-padded symbol. The identity relation and the
/// lexicographic byte order are the only properties the engine relies on;
/// because the padding byte sorts below every symbol byte, the byte order of
/// two padded symbols equals the lexicographic order of the symbols
/// themselves.
///
/// # Examples
///
/// ```
/// use reef_amm::domain::TokenId;
///
/// let usdc = TokenId::from_symbol("USDC");
/// let eth = TokenId::from_symbol("ETH");
/// assert!(eth < usdc);
/// assert_eq!(usdc.symbol(), "USDC");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct TokenId([u8; 16]);

impl TokenId {
    /// Creates a `TokenId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a `TokenId` from a UTF-8 symbol, zero-padded on the right.
    ///
    /// Symbols longer than 16 bytes are truncated; the engine never
    /// interprets the content beyond identity and order.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        let mut bytes = [0u8; 16];
        let src = symbol.as_bytes();
        let len = src.len().min(16);
        bytes[..len].copy_from_slice(&src[..len]);
        Self(bytes)
    }

    /// Returns the underlying 16-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 16] {
        self.0
    }

    /// Returns the symbol with trailing padding stripped, lossily decoded.
    #[must_use]
    pub fn symbol(&self) -> String {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(16);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
