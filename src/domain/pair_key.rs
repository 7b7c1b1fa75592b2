//! Canonical registry key for a token pair and fee tier.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::TokenId;
use crate::error::AmmError;

/// The canonical `(token_lo, token_hi, fee_bps)` registry key.
///
/// The constructor sorts the two token ids, so `(A, B)` and `(B, A)`
/// produce the same key and the caller never needs to care about order.
/// The fee tier is part of the key: multiple tiers over the same pair
/// coexist as distinct pools.
///
/// # Examples
///
/// ```
/// use reef_amm::domain::{PairKey, TokenId};
///
/// let usdc = TokenId::from_symbol("USDC");
/// let eth = TokenId::from_symbol("ETH");
/// let k1 = PairKey::new(usdc, eth, 30).expect("distinct tokens");
/// let k2 = PairKey::new(eth, usdc, 30).expect("distinct tokens");
/// assert_eq!(k1, k2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    token_lo: TokenId,
    token_hi: TokenId,
    fee_bps: u64,
}

impl PairKey {
    /// Creates a canonically-ordered `PairKey`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTokenPair`] if both sides are the same
    /// token.
    pub fn new(token_a: TokenId, token_b: TokenId, fee_bps: u64) -> crate::error::Result<Self> {
        if token_a == token_b {
            return Err(AmmError::InvalidTokenPair);
        }
        let (token_lo, token_hi) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Ok(Self {
            token_lo,
            token_hi,
            fee_bps,
        })
    }

    /// Returns the lower-ordered token of the pair.
    #[must_use]
    pub const fn token_lo(&self) -> TokenId {
        self.token_lo
    }

    /// Returns the higher-ordered token of the pair.
    #[must_use]
    pub const fn token_hi(&self) -> TokenId {
        self.token_hi
    }

    /// Returns the fee tier component of the key.
    #[must_use]
    pub const fn fee_bps(&self) -> u64 {
        self.fee_bps
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}bp", self.token_lo, self.token_hi, self.fee_bps)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tok(s: &str) -> TokenId {
        TokenId::from_symbol(s)
    }

    #[test]
    fn order_independent_construction() {
        let Ok(ab) = PairKey::new(tok("USDC"), tok("ETH"), 30) else {
            panic!("expected Ok");
        };
        let Ok(ba) = PairKey::new(tok("ETH"), tok("USDC"), 30) else {
            panic!("expected Ok");
        };
        assert_eq!(ab, ba);
        assert_eq!(ab.token_lo(), tok("ETH"));
        assert_eq!(ab.token_hi(), tok("USDC"));
    }

    #[test]
    fn identical_tokens_rejected() {
        let result = PairKey::new(tok("ETH"), tok("ETH"), 30);
        assert_eq!(result, Err(AmmError::InvalidTokenPair));
    }

    #[test]
    fn fee_tier_distinguishes_keys() {
        let Ok(k30) = PairKey::new(tok("USDC"), tok("ETH"), 30) else {
            panic!("expected Ok");
        };
        let Ok(k5) = PairKey::new(tok("USDC"), tok("ETH"), 5) else {
            panic!("expected Ok");
        };
        assert_ne!(k30, k5);
        assert_eq!(k5.fee_bps(), 5);
    }

    #[test]
    fn display_is_canonical() {
        let Ok(key) = PairKey::new(tok("USDC"), tok("ETH"), 30) else {
            panic!("expected Ok");
        };
        assert_eq!(format!("{key}"), "ETH/USDC@30bp");
    }
}
