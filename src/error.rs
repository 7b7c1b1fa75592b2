//! Unified error types for the reef AMM engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every pre-condition failure aborts the operation before any
//! state change; the core recovers from nothing — the host layer decides
//! whether to retry or surface.
//!
//! # Error Code Ranges
//!
//! | Range | Category | Description |
//! |-------|----------|-------------|
//! | 1000–1999 | Validation | Invalid inputs or parameters |
//! | 2000–2999 | State | Pool/position/registry state violations |
//! | 3000–3999 | Protection | Slippage, price impact, deadline guards |
//!
//! Arithmetic overflow is not an error kind: all AMM products widen to
//! `u128` at the documented spots, and any overflow outside them is a
//! programming error treated as fatal.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

// ---------------------------------------------------------------------------
// AmmError
// ---------------------------------------------------------------------------

/// Unified error enum for the reef AMM engine.
///
/// Variants are grouped by numeric error-code ranges so that callers can
/// pattern-match on categories or inspect individual codes for logging.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    // ----- 1000–1999: Validation errors ------------------------------------
    /// A pool fee is outside the valid range for its curve (code 1000).
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A constant-product fee does not match a recognized tier (code 1001).
    #[error("invalid fee tier: {0}")]
    InvalidFeeTier(u64),

    /// A stable-swap amplification coefficient is out of range (code 1002).
    #[error("invalid amplification coefficient: {0}")]
    InvalidAmp(u64),

    /// A liquidity deposit deviates from the pool ratio beyond the accepted
    /// tolerance (code 1003).
    #[error("deposit ratio outside tolerance")]
    InvalidRatio,

    /// A slippage tolerance exceeds the maximum accepted value (code 1004).
    #[error("slippage tolerance too large: {0}bp")]
    InvalidSlippageTolerance(u64),

    /// A swap was requested with a zero input amount (code 1005).
    #[error("swap input amount is zero")]
    ZeroAmountIn,

    /// An operation would mint or manipulate zero shares (code 1006).
    #[error("zero shares: {0}")]
    ZeroShares(&'static str),

    /// A token pair uses the same token on both sides (code 1007).
    #[error("token pair requires two distinct tokens")]
    InvalidTokenPair,

    // ----- 2000–2999: State errors -----------------------------------------
    /// Pool creation is paused (code 2000).
    #[error("pool creation is paused")]
    Paused,

    /// The pool holds no liquidity for the requested operation (code 2001).
    #[error("pool has no liquidity")]
    ZeroLiquidity,

    /// Reserves or shares cannot satisfy the operation (code 2002).
    #[error("insufficient liquidity: {0}")]
    InsufficientLiquidity(&'static str),

    /// More shares were requested than the position holds (code 2003).
    #[error("insufficient shares")]
    InsufficientShares,

    /// Initial liquidity was already provided to this pool (code 2004).
    #[error("pool is already seeded")]
    PoolAlreadySeeded,

    /// A position is bound to a different pool (code 2005).
    #[error("position does not belong to this pool")]
    PoolMismatch,

    /// A pool with the same canonical pair and fee tier exists (code 2006).
    #[error("pool already exists for this pair and fee tier")]
    PoolAlreadyExists,

    /// No pool is registered under the requested pair and fee tier
    /// (code 2007).
    #[error("pool not found")]
    PoolNotFound,

    /// Nothing is claimable for the position (code 2008).
    ///
    /// The core itself reports an empty claim as `(0, 0)`; this kind is
    /// part of the wire contract for host policies layered above it.
    #[error("no fees to claim")]
    NoFeesToClaim,

    // ----- 3000–3999: Protection errors ------------------------------------
    /// The executed output fell below the caller's minimum (code 3000).
    #[error("slippage exceeded: got {actual}, minimum {minimum}")]
    SlippageExceeded {
        /// Amount the trade actually produced.
        actual: u64,
        /// Caller-supplied lower bound.
        minimum: u64,
    },

    /// The quoted price impact exceeds the configured ceiling (code 3001).
    #[error("price impact too high: {actual_bps}bp > {max_bps}bp")]
    PriceImpactTooHigh {
        /// Quoted impact in basis points.
        actual_bps: u64,
        /// Configured ceiling in basis points.
        max_bps: u64,
    },

    /// The operation arrived after its deadline (code 3002).
    #[error("deadline expired")]
    DeadlineExpired,
}

impl AmmError {
    /// Returns the numeric error code for this variant.
    ///
    /// Codes are organized into ranges:
    /// - 1000–1999 for validation errors
    /// - 2000–2999 for state errors
    /// - 3000–3999 for protection errors
    #[must_use]
    pub const fn error_code(&self) -> u16 {
        match self {
            // Validation (1000–1999)
            Self::InvalidFee(_) => 1000,
            Self::InvalidFeeTier(_) => 1001,
            Self::InvalidAmp(_) => 1002,
            Self::InvalidRatio => 1003,
            Self::InvalidSlippageTolerance(_) => 1004,
            Self::ZeroAmountIn => 1005,
            Self::ZeroShares(_) => 1006,
            Self::InvalidTokenPair => 1007,

            // State (2000–2999)
            Self::Paused => 2000,
            Self::ZeroLiquidity => 2001,
            Self::InsufficientLiquidity(_) => 2002,
            Self::InsufficientShares => 2003,
            Self::PoolAlreadySeeded => 2004,
            Self::PoolMismatch => 2005,
            Self::PoolAlreadyExists => 2006,
            Self::PoolNotFound => 2007,
            Self::NoFeesToClaim => 2008,

            // Protection (3000–3999)
            Self::SlippageExceeded { .. } => 3000,
            Self::PriceImpactTooHigh { .. } => 3001,
            Self::DeadlineExpired => 3002,
        }
    }

    /// Returns `true` if this is a validation error (1000–1999).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        self.error_code() >= 1000 && self.error_code() < 2000
    }

    /// Returns `true` if this is a state error (2000–2999).
    #[must_use]
    pub const fn is_state(&self) -> bool {
        self.error_code() >= 2000 && self.error_code() < 3000
    }

    /// Returns `true` if this is a protection error (3000–3999).
    #[must_use]
    pub const fn is_protection(&self) -> bool {
        self.error_code() >= 3000 && self.error_code() < 4000
    }
}
