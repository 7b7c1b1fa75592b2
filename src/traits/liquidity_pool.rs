//! Share management trait extending [`SwapPool`].

use super::SwapPool;
use crate::error::Result;

/// Trait for pools that mint and burn proportional shares.
///
/// # Share Accounting Invariants
///
/// - `total_shares` changes only through
///   [`provide_initial_liquidity`](Self::provide_initial_liquidity),
///   [`add_liquidity`](Self::add_liquidity), and
///   [`remove_liquidity`](Self::remove_liquidity).
/// - Once seeded, `total_shares ≥ MINIMUM_LIQUIDITY` until the pool is
///   fully drained; the locked minimum is never assigned to any position.
/// - `fee_index_a` / `fee_index_b` are monotone and written only by swap
///   fee accrual.
pub trait LiquidityPool: SwapPool {
    /// Returns the outstanding share total, locked minimum included.
    fn total_shares(&self) -> u64;

    /// Returns the per-share fee accumulators as `(index_a, index_b)`,
    /// scaled by `BPS_DENOMINATOR`.
    fn fee_indices(&self) -> (u64, u64);

    /// Returns the undrained protocol fee buckets as `(fees_a, fees_b)`.
    fn protocol_fees(&self) -> (u64, u64);

    /// Seeds an empty pool and returns the shares assigned to the seeder
    /// (total minted minus the locked minimum).
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolAlreadySeeded`](crate::error::AmmError::PoolAlreadySeeded)
    ///   if the pool holds shares.
    /// - [`AmmError::ZeroLiquidity`](crate::error::AmmError::ZeroLiquidity)
    ///   on zero amounts.
    /// - [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    ///   if the seed does not exceed the locked minimum.
    fn provide_initial_liquidity(&mut self, amount_a: u64, amount_b: u64) -> Result<u64>;

    /// Deposits into a seeded pool, returning the shares minted.
    ///
    /// The curve decides how the deposit is priced: constant-product pools
    /// check the deposit against the reserve ratio within `tolerance_bps`;
    /// stable-swap pools price on the reserve sum and ignore the tolerance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroLiquidity`](crate::error::AmmError::ZeroLiquidity)
    ///   on an empty pool or an empty deposit.
    /// - [`AmmError::InvalidRatio`](crate::error::AmmError::InvalidRatio)
    ///   when a ratio-checked deposit deviates beyond tolerance.
    /// - [`AmmError::ZeroShares`](crate::error::AmmError::ZeroShares) when
    ///   the deposit is too small to mint anything.
    fn add_liquidity(&mut self, amount_a: u64, amount_b: u64, tolerance_bps: u64) -> Result<u64>;

    /// Quotes [`remove_liquidity`](Self::remove_liquidity) without
    /// executing it. Used for pre-trade minimum-output checks.
    ///
    /// # Errors
    ///
    /// Same as [`remove_liquidity`](Self::remove_liquidity).
    fn preview_remove_liquidity(&self, shares: u64) -> Result<(u64, u64)>;

    /// Burns `shares` and returns the pro-rata `(amount_a, amount_b)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroShares`](crate::error::AmmError::ZeroShares) for a
    ///   zero burn.
    /// - [`AmmError::InsufficientShares`](crate::error::AmmError::InsufficientShares)
    ///   beyond the outstanding total.
    /// - [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    ///   if the burn would strand fewer than `MINIMUM_LIQUIDITY` shares
    ///   (removing every share remains legal).
    fn remove_liquidity(&mut self, shares: u64) -> Result<(u64, u64)>;

    /// Drains both protocol fee buckets, returning `(fees_a, fees_b)`.
    ///
    /// Balance custody is the host's responsibility; the engine only zeroes
    /// the accrual counters.
    fn withdraw_protocol_fees(&mut self) -> (u64, u64);
}
