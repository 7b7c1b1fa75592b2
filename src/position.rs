//! Transferable LP position object.
//!
//! An [`LpPosition`] is an owned claim on one pool: a share count, the
//! fee-index values already credited to the holder, lifetime claim
//! counters, and the deposit basis used by the impermanent-loss display.
//! Positions are created only by [`LpPosition::mint`], mutated only through
//! the restricted mutators here, and destroyed only by
//! [`LpPosition::burn`]. Ownership transfer is an out-of-band move of the
//! value — the engine does not model identity.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::BPS_DENOMINATOR;
use crate::domain::{PoolId, PositionId};
use crate::error::{AmmError, Result};
use crate::math::mul_div;

/// An owned liquidity-provider position bound to a single pool.
///
/// # Fee cursors
///
/// `last_fee_index_a` / `last_fee_index_b` record the pool's per-share fee
/// accumulators at the last credit. Claimable fees are
/// `(index − last) · shares / 10 000`; the deltas are non-negative because
/// pool indices are monotone. The cursor advances only on mint and claim.
///
/// # Examples
///
/// ```
/// use reef_amm::domain::{PoolId, PositionId};
/// use reef_amm::position::LpPosition;
///
/// let pos = LpPosition::mint(
///     PositionId::new(1),
///     PoolId::new(1),
///     999_000,
///     0,
///     0,
///     1_000_000,
///     1_000_000,
///     42,
/// )
/// .expect("non-zero shares");
/// assert_eq!(pos.shares(), 999_000);
/// assert_eq!(pos.calculate_pending_fees(0, 0), (0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpPosition {
    id: PositionId,
    pool_id: PoolId,
    shares: u64,
    last_fee_index_a: u64,
    last_fee_index_b: u64,
    claimed_fees_a: u64,
    claimed_fees_b: u64,
    initial_amount_a: u64,
    initial_amount_b: u64,
    created_at: u64,
    name: String,
}

impl LpPosition {
    /// Mints a new position over `shares` pool shares.
    ///
    /// The fee cursors start at the pool's current indices so that no fee
    /// accrued before the mint is claimable by this position.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroShares`] if `shares` is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn mint(
        id: PositionId,
        pool_id: PoolId,
        shares: u64,
        fee_index_a: u64,
        fee_index_b: u64,
        amount_a: u64,
        amount_b: u64,
        created_at: u64,
    ) -> Result<Self> {
        if shares == 0 {
            return Err(AmmError::ZeroShares("cannot mint an empty position"));
        }
        Ok(Self {
            id,
            pool_id,
            shares,
            last_fee_index_a: fee_index_a,
            last_fee_index_b: fee_index_b,
            claimed_fees_a: 0,
            claimed_fees_b: 0,
            initial_amount_a: amount_a,
            initial_amount_b: amount_b,
            created_at,
            name: String::new(),
        })
    }

    /// Destroys the position, returning `(id, pool_id, final_shares)`.
    ///
    /// Remaining shares are reported, not redeemed — callers drain the
    /// position through the pool first.
    #[must_use]
    pub fn burn(self) -> (PositionId, PoolId, u64) {
        (self.id, self.pool_id, self.shares)
    }

    // -- accessors -----------------------------------------------------------

    /// Returns the position identifier.
    #[must_use]
    pub const fn id(&self) -> PositionId {
        self.id
    }

    /// Returns the pool this position is bound to.
    #[must_use]
    pub const fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    /// Returns the share count.
    #[must_use]
    pub const fn shares(&self) -> u64 {
        self.shares
    }

    /// Returns both fee cursors as `(last_index_a, last_index_b)`.
    #[must_use]
    pub const fn fee_cursors(&self) -> (u64, u64) {
        (self.last_fee_index_a, self.last_fee_index_b)
    }

    /// Returns lifetime claimed fees as `(claimed_a, claimed_b)`.
    ///
    /// Display counters only; no invariant depends on them.
    #[must_use]
    pub const fn claimed_fees(&self) -> (u64, u64) {
        (self.claimed_fees_a, self.claimed_fees_b)
    }

    /// Returns the accumulated deposit basis as `(initial_a, initial_b)`.
    #[must_use]
    pub const fn initial_amounts(&self) -> (u64, u64) {
        (self.initial_amount_a, self.initial_amount_b)
    }

    /// Returns the creation epoch recorded at mint.
    #[must_use]
    pub const fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Returns the user label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // -- restricted mutators --------------------------------------------------

    /// Credits `delta` additional shares to the position.
    pub fn add_shares(&mut self, delta: u64) {
        self.shares += delta;
    }

    /// Removes `delta` shares from the position.
    ///
    /// A position may transiently reach zero shares; it is then only good
    /// for [`burn`](Self::burn).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `delta > shares`.
    pub fn reduce_shares(&mut self, delta: u64) -> Result<()> {
        if delta > self.shares {
            return Err(AmmError::InsufficientShares);
        }
        self.shares -= delta;
        Ok(())
    }

    /// Advances the fee cursors and adds to the lifetime claim counters.
    ///
    /// Called on claim with the pool indices that were just read; the two
    /// deltas are the amounts credited by that claim.
    pub fn update_metadata(
        &mut self,
        new_fee_index_a: u64,
        new_fee_index_b: u64,
        delta_claimed_a: u64,
        delta_claimed_b: u64,
    ) {
        self.last_fee_index_a = new_fee_index_a;
        self.last_fee_index_b = new_fee_index_b;
        self.claimed_fees_a += delta_claimed_a;
        self.claimed_fees_b += delta_claimed_b;
    }

    /// Adds to the deposit basis. Each liquidity addition to this position
    /// (including auto-compounded fees) accumulates here.
    pub fn update_initial_amounts(&mut self, delta_a: u64, delta_b: u64) {
        self.initial_amount_a += delta_a;
        self.initial_amount_b += delta_b;
    }

    /// Replaces the user label.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // -- derived views ---------------------------------------------------------

    /// Current redemption value of the position against the given pool
    /// state: `(shares · reserve / total_shares)` per token, truncating.
    ///
    /// Returns `(0, 0)` when `total_shares` is zero.
    #[must_use]
    pub fn calculate_position_value(
        &self,
        reserve_a: u64,
        reserve_b: u64,
        total_shares: u64,
    ) -> (u64, u64) {
        if total_shares == 0 {
            return (0, 0);
        }
        (
            mul_div(self.shares, reserve_a, total_shares),
            mul_div(self.shares, reserve_b, total_shares),
        )
    }

    /// Fees claimable against the given pool indices:
    /// `(index − last) · shares / 10 000` per token.
    ///
    /// The index deltas are non-negative because pool fee indices are
    /// monotone and the cursor only ever advances to an observed index.
    #[must_use]
    pub fn calculate_pending_fees(&self, fee_index_a: u64, fee_index_b: u64) -> (u64, u64) {
        let pending_a = mul_div(fee_index_a - self.last_fee_index_a, self.shares, BPS_DENOMINATOR);
        let pending_b = mul_div(fee_index_b - self.last_fee_index_b, self.shares, BPS_DENOMINATOR);
        (pending_a, pending_b)
    }

    /// Impermanent gain/loss of the position in basis points, as
    /// `(magnitude_bps, is_loss)`.
    ///
    /// Compares the bare sums `value_a + value_b` against
    /// `initial_a + initial_b`. This is a display measure that ignores the
    /// relative price of the two tokens; an empty basis yields `(0, false)`.
    #[must_use]
    pub fn calculate_impermanent_loss(&self, value_a: u64, value_b: u64) -> (u64, bool) {
        let hodl = u128::from(self.initial_amount_a) + u128::from(self.initial_amount_b);
        if hodl == 0 {
            return (0, false);
        }
        let lp = u128::from(value_a) + u128::from(value_b);
        if lp >= hodl {
            let gain = ((lp - hodl) * u128::from(BPS_DENOMINATOR) / hodl) as u64;
            (gain, false)
        } else {
            let loss = ((hodl - lp) * u128::from(BPS_DENOMINATOR) / hodl) as u64;
            (loss, true)
        }
    }
}

impl fmt::Display for LpPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} ({} shares)",
            self.id, self.pool_id, self.shares
        )
    }
}
