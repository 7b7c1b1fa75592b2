//! Constant-product pool (`x · y = k`).
//!
//! Fees are deducted from the input amount **before** the pricing formula
//! is applied, and the full input (fee included) lands in the reserve, so
//! the invariant product never decreases across a swap.
//!
//! # Swap Algorithm (token A → token B)
//!
//! 1. `fee = amount_in · fee_bps / 10 000`
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = reserve_b · net_input / (reserve_a + net_input)`
//! 4. `reserve_a += amount_in`, `reserve_b −= amount_out`
//! 5. fee accrual: 10% of the fee to the protocol bucket, the remainder
//!    into `fee_index_a` per outstanding share
//!
//! # Share Pricing
//!
//! The seeding deposit mints `√(a · b)` shares, of which
//! `MINIMUM_LIQUIDITY` stay locked forever. Subsequent deposits mint
//! `min(Δa · S / Ra, Δb · S / Rb)` after a ratio check.

use serde::{Deserialize, Serialize};

use crate::constants::{BPS_DENOMINATOR, CP_MAX_FEE_BPS, MINIMUM_LIQUIDITY, PROTOCOL_FEE_BPS};
use crate::domain::PoolId;
use crate::error::{AmmError, Result};
use crate::math::{bps_of, geometric_mean, mul_div, mul_wide};
use crate::traits::{LiquidityPool, SwapPool};

/// A constant-product AMM pool.
///
/// # State
///
/// - `reserve_a` / `reserve_b` — current reserves, fees included
/// - `total_shares` — outstanding LP shares, locked minimum included
/// - `fee_index_a` / `fee_index_b` — monotone per-share fee accumulators,
///   scaled by `BPS_DENOMINATOR`
/// - `protocol_fees_a` / `protocol_fees_b` — undrained protocol accrual
/// - `cumulative_volume_a` / `cumulative_volume_b` — lifetime input volume
/// - `k_last` — reserve product cached at the last balancing event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductPool {
    id: PoolId,
    fee_bps: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
    fee_index_a: u64,
    fee_index_b: u64,
    protocol_fees_a: u64,
    protocol_fees_b: u64,
    cumulative_volume_a: u64,
    cumulative_volume_b: u64,
    k_last: u128,
}

impl ConstantProductPool {
    /// Creates an empty pool with the given fee.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `fee_bps` exceeds
    /// [`CP_MAX_FEE_BPS`].
    pub fn new(id: PoolId, fee_bps: u64) -> Result<Self> {
        if fee_bps > CP_MAX_FEE_BPS {
            return Err(AmmError::InvalidFee(
                "constant-product fee must not exceed 1000bp",
            ));
        }
        Ok(Self {
            id,
            fee_bps,
            reserve_a: 0,
            reserve_b: 0,
            total_shares: 0,
            fee_index_a: 0,
            fee_index_b: 0,
            protocol_fees_a: 0,
            protocol_fees_b: 0,
            cumulative_volume_a: 0,
            cumulative_volume_b: 0,
            k_last: 0,
        })
    }

    /// Returns the cached reserve product from the last balancing event.
    #[must_use]
    pub const fn k_last(&self) -> u128 {
        self.k_last
    }

    /// Splits a swap fee between the protocol bucket and the per-share
    /// index on the side the fee was taken.
    ///
    /// This is the only place the fee indices change. With no outstanding
    /// shares the whole fee flows to the protocol bucket (unreachable after
    /// seeding; kept for the transient empty pool).
    fn accrue_fees(&mut self, fee_a: u64, fee_b: u64) {
        if self.total_shares == 0 {
            self.protocol_fees_a += fee_a;
            self.protocol_fees_b += fee_b;
            return;
        }
        if fee_a > 0 {
            let proto = bps_of(fee_a, PROTOCOL_FEE_BPS);
            let lp = fee_a - proto;
            self.protocol_fees_a += proto;
            self.fee_index_a += mul_div(lp, BPS_DENOMINATOR, self.total_shares);
        }
        if fee_b > 0 {
            let proto = bps_of(fee_b, PROTOCOL_FEE_BPS);
            let lp = fee_b - proto;
            self.protocol_fees_b += proto;
            self.fee_index_b += mul_div(lp, BPS_DENOMINATOR, self.total_shares);
        }
    }

    /// Oriented reserves for a swap direction: `(reserve_in, reserve_out)`.
    const fn oriented_reserves(&self, a_to_b: bool) -> (u64, u64) {
        if a_to_b {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        }
    }
}

impl SwapPool for ConstantProductPool {
    fn id(&self) -> PoolId {
        self.id
    }

    fn fee_bps(&self) -> u64 {
        self.fee_bps
    }

    fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    fn cumulative_volumes(&self) -> (u64, u64) {
        (self.cumulative_volume_a, self.cumulative_volume_b)
    }

    /// Quotes `amount_out = net · reserve_out / (reserve_in + net)` with a
    /// widened numerator. Returns `(amount_out, fee)`.
    ///
    /// A dust input can quote zero output after the fee — a permitted
    /// result; minimum-output protection is the caller's concern.
    fn get_amount_out(&self, amount_in: u64, a_to_b: bool) -> Result<(u64, u64)> {
        if amount_in == 0 {
            return Err(AmmError::ZeroAmountIn);
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(a_to_b);
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::ZeroLiquidity);
        }
        let fee = bps_of(amount_in, self.fee_bps);
        let net = amount_in - fee;
        let amount_out =
            (mul_wide(net, reserve_out) / (u128::from(reserve_in) + u128::from(net))) as u64;
        Ok((amount_out, fee))
    }

    fn swap(&mut self, amount_in: u64, a_to_b: bool) -> Result<(u64, u64)> {
        let (amount_out, fee) = self.get_amount_out(amount_in, a_to_b)?;
        let (_, reserve_out) = self.oriented_reserves(a_to_b);
        if amount_out == 0 || amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity(
                "swap cannot produce a positive output within reserves",
            ));
        }

        if a_to_b {
            self.reserve_a += amount_in;
            self.reserve_b -= amount_out;
            self.cumulative_volume_a += amount_in;
            self.accrue_fees(fee, 0);
        } else {
            self.reserve_b += amount_in;
            self.reserve_a -= amount_out;
            self.cumulative_volume_b += amount_in;
            self.accrue_fees(0, fee);
        }
        Ok((amount_out, fee))
    }
}

impl LiquidityPool for ConstantProductPool {
    fn total_shares(&self) -> u64 {
        self.total_shares
    }

    fn fee_indices(&self) -> (u64, u64) {
        (self.fee_index_a, self.fee_index_b)
    }

    fn protocol_fees(&self) -> (u64, u64) {
        (self.protocol_fees_a, self.protocol_fees_b)
    }

    /// Seeds the pool with `√(a · b)` total shares and returns the
    /// seeder's portion (everything above the locked minimum).
    fn provide_initial_liquidity(&mut self, amount_a: u64, amount_b: u64) -> Result<u64> {
        if self.total_shares > 0 {
            return Err(AmmError::PoolAlreadySeeded);
        }
        if amount_a == 0 || amount_b == 0 {
            return Err(AmmError::ZeroLiquidity);
        }
        let minted = geometric_mean(amount_a, amount_b);
        if minted <= MINIMUM_LIQUIDITY {
            return Err(AmmError::InsufficientLiquidity(
                "seed must exceed the locked minimum",
            ));
        }
        self.reserve_a = amount_a;
        self.reserve_b = amount_b;
        self.total_shares = minted;
        self.k_last = mul_wide(amount_a, amount_b);
        Ok(minted - MINIMUM_LIQUIDITY)
    }

    /// Ratio-checked proportional deposit.
    ///
    /// The deposit must match the pool ratio within `tolerance_bps`:
    /// `|b − a·Rb/Ra| · 10 000 / (a·Rb/Ra) ≤ tolerance_bps`. Shares minted
    /// are the smaller of the two proportional entitlements.
    fn add_liquidity(&mut self, amount_a: u64, amount_b: u64, tolerance_bps: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Err(AmmError::ZeroLiquidity);
        }
        if amount_a == 0 || amount_b == 0 {
            return Err(AmmError::ZeroLiquidity);
        }

        let required_b = mul_div(amount_a, self.reserve_b, self.reserve_a);
        if required_b > 0 {
            let diff = amount_b.abs_diff(required_b);
            if mul_div(diff, BPS_DENOMINATOR, required_b) > tolerance_bps {
                return Err(AmmError::InvalidRatio);
            }
        }

        let share_a = mul_div(amount_a, self.total_shares, self.reserve_a);
        let share_b = mul_div(amount_b, self.total_shares, self.reserve_b);
        let minted = share_a.min(share_b);
        if minted == 0 {
            return Err(AmmError::ZeroShares("deposit too small to mint shares"));
        }

        self.reserve_a += amount_a;
        self.reserve_b += amount_b;
        self.total_shares += minted;
        self.k_last = mul_wide(self.reserve_a, self.reserve_b);
        Ok(minted)
    }

    fn preview_remove_liquidity(&self, shares: u64) -> Result<(u64, u64)> {
        if shares == 0 {
            return Err(AmmError::ZeroShares("cannot burn zero shares"));
        }
        if shares > self.total_shares {
            return Err(AmmError::InsufficientShares);
        }
        if self.reserve_a == 0 || self.reserve_b == 0 {
            return Err(AmmError::ZeroLiquidity);
        }
        let remaining = self.total_shares - shares;
        if remaining > 0 && remaining < MINIMUM_LIQUIDITY {
            return Err(AmmError::InsufficientLiquidity(
                "burn would strand the locked minimum",
            ));
        }
        Ok((
            mul_div(shares, self.reserve_a, self.total_shares),
            mul_div(shares, self.reserve_b, self.total_shares),
        ))
    }

    /// Pro-rata withdrawal: `amount = shares · reserve / total_shares` per
    /// token, truncating toward the pool.
    fn remove_liquidity(&mut self, shares: u64) -> Result<(u64, u64)> {
        let (amount_a, amount_b) = self.preview_remove_liquidity(shares)?;
        self.reserve_a -= amount_a;
        self.reserve_b -= amount_b;
        self.total_shares -= shares;
        self.k_last = mul_wide(self.reserve_a, self.reserve_b);
        Ok((amount_a, amount_b))
    }

    fn withdraw_protocol_fees(&mut self) -> (u64, u64) {
        let drained = (self.protocol_fees_a, self.protocol_fees_b);
        self.protocol_fees_a = 0;
        self.protocol_fees_b = 0;
        drained
    }
}
