//! Stable-swap pool for pegged pairs.
//!
//! Quotes blend a constant-sum leg with a constant-product leg, weighted
//! by the amplification coefficient `A`:
//!
//! ```text
//! out_cs = min(net_input, reserve_out)
//! out_cp = reserve_out − reserve_in · reserve_out / (reserve_in + net_input)
//! out    = out_cs · A / (A + 1)  +  out_cp / (A + 1)
//! ```
//!
//! As `A` grows the curve approaches constant-sum (1:1 fills near peg);
//! at `A = 1` the two legs weigh equally. This deliberately simple blend —
//! not a full invariant solver — is the contract, and both divisions
//! truncate independently.
//!
//! Shares are priced on the reserve sum rather than the product, which is
//! what admits single-sided deposits. Fee accrual follows the exact same
//! protocol-split and per-share-index discipline as the constant-product
//! pool.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BPS_DENOMINATOR, MAX_AMP, MIN_AMP, MINIMUM_LIQUIDITY, PROTOCOL_FEE_BPS, SS_MAX_FEE_BPS,
};
use crate::domain::PoolId;
use crate::error::{AmmError, Result};
use crate::math::{bps_of, mul_div, mul_wide};
use crate::traits::{LiquidityPool, SwapPool};

/// A stable-swap AMM pool.
///
/// Carries the same reserve/share/fee-index state as the constant-product
/// pool plus the amplification coefficient; there is no `k_last` cache
/// because the blended curve has no product invariant to track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableSwapPool {
    id: PoolId,
    fee_bps: u64,
    amp_factor: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
    fee_index_a: u64,
    fee_index_b: u64,
    protocol_fees_a: u64,
    protocol_fees_b: u64,
    cumulative_volume_a: u64,
    cumulative_volume_b: u64,
}

impl StableSwapPool {
    /// Creates an empty pool with the given fee and amplification.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if `fee_bps` exceeds [`SS_MAX_FEE_BPS`].
    /// - [`AmmError::InvalidAmp`] if `amp_factor` is outside
    ///   `MIN_AMP..=MAX_AMP`.
    pub fn new(id: PoolId, fee_bps: u64, amp_factor: u64) -> Result<Self> {
        if fee_bps > SS_MAX_FEE_BPS {
            return Err(AmmError::InvalidFee(
                "stable-swap fee must not exceed 100bp",
            ));
        }
        if !(MIN_AMP..=MAX_AMP).contains(&amp_factor) {
            return Err(AmmError::InvalidAmp(amp_factor));
        }
        Ok(Self {
            id,
            fee_bps,
            amp_factor,
            reserve_a: 0,
            reserve_b: 0,
            total_shares: 0,
            fee_index_a: 0,
            fee_index_b: 0,
            protocol_fees_a: 0,
            protocol_fees_b: 0,
            cumulative_volume_a: 0,
            cumulative_volume_b: 0,
        })
    }

    /// Returns the amplification coefficient.
    #[must_use]
    pub const fn amp_factor(&self) -> u64 {
        self.amp_factor
    }

    /// Same fee split as the constant-product pool: 10% to the protocol
    /// bucket, the remainder into the per-share index of the fee side.
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

    const fn oriented_reserves(&self, a_to_b: bool) -> (u64, u64) {
        if a_to_b {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        }
    }
}

impl SwapPool for StableSwapPool {
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

    /// Quotes the amplification-weighted blend of the constant-sum and
    /// constant-product legs, clamped to the output reserve.
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

        let new_in = u128::from(reserve_in) + u128::from(net);
        let out_cp = u128::from(reserve_out) - mul_wide(reserve_in, reserve_out) / new_in;
        let out_cs = u128::from(net.min(reserve_out));

        let amp = u128::from(self.amp_factor);
        let blended = out_cs * amp / (amp + 1) + out_cp / (amp + 1);
        let amount_out = blended.min(u128::from(reserve_out)) as u64;
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

impl LiquidityPool for StableSwapPool {
    fn total_shares(&self) -> u64 {
        self.total_shares
    }

    fn fee_indices(&self) -> (u64, u64) {
        (self.fee_index_a, self.fee_index_b)
    }

    fn protocol_fees(&self) -> (u64, u64) {
        (self.protocol_fees_a, self.protocol_fees_b)
    }

    /// Seeds the pool with `a + b` total shares (the peg makes the two
    /// tokens interchangeable at face value) and returns the seeder's
    /// portion above the locked minimum.
    fn provide_initial_liquidity(&mut self, amount_a: u64, amount_b: u64) -> Result<u64> {
        if self.total_shares > 0 {
            return Err(AmmError::PoolAlreadySeeded);
        }
        if amount_a == 0 || amount_b == 0 {
            return Err(AmmError::ZeroLiquidity);
        }
        let minted = amount_a + amount_b;
        if minted <= MINIMUM_LIQUIDITY {
            return Err(AmmError::InsufficientLiquidity(
                "seed must exceed the locked minimum",
            ));
        }
        self.reserve_a = amount_a;
        self.reserve_b = amount_b;
        self.total_shares = minted;
        Ok(minted - MINIMUM_LIQUIDITY)
    }

    /// Sum-priced deposit: `shares = (a + b) · S / (Ra + Rb)`.
    ///
    /// Single-sided deposits are accepted; `tolerance_bps` is ignored
    /// because there is no ratio to hold near the peg.
    fn add_liquidity(&mut self, amount_a: u64, amount_b: u64, _tolerance_bps: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Err(AmmError::ZeroLiquidity);
        }
        if amount_a == 0 && amount_b == 0 {
            return Err(AmmError::ZeroLiquidity);
        }

        let deposit = u128::from(amount_a) + u128::from(amount_b);
        let reserve_sum = u128::from(self.reserve_a) + u128::from(self.reserve_b);
        let minted = (deposit * u128::from(self.total_shares) / reserve_sum) as u64;
        if minted == 0 {
            return Err(AmmError::ZeroShares("deposit too small to mint shares"));
        }

        self.reserve_a += amount_a;
        self.reserve_b += amount_b;
        self.total_shares += minted;
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

    fn remove_liquidity(&mut self, shares: u64) -> Result<(u64, u64)> {
        let (amount_a, amount_b) = self.preview_remove_liquidity(shares)?;
        self.reserve_a -= amount_a;
        self.reserve_b -= amount_b;
        self.total_shares -= shares;
        Ok((amount_a, amount_b))
    }

    fn withdraw_protocol_fees(&mut self) -> (u64, u64) {
        let drained = (self.protocol_fees_a, self.protocol_fees_b);
        self.protocol_fees_a = 0;
        self.protocol_fees_b = 0;
        drained
    }
}
