//! Lazy proportional fee distribution.
//!
//! Swaps never touch positions: they raise the pool's per-share fee index
//! and move on. A position's entitlement is settled lazily, against the
//! cursor it keeps from its last claim:
//!
//! ```text
//! claimable = (index_now − index_at_last_claim) · shares / 10 000
//! ```
//!
//! This makes fee accrual O(1) per swap and O(1) per claim regardless of
//! how many positions exist. The distributor performs the settlement:
//! verifying the position/pool binding, advancing the cursor atomically,
//! and optionally compounding the claim straight back into the pool.

use serde::{Deserialize, Serialize};

use crate::error::{AmmError, Result};
use crate::position::LpPosition;
use crate::traits::LiquidityPool;

/// Settles fee claims between pools and positions.
///
/// Carries only lifetime counters; all entitlement state lives in the pool
/// indices and the position cursors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDistributor {
    total_distributed_a: u64,
    total_distributed_b: u64,
    total_claims: u64,
}

impl FeeDistributor {
    /// Creates a distributor with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifetime distributed totals as `(total_a, total_b)`.
    #[must_use]
    pub const fn total_distributed(&self) -> (u64, u64) {
        (self.total_distributed_a, self.total_distributed_b)
    }

    /// Number of claims settled (compounding included).
    #[must_use]
    pub const fn total_claims(&self) -> u64 {
        self.total_claims
    }

    /// Computes what a position could claim right now.
    ///
    /// Returns `(claimable_a, claimable_b, index_a, index_b)` where the
    /// indices are the pool values read for the computation — the values a
    /// claim would write back as the new cursor.
    #[must_use]
    pub fn compute_claimable(
        pool: &impl LiquidityPool,
        position: &LpPosition,
    ) -> (u64, u64, u64, u64) {
        let (index_a, index_b) = pool.fee_indices();
        let (claimable_a, claimable_b) = position.calculate_pending_fees(index_a, index_b);
        (claimable_a, claimable_b, index_a, index_b)
    }

    /// Settles a claim: advances the position cursor to the current pool
    /// indices and returns `(claimed_a, claimed_b)`.
    ///
    /// The cursor update is atomic — immediately after a claim, the same
    /// position claims `(0, 0)` against unchanged pool indices. Claiming
    /// nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolMismatch`] if the position is bound to a
    /// different pool.
    pub fn claim(
        &mut self,
        pool: &impl LiquidityPool,
        position: &mut LpPosition,
    ) -> Result<(u64, u64)> {
        if position.pool_id() != pool.id() {
            return Err(AmmError::PoolMismatch);
        }
        let (claimed_a, claimed_b, index_a, index_b) = Self::compute_claimable(pool, position);
        position.update_metadata(index_a, index_b, claimed_a, claimed_b);
        self.record(claimed_a, claimed_b);
        tracing::debug!(
            position_id = %position.id(),
            pool_id = %pool.id(),
            claimed_a,
            claimed_b,
            "fees claimed"
        );
        Ok((claimed_a, claimed_b))
    }

    /// Claims and, when both sides are non-zero, deposits the claim back
    /// into the pool, crediting the minted shares (and the deposit basis)
    /// to the position.
    ///
    /// Returns `(new_shares, claimed_a, claimed_b)`; `new_shares` is zero
    /// when either side had nothing to compound — the cursor still
    /// advances in that case.
    ///
    /// The embedded deposit runs before any cursor or counter mutation, so
    /// a ratio failure aborts the whole operation with no state change.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolMismatch`] if the position is bound to a
    ///   different pool.
    /// - Any error of
    ///   [`LiquidityPool::add_liquidity`] for the compounding deposit.
    pub fn auto_compound(
        &mut self,
        pool: &mut impl LiquidityPool,
        position: &mut LpPosition,
        tolerance_bps: u64,
    ) -> Result<(u64, u64, u64)> {
        if position.pool_id() != pool.id() {
            return Err(AmmError::PoolMismatch);
        }
        let (claimed_a, claimed_b, index_a, index_b) = Self::compute_claimable(pool, position);

        let new_shares = if claimed_a > 0 && claimed_b > 0 {
            pool.add_liquidity(claimed_a, claimed_b, tolerance_bps)?
        } else {
            0
        };

        position.update_metadata(index_a, index_b, claimed_a, claimed_b);
        if new_shares > 0 {
            position.add_shares(new_shares);
            position.update_initial_amounts(claimed_a, claimed_b);
        }
        self.record(claimed_a, claimed_b);
        tracing::debug!(
            position_id = %position.id(),
            pool_id = %pool.id(),
            claimed_a,
            claimed_b,
            new_shares,
            "fees compounded"
        );
        Ok((new_shares, claimed_a, claimed_b))
    }

    fn record(&mut self, claimed_a: u64, claimed_b: u64) {
        self.total_distributed_a += claimed_a;
        self.total_distributed_b += claimed_b;
        self.total_claims += 1;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{PoolId, PositionId};
    use crate::pools::ConstantProductPool;
    use crate::traits::SwapPool;

    // -- helpers --------------------------------------------------------------

    fn seeded_pool(id: u128, fee_bps: u64) -> ConstantProductPool {
        let Ok(mut pool) = ConstantProductPool::new(PoolId::new(id), fee_bps) else {
            panic!("expected valid pool");
        };
        let Ok(_) = pool.provide_initial_liquidity(1_000_000, 1_000_000) else {
            panic!("expected seeding to succeed");
        };
        pool
    }

    fn position(id: u128, pool: u128, shares: u64) -> LpPosition {
        let Ok(pos) = LpPosition::mint(
            PositionId::new(id),
            PoolId::new(pool),
            shares,
            0,
            0,
            shares,
            shares,
            0,
        ) else {
            panic!("expected Ok");
        };
        pos
    }

    // -- compute / claim ------------------------------------------------------

    #[test]
    fn claim_settles_pending_fees() {
        let mut pool = seeded_pool(1, 30);
        let mut pos = position(1, 1, 999_000);
        let mut distributor = FeeDistributor::new();

        let Ok(_) = pool.swap(100_000, true) else {
            panic!("expected Ok");
        };
        // index_a = 2 → claimable 2·999_000/10_000 = 199
        let Ok((claimed_a, claimed_b)) = distributor.claim(&pool, &mut pos) else {
            panic!("expected Ok");
        };
        assert_eq!((claimed_a, claimed_b), (199, 0));
        assert_eq!(pos.claimed_fees(), (199, 0));
        assert_eq!(pos.fee_cursors(), pool.fee_indices());
        assert_eq!(distributor.total_distributed(), (199, 0));
        assert_eq!(distributor.total_claims(), 1);
    }

    #[test]
    fn second_claim_is_empty() {
        let mut pool = seeded_pool(1, 30);
        let mut pos = position(1, 1, 999_000);
        let mut distributor = FeeDistributor::new();

        let Ok(_) = pool.swap(100_000, true) else {
            panic!("expected Ok");
        };
        let Ok(first) = distributor.claim(&pool, &mut pos) else {
            panic!("expected Ok");
        };
        assert!(first.0 > 0);
        let Ok(second) = distributor.claim(&pool, &mut pos) else {
            panic!("expected Ok");
        };
        assert_eq!(second, (0, 0));
    }

    #[test]
    fn claims_are_proportional_to_shares() {
        let mut pool = seeded_pool(1, 30);
        // 599_000 + 400_000 + locked 1_000 = the 1M outstanding shares.
        let mut lp1 = position(1, 1, 599_000);
        let mut lp2 = position(2, 1, 400_000);
        let mut distributor = FeeDistributor::new();

        let Ok(_) = pool.swap(100_000, true) else {
            panic!("expected Ok");
        };
        let Ok((a1, _)) = distributor.claim(&pool, &mut lp1) else {
            panic!("expected Ok");
        };
        let Ok((a2, _)) = distributor.claim(&pool, &mut lp2) else {
            panic!("expected Ok");
        };
        // 599:400 within integer truncation.
        assert_eq!(a1, 119);
        assert_eq!(a2, 80);
    }

    #[test]
    fn claim_rejects_foreign_position() {
        let pool = seeded_pool(1, 30);
        let mut pos = position(1, 2, 1_000);
        let mut distributor = FeeDistributor::new();
        assert_eq!(
            distributor.claim(&pool, &mut pos),
            Err(AmmError::PoolMismatch)
        );
        assert_eq!(distributor.total_claims(), 0);
    }

    // -- auto-compound --------------------------------------------------------

    #[test]
    fn compound_reinvests_both_sides() {
        let mut pool = seeded_pool(1, 100);
        let mut pos = position(1, 1, 999_000);
        let mut distributor = FeeDistributor::new();

        // Fees on both sides.
        let Ok(_) = pool.swap(500_000, true) else {
            panic!("expected Ok");
        };
        let Ok(_) = pool.swap(400_000, false) else {
            panic!("expected Ok");
        };
        let (expect_a, expect_b, _, _) = FeeDistributor::compute_claimable(&pool, &pos);
        assert!(expect_a > 0 && expect_b > 0);

        let shares_before = pos.shares();
        let basis_before = pos.initial_amounts();
        let Ok((new_shares, claimed_a, claimed_b)) =
            distributor.auto_compound(&mut pool, &mut pos, 3_500)
        else {
            panic!("expected Ok");
        };
        assert_eq!((claimed_a, claimed_b), (expect_a, expect_b));
        assert!(new_shares > 0);
        assert_eq!(pos.shares(), shares_before + new_shares);
        assert_eq!(
            pos.initial_amounts(),
            (basis_before.0 + claimed_a, basis_before.1 + claimed_b)
        );
        // Cursor advanced: nothing further to claim.
        let (rest_a, rest_b, _, _) = FeeDistributor::compute_claimable(&pool, &pos);
        assert_eq!((rest_a, rest_b), (0, 0));
    }

    #[test]
    fn compound_with_one_empty_side_skips_deposit() {
        let mut pool = seeded_pool(1, 30);
        let mut pos = position(1, 1, 999_000);
        let mut distributor = FeeDistributor::new();

        // Fees on side A only.
        let Ok(_) = pool.swap(100_000, true) else {
            panic!("expected Ok");
        };
        let total_shares_before = pool.total_shares();
        let Ok((new_shares, claimed_a, claimed_b)) =
            distributor.auto_compound(&mut pool, &mut pos, 100)
        else {
            panic!("expected Ok");
        };
        assert_eq!(new_shares, 0);
        assert!(claimed_a > 0);
        assert_eq!(claimed_b, 0);
        // No deposit happened, but the cursor advanced anyway.
        assert_eq!(pool.total_shares(), total_shares_before);
        assert_eq!(pos.fee_cursors(), pool.fee_indices());
        assert_eq!(distributor.total_claims(), 1);
    }

    #[test]
    fn compound_ratio_failure_leaves_no_trace() {
        let mut pool = seeded_pool(1, 1_000);
        let mut pos = position(1, 1, 999_000);
        let mut distributor = FeeDistributor::new();

        // Skew the claimables far away from the (near-balanced) reserve
        // ratio, then demand an exact-ratio deposit.
        let Ok(_) = pool.swap(500_000, true) else {
            panic!("expected Ok");
        };
        let Ok(_) = pool.swap(10_000, false) else {
            panic!("expected Ok");
        };
        let pool_before = pool.clone();
        let pos_before = pos.clone();

        let result = distributor.auto_compound(&mut pool, &mut pos, 0);
        assert_eq!(result, Err(AmmError::InvalidRatio));
        assert_eq!(pool, pool_before);
        assert_eq!(pos, pos_before);
        assert_eq!(distributor.total_claims(), 0);
    }

    #[test]
    fn compound_rejects_foreign_position() {
        let mut pool = seeded_pool(1, 30);
        let mut pos = position(1, 9, 1_000);
        let mut distributor = FeeDistributor::new();
        assert_eq!(
            distributor.auto_compound(&mut pool, &mut pos, 100),
            Err(AmmError::PoolMismatch)
        );
    }
}
