//! Enum dispatch wrapper over the two pool curves.

use serde::{Deserialize, Serialize};

use super::constant_product::ConstantProductPool;
use super::stable_swap::StableSwapPool;
use crate::domain::PoolId;
use crate::error::Result;
use crate::traits::{LiquidityPool, SwapPool};

/// Static dispatch over the two concrete pool types.
///
/// The router stores heterogeneous pools behind this enum; every trait
/// method delegates to the inner pool via `match`, with no vtable and a
/// closed type set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyPool {
    /// Constant-product curve (`x · y = k`).
    ConstantProduct(ConstantProductPool),
    /// Amplification-blended stable-swap curve.
    StableSwap(StableSwapPool),
}

/// Delegates a method call to whichever variant is live.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            AnyPool::ConstantProduct(pool) => pool.$method($($arg),*),
            AnyPool::StableSwap(pool) => pool.$method($($arg),*),
        }
    };
}

impl SwapPool for AnyPool {
    fn id(&self) -> PoolId {
        delegate!(self, id())
    }

    fn fee_bps(&self) -> u64 {
        delegate!(self, fee_bps())
    }

    fn reserves(&self) -> (u64, u64) {
        delegate!(self, reserves())
    }

    fn cumulative_volumes(&self) -> (u64, u64) {
        delegate!(self, cumulative_volumes())
    }

    fn get_amount_out(&self, amount_in: u64, a_to_b: bool) -> Result<(u64, u64)> {
        delegate!(self, get_amount_out(amount_in, a_to_b))
    }

    fn swap(&mut self, amount_in: u64, a_to_b: bool) -> Result<(u64, u64)> {
        delegate!(self, swap(amount_in, a_to_b))
    }
}

impl LiquidityPool for AnyPool {
    fn total_shares(&self) -> u64 {
        delegate!(self, total_shares())
    }

    fn fee_indices(&self) -> (u64, u64) {
        delegate!(self, fee_indices())
    }

    fn protocol_fees(&self) -> (u64, u64) {
        delegate!(self, protocol_fees())
    }

    fn provide_initial_liquidity(&mut self, amount_a: u64, amount_b: u64) -> Result<u64> {
        delegate!(self, provide_initial_liquidity(amount_a, amount_b))
    }

    fn add_liquidity(&mut self, amount_a: u64, amount_b: u64, tolerance_bps: u64) -> Result<u64> {
        delegate!(self, add_liquidity(amount_a, amount_b, tolerance_bps))
    }

    fn preview_remove_liquidity(&self, shares: u64) -> Result<(u64, u64)> {
        delegate!(self, preview_remove_liquidity(shares))
    }

    fn remove_liquidity(&mut self, shares: u64) -> Result<(u64, u64)> {
        delegate!(self, remove_liquidity(shares))
    }

    fn withdraw_protocol_fees(&mut self) -> (u64, u64) {
        delegate!(self, withdraw_protocol_fees())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn cp(id: u128) -> AnyPool {
        let Ok(mut pool) = ConstantProductPool::new(PoolId::new(id), 30) else {
            panic!("expected valid pool");
        };
        let Ok(_) = pool.provide_initial_liquidity(1_000_000, 1_000_000) else {
            panic!("expected seeding to succeed");
        };
        AnyPool::ConstantProduct(pool)
    }

    fn stable(id: u128) -> AnyPool {
        let Ok(mut pool) = StableSwapPool::new(PoolId::new(id), 4, 100) else {
            panic!("expected valid pool");
        };
        let Ok(_) = pool.provide_initial_liquidity(1_000_000, 1_000_000) else {
            panic!("expected seeding to succeed");
        };
        AnyPool::StableSwap(pool)
    }

    #[test]
    fn delegates_identity_and_state() {
        let pool = cp(9);
        assert_eq!(pool.id(), PoolId::new(9));
        assert_eq!(pool.fee_bps(), 30);
        assert_eq!(pool.reserves(), (1_000_000, 1_000_000));
        assert_eq!(pool.total_shares(), 1_000_000);
    }

    #[test]
    fn delegates_swap_to_each_curve() {
        let mut cp_pool = cp(1);
        let mut ss_pool = stable(2);
        let Ok((cp_out, _)) = cp_pool.swap(10_000, true) else {
            panic!("expected Ok");
        };
        let Ok((ss_out, _)) = ss_pool.swap(10_000, true) else {
            panic!("expected Ok");
        };
        // Near the peg the stable curve fills tighter than constant product.
        assert!(ss_out > cp_out);
    }

    #[test]
    fn delegates_liquidity_round_trip() {
        let mut pool = stable(3);
        let Ok(minted) = pool.add_liquidity(50_000, 50_000, 0) else {
            panic!("expected Ok");
        };
        let Ok((amount_a, amount_b)) = pool.remove_liquidity(minted) else {
            panic!("expected Ok");
        };
        assert!(amount_a > 0 || amount_b > 0);
    }
}
