//! Pool factory: validated creation, pausing, identity assignment.

use serde::{Deserialize, Serialize};

use crate::constants::{CP_FEE_TIERS, SS_DEFAULT_AMP, SS_DEFAULT_FEE_BPS};
use crate::domain::{AccountId, PoolId};
use crate::error::{AmmError, Result};
use crate::pools::{ConstantProductPool, StableSwapPool};
use crate::traits::SwapPool;

/// Creates pools and assigns their identifiers.
///
/// Constant-product pools are restricted to the three recognized fee tiers
/// ([`CP_FEE_TIERS`]); stable-swap pools are validated by their own
/// constructor (fee cap and amplification range). A pause flag stops all
/// creation; the fee recipient recorded here is the principal the host pays
/// protocol withdrawals to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFactory {
    pool_count: u64,
    paused: bool,
    fee_recipient: AccountId,
}

impl PoolFactory {
    /// Creates a factory paying protocol fees to `fee_recipient`.
    #[must_use]
    pub const fn new(fee_recipient: AccountId) -> Self {
        Self {
            pool_count: 0,
            paused: false,
            fee_recipient,
        }
    }

    /// Returns how many pools this factory has created.
    #[must_use]
    pub const fn pool_count(&self) -> u64 {
        self.pool_count
    }

    /// Returns `true` while creation is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the protocol fee recipient.
    #[must_use]
    pub const fn fee_recipient(&self) -> AccountId {
        self.fee_recipient
    }

    /// Stops pool creation until [`unpause`](Self::unpause).
    pub fn pause(&mut self) {
        self.paused = true;
        tracing::info!("pool creation paused");
    }

    /// Resumes pool creation.
    pub fn unpause(&mut self) {
        self.paused = false;
        tracing::info!("pool creation resumed");
    }

    /// Creates an empty constant-product pool at a recognized fee tier.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Paused`] while creation is paused.
    /// - [`AmmError::InvalidFeeTier`] for a fee outside [`CP_FEE_TIERS`].
    pub fn create_cp_pool(&mut self, fee_bps: u64) -> Result<ConstantProductPool> {
        if self.paused {
            return Err(AmmError::Paused);
        }
        if !CP_FEE_TIERS.contains(&fee_bps) {
            return Err(AmmError::InvalidFeeTier(fee_bps));
        }
        let pool = ConstantProductPool::new(self.candidate_pool_id(), fee_bps)?;
        self.pool_count += 1;
        tracing::info!(pool_id = %pool.id(), fee_bps, "constant-product pool created");
        Ok(pool)
    }

    /// Creates an empty stable-swap pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Paused`] while creation is paused.
    /// - [`AmmError::InvalidFee`] / [`AmmError::InvalidAmp`] from the pool
    ///   constructor.
    pub fn create_stable_pool(&mut self, fee_bps: u64, amp_factor: u64) -> Result<StableSwapPool> {
        if self.paused {
            return Err(AmmError::Paused);
        }
        let pool = StableSwapPool::new(self.candidate_pool_id(), fee_bps, amp_factor)?;
        self.pool_count += 1;
        tracing::info!(
            pool_id = %pool.id(),
            fee_bps,
            amp_factor,
            "stable-swap pool created"
        );
        Ok(pool)
    }

    /// Creates a stable-swap pool at the default fee and amplification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Paused`] while creation is paused.
    pub fn create_default_stable_pool(&mut self) -> Result<StableSwapPool> {
        self.create_stable_pool(SS_DEFAULT_FEE_BPS, SS_DEFAULT_AMP)
    }

    /// Id the next successful creation will take. The counter advances
    /// only after validation succeeds, so failed creations never burn ids.
    const fn candidate_pool_id(&self) -> PoolId {
        PoolId::new(self.pool_count as u128 + 1)
    }
}
