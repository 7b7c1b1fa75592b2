//! Typed pool registry with canonical pair keys.
//!
//! Maps `(token_lo, token_hi, fee_bps)` to a pool record. The key is
//! canonical — [`PairKey`] sorts the two token ids — so `(A, B)` and
//! `(B, A)` resolve to the same pool, while distinct fee tiers over the
//! same pair coexist as distinct entries. Entries are inserted once and
//! never deleted; an activity flag supports listing without unregistering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, PairKey, PoolId, TokenId};
use crate::error::{AmmError, Result};

/// One registered pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Identifier of the registered pool.
    pub pool_id: PoolId,
    /// Fee tier the pool was registered under.
    pub fee_bps: u64,
    /// Registration epoch supplied by the caller.
    pub created_at: u64,
    /// Principal that created the pool.
    pub creator: AccountId,
    /// Whether the pool is currently listed.
    pub is_active: bool,
}

/// Registry of every pool ever created.
///
/// # Examples
///
/// ```
/// use reef_amm::domain::{AccountId, PoolId, TokenId};
/// use reef_amm::registry::PoolRegistry;
///
/// let mut registry = PoolRegistry::new();
/// let usdc = TokenId::from_symbol("USDC");
/// let eth = TokenId::from_symbol("ETH");
/// registry
///     .register_pool(PoolId::new(1), usdc, eth, 30, AccountId::zero(), 0)
///     .expect("first registration");
///
/// // Key order does not matter to the caller.
/// assert!(registry.pool_exists(eth, usdc, 30));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistry {
    pools: BTreeMap<PairKey, PoolEntry>,
    all_pools: Vec<PoolId>,
    active_count: u64,
    total_count: u64,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a pool is registered for the pair and fee tier.
    ///
    /// A malformed pair (both sides the same token) simply does not exist.
    #[must_use]
    pub fn pool_exists(&self, token_a: TokenId, token_b: TokenId, fee_bps: u64) -> bool {
        PairKey::new(token_a, token_b, fee_bps)
            .map(|key| self.pools.contains_key(&key))
            .unwrap_or(false)
    }

    /// Registers a pool under the canonical pair key.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTokenPair`] if both sides are the same token.
    /// - [`AmmError::PoolAlreadyExists`] on a duplicate key.
    pub fn register_pool(
        &mut self,
        pool_id: PoolId,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
        creator: AccountId,
        now: u64,
    ) -> Result<()> {
        let key = PairKey::new(token_a, token_b, fee_bps)?;
        if self.pools.contains_key(&key) {
            return Err(AmmError::PoolAlreadyExists);
        }
        self.pools.insert(
            key,
            PoolEntry {
                pool_id,
                fee_bps,
                created_at: now,
                creator,
                is_active: true,
            },
        );
        self.all_pools.push(pool_id);
        self.active_count += 1;
        self.total_count += 1;
        tracing::debug!(%pool_id, %key, "pool registered");
        Ok(())
    }

    /// Resolves the pool id for a pair and fee tier.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no entry matches (including a
    /// malformed same-token pair).
    pub fn get_pool(&self, token_a: TokenId, token_b: TokenId, fee_bps: u64) -> Result<PoolId> {
        self.try_get_pool(token_a, token_b, fee_bps)
            .ok_or(AmmError::PoolNotFound)
    }

    /// Non-aborting lookup of a pool id.
    #[must_use]
    pub fn try_get_pool(
        &self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
    ) -> Option<PoolId> {
        let key = PairKey::new(token_a, token_b, fee_bps).ok()?;
        self.pools.get(&key).map(|entry| entry.pool_id)
    }

    /// Returns the full registry entry for a pair and fee tier.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no entry matches.
    pub fn entry(&self, token_a: TokenId, token_b: TokenId, fee_bps: u64) -> Result<&PoolEntry> {
        let key = PairKey::new(token_a, token_b, fee_bps).map_err(|_| AmmError::PoolNotFound)?;
        self.pools.get(&key).ok_or(AmmError::PoolNotFound)
    }

    /// Unlists a pool. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no entry matches.
    pub fn deactivate_pool(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
    ) -> Result<()> {
        self.set_active(token_a, token_b, fee_bps, false)
    }

    /// Relists a pool. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no entry matches.
    pub fn reactivate_pool(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
    ) -> Result<()> {
        self.set_active(token_a, token_b, fee_bps, true)
    }

    fn set_active(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
        active: bool,
    ) -> Result<()> {
        let key = PairKey::new(token_a, token_b, fee_bps).map_err(|_| AmmError::PoolNotFound)?;
        let entry = self.pools.get_mut(&key).ok_or(AmmError::PoolNotFound)?;
        if entry.is_active != active {
            entry.is_active = active;
            if active {
                self.active_count += 1;
            } else {
                self.active_count -= 1;
            }
        }
        Ok(())
    }

    /// Returns every registered pool id in registration order.
    #[must_use]
    pub fn all_pools(&self) -> &[PoolId] {
        &self.all_pools
    }

    /// Returns the number of active entries.
    #[must_use]
    pub const fn active_count(&self) -> u64 {
        self.active_count
    }

    /// Returns the number of entries ever registered.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }
}
