//! User-level workflows over factory, registry, pools, and distributor.
//!
//! The router owns the engine state: the pool table, the registry, the
//! factory, the fee distributor, and the event log. Every operation is
//! synchronous and validates before mutating, so a failure leaves no
//! partial state behind; every success appends the corresponding events.
//!
//! Positions stay caller-owned. The router takes `&mut` access for the
//! duration of an operation and hands consuming operations their position
//! back on failure.

use std::collections::BTreeMap;

use crate::config::RouterConfig;
use crate::distributor::FeeDistributor;
use crate::domain::{AccountId, PoolId, PositionId, TokenId};
use crate::error::{AmmError, Result};
use crate::events::{AmmEvent, EventLog};
use crate::factory::PoolFactory;
use crate::pools::AnyPool;
use crate::position::LpPosition;
use crate::slippage::{ensure_deadline, ensure_min_output, ensure_price_impact, min_output_for};
use crate::traits::{LiquidityPool, SwapPool};

/// The engine's composition root.
///
/// # Examples
///
/// ```
/// use reef_amm::domain::{AccountId, TokenId};
/// use reef_amm::router::AmmRouter;
///
/// let mut router = AmmRouter::new(AccountId::zero());
/// let usdc = TokenId::from_symbol("USDC");
/// let eth = TokenId::from_symbol("ETH");
///
/// let (pool_id, position) = router
///     .create_pool_full(usdc, eth, 30, 1_000_000, 1_000_000, AccountId::zero(), 0)
///     .expect("pool created");
/// assert_eq!(position.shares(), 999_000);
///
/// let (amount_out, fee) = router
///     .swap_auto_slippage(pool_id, 100_000, 200, true)
///     .expect("swap within 2% slippage");
/// assert_eq!((amount_out, fee), (90_661, 300));
/// ```
#[derive(Debug)]
pub struct AmmRouter {
    factory: PoolFactory,
    registry: crate::registry::PoolRegistry,
    distributor: FeeDistributor,
    pools: BTreeMap<PoolId, AnyPool>,
    config: RouterConfig,
    events: EventLog,
    position_count: u64,
}

impl AmmRouter {
    /// Creates a router with default protection settings.
    #[must_use]
    pub fn new(fee_recipient: AccountId) -> Self {
        Self::with_config(fee_recipient, RouterConfig::default())
    }

    /// Creates a router with explicit protection settings.
    #[must_use]
    pub fn with_config(fee_recipient: AccountId, config: RouterConfig) -> Self {
        Self {
            factory: PoolFactory::new(fee_recipient),
            registry: crate::registry::PoolRegistry::new(),
            distributor: FeeDistributor::new(),
            pools: BTreeMap::new(),
            config,
            events: EventLog::new(),
            position_count: 0,
        }
    }

    // -- read access ---------------------------------------------------------

    /// Returns a pool by id.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown id.
    pub fn pool(&self, pool_id: PoolId) -> Result<&AnyPool> {
        self.pools.get(&pool_id).ok_or(AmmError::PoolNotFound)
    }

    /// Returns the pool registry.
    #[must_use]
    pub const fn registry(&self) -> &crate::registry::PoolRegistry {
        &self.registry
    }

    /// Returns the fee distributor.
    #[must_use]
    pub const fn distributor(&self) -> &FeeDistributor {
        &self.distributor
    }

    /// Returns the pool factory.
    #[must_use]
    pub const fn factory(&self) -> &PoolFactory {
        &self.factory
    }

    /// Returns the protection configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Returns the recorded events.
    #[must_use]
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    /// Removes and returns all recorded events, oldest first.
    pub fn drain_events(&mut self) -> Vec<AmmEvent> {
        self.events.drain()
    }

    /// Pauses pool creation.
    pub fn pause(&mut self) {
        self.factory.pause();
    }

    /// Resumes pool creation.
    pub fn unpause(&mut self) {
        self.factory.unpause();
    }

    // -- pool creation -------------------------------------------------------

    /// Creates, seeds, and registers a constant-product pool, minting the
    /// seeder's position.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTokenPair`] / [`AmmError::PoolAlreadyExists`]
    ///   from the registry check.
    /// - [`AmmError::Paused`] / [`AmmError::InvalidFeeTier`] from the
    ///   factory.
    /// - Seeding errors from
    ///   [`LiquidityPool::provide_initial_liquidity`].
    #[allow(clippy::too_many_arguments)]
    pub fn create_pool_full(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
        amount_a: u64,
        amount_b: u64,
        creator: AccountId,
        now: u64,
    ) -> Result<(PoolId, LpPosition)> {
        self.check_pair_available(token_a, token_b, fee_bps)?;
        let pool = self.factory.create_cp_pool(fee_bps)?;
        self.seed_and_register(
            AnyPool::ConstantProduct(pool),
            token_a,
            token_b,
            fee_bps,
            amount_a,
            amount_b,
            creator,
            now,
        )
    }

    /// Creates, seeds, and registers a stable-swap pool, minting the
    /// seeder's position.
    ///
    /// # Errors
    ///
    /// As [`create_pool_full`](Self::create_pool_full), with
    /// [`AmmError::InvalidFee`] / [`AmmError::InvalidAmp`] in place of the
    /// tier check.
    #[allow(clippy::too_many_arguments)]
    pub fn create_stable_pool_full(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
        amp_factor: u64,
        amount_a: u64,
        amount_b: u64,
        creator: AccountId,
        now: u64,
    ) -> Result<(PoolId, LpPosition)> {
        self.check_pair_available(token_a, token_b, fee_bps)?;
        let pool = self.factory.create_stable_pool(fee_bps, amp_factor)?;
        self.seed_and_register(
            AnyPool::StableSwap(pool),
            token_a,
            token_b,
            fee_bps,
            amount_a,
            amount_b,
            creator,
            now,
        )
    }

    fn check_pair_available(
        &self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
    ) -> Result<()> {
        crate::domain::PairKey::new(token_a, token_b, fee_bps)?;
        if self.registry.pool_exists(token_a, token_b, fee_bps) {
            return Err(AmmError::PoolAlreadyExists);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn seed_and_register(
        &mut self,
        mut pool: AnyPool,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
        amount_a: u64,
        amount_b: u64,
        creator: AccountId,
        now: u64,
    ) -> Result<(PoolId, LpPosition)> {
        let seeder_shares = pool.provide_initial_liquidity(amount_a, amount_b)?;
        let pool_id = pool.id();
        let total_shares = pool.total_shares();
        let (fee_index_a, fee_index_b) = pool.fee_indices();

        // Cannot fail: the pair was validated and checked for duplicates.
        self.registry
            .register_pool(pool_id, token_a, token_b, fee_bps, creator, now)?;
        self.pools.insert(pool_id, pool);

        let position = LpPosition::mint(
            self.next_position_id(),
            pool_id,
            seeder_shares,
            fee_index_a,
            fee_index_b,
            amount_a,
            amount_b,
            now,
        )?;

        let key = crate::domain::PairKey::new(token_a, token_b, fee_bps)?;
        self.events.record(AmmEvent::PoolCreated {
            pool_id,
            fee_bps,
            pool_index: self.registry.total_count() - 1,
            creator,
        });
        self.events.record(AmmEvent::PoolRegistered {
            pool_id,
            token_lo: key.token_lo(),
            token_hi: key.token_hi(),
            fee_bps,
            creator,
        });
        self.events.record(AmmEvent::LiquidityAdded {
            pool_id,
            amount_a,
            amount_b,
            shares_minted: seeder_shares,
            total_shares,
        });
        self.events.record(AmmEvent::PositionMinted {
            position_id: position.id(),
            pool_id,
            lp_shares: seeder_shares,
            owner: creator,
        });
        tracing::info!(%pool_id, %key, amount_a, amount_b, "pool created and seeded");
        Ok((pool_id, position))
    }

    // -- liquidity -----------------------------------------------------------

    /// Deposits into a pool and mints a fresh position for the shares.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], plus everything
    /// [`LiquidityPool::add_liquidity`] reports.
    pub fn add_liquidity_new_position(
        &mut self,
        pool_id: PoolId,
        amount_a: u64,
        amount_b: u64,
        tolerance_bps: u64,
        owner: AccountId,
        now: u64,
    ) -> Result<LpPosition> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        let minted = pool.add_liquidity(amount_a, amount_b, tolerance_bps)?;
        let total_shares = pool.total_shares();
        let (fee_index_a, fee_index_b) = pool.fee_indices();

        let position = LpPosition::mint(
            self.next_position_id(),
            pool_id,
            minted,
            fee_index_a,
            fee_index_b,
            amount_a,
            amount_b,
            now,
        )?;

        self.events.record(AmmEvent::LiquidityAdded {
            pool_id,
            amount_a,
            amount_b,
            shares_minted: minted,
            total_shares,
        });
        self.events.record(AmmEvent::PositionMinted {
            position_id: position.id(),
            pool_id,
            lp_shares: minted,
            owner,
        });
        Ok(position)
    }

    /// Deposits into a pool, crediting shares and basis to an existing
    /// position.
    ///
    /// Returns the shares minted.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], [`AmmError::PoolMismatch`], plus
    /// everything [`LiquidityPool::add_liquidity`] reports.
    pub fn add_liquidity_existing_position(
        &mut self,
        pool_id: PoolId,
        position: &mut LpPosition,
        amount_a: u64,
        amount_b: u64,
        tolerance_bps: u64,
    ) -> Result<u64> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        if position.pool_id() != pool_id {
            return Err(AmmError::PoolMismatch);
        }
        let minted = pool.add_liquidity(amount_a, amount_b, tolerance_bps)?;
        let total_shares = pool.total_shares();

        let old_shares = position.shares();
        position.add_shares(minted);
        position.update_initial_amounts(amount_a, amount_b);

        self.events.record(AmmEvent::LiquidityAdded {
            pool_id,
            amount_a,
            amount_b,
            shares_minted: minted,
            total_shares,
        });
        self.events.record(AmmEvent::SharesUpdated {
            position_id: position.id(),
            old_shares,
            new_shares: position.shares(),
        });
        Ok(minted)
    }

    /// Burns part of a position's shares for the pro-rata reserves.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], [`AmmError::PoolMismatch`],
    /// [`AmmError::InsufficientShares`] beyond the position's balance,
    /// plus everything [`LiquidityPool::remove_liquidity`] reports.
    pub fn remove_liquidity_partial(
        &mut self,
        pool_id: PoolId,
        position: &mut LpPosition,
        shares: u64,
    ) -> Result<(u64, u64)> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        if position.pool_id() != pool_id {
            return Err(AmmError::PoolMismatch);
        }
        if shares > position.shares() {
            return Err(AmmError::InsufficientShares);
        }
        let (amount_a, amount_b) = pool.remove_liquidity(shares)?;
        let total_shares = pool.total_shares();

        let old_shares = position.shares();
        // Cannot fail: bounded by the balance check above.
        position.reduce_shares(shares)?;

        self.events.record(AmmEvent::LiquidityRemoved {
            pool_id,
            amount_a,
            amount_b,
            shares_burned: shares,
            total_shares,
        });
        self.events.record(AmmEvent::SharesUpdated {
            position_id: position.id(),
            old_shares,
            new_shares: position.shares(),
        });
        Ok((amount_a, amount_b))
    }

    /// Drains a position completely and burns it, enforcing per-token
    /// minimum outputs against the previewed amounts before any mutation.
    ///
    /// # Errors
    ///
    /// On failure the untouched position is handed back alongside the
    /// error (the same convention as [`std::sync::mpsc::Sender::send`]).
    pub fn remove_all_and_burn(
        &mut self,
        pool_id: PoolId,
        position: LpPosition,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> core::result::Result<(u64, u64), (AmmError, LpPosition)> {
        let mut position = position;
        let outcome = self.drain_and_burn_inner(pool_id, &mut position, min_amount_a, min_amount_b);
        match outcome {
            Ok(amounts) => {
                let (position_id, pool_id, final_shares) = position.burn();
                self.events.record(AmmEvent::PositionBurned {
                    position_id,
                    pool_id,
                    final_shares,
                });
                Ok(amounts)
            }
            Err(err) => Err((err, position)),
        }
    }

    fn drain_and_burn_inner(
        &mut self,
        pool_id: PoolId,
        position: &mut LpPosition,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> Result<(u64, u64)> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        if position.pool_id() != pool_id {
            return Err(AmmError::PoolMismatch);
        }
        let shares = position.shares();
        let (preview_a, preview_b) = pool.preview_remove_liquidity(shares)?;
        ensure_min_output(preview_a, min_amount_a)?;
        ensure_min_output(preview_b, min_amount_b)?;

        let (amount_a, amount_b) = pool.remove_liquidity(shares)?;
        let total_shares = pool.total_shares();
        position.reduce_shares(shares)?;

        self.events.record(AmmEvent::LiquidityRemoved {
            pool_id,
            amount_a,
            amount_b,
            shares_burned: shares,
            total_shares,
        });
        Ok((amount_a, amount_b))
    }

    // -- swapping ------------------------------------------------------------

    /// Quotes the trade, derives the minimum output from `slippage_bps`,
    /// and executes under that bound.
    ///
    /// Returns `(amount_out, fee)`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`],
    /// [`AmmError::InvalidSlippageTolerance`], plus everything
    /// [`SwapPool::swap_with_min_output`] reports.
    pub fn swap_auto_slippage(
        &mut self,
        pool_id: PoolId,
        amount_in: u64,
        slippage_bps: u64,
        a_to_b: bool,
    ) -> Result<(u64, u64)> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        let (expected, _) = pool.get_amount_out(amount_in, a_to_b)?;
        let min_amount_out = min_output_for(expected, slippage_bps)?;
        let (amount_out, fee) = pool.swap_with_min_output(amount_in, a_to_b, min_amount_out)?;

        self.events.record(AmmEvent::SwapExecuted {
            pool_id,
            amount_in,
            amount_out,
            fee_amount: fee,
            a_to_b,
        });
        tracing::debug!(%pool_id, amount_in, amount_out, fee, a_to_b, "swap executed");
        Ok((amount_out, fee))
    }

    /// Deadline-guarded [`swap_auto_slippage`](Self::swap_auto_slippage).
    ///
    /// # Errors
    ///
    /// [`AmmError::DeadlineExpired`] when `now > deadline`, plus
    /// everything the underlying swap reports.
    pub fn swap_exact_in_until(
        &mut self,
        pool_id: PoolId,
        amount_in: u64,
        slippage_bps: u64,
        a_to_b: bool,
        now: u64,
        deadline: u64,
    ) -> Result<(u64, u64)> {
        ensure_deadline(now, deadline)?;
        self.swap_auto_slippage(pool_id, amount_in, slippage_bps, a_to_b)
    }

    /// [`swap_auto_slippage`](Self::swap_auto_slippage) that additionally
    /// rejects trades whose quoted impact exceeds the configured ceiling.
    ///
    /// # Errors
    ///
    /// [`AmmError::PriceImpactTooHigh`] beyond
    /// [`RouterConfig::max_price_impact_bps`], plus everything the
    /// underlying swap reports.
    pub fn swap_with_impact_guard(
        &mut self,
        pool_id: PoolId,
        amount_in: u64,
        slippage_bps: u64,
        a_to_b: bool,
    ) -> Result<(u64, u64)> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        let (expected, _) = pool.get_amount_out(amount_in, a_to_b)?;
        let (reserve_a, reserve_b) = pool.reserves();
        let (reserve_in, reserve_out) = if a_to_b {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        };
        ensure_price_impact(
            reserve_in,
            reserve_out,
            amount_in,
            expected,
            self.config.max_price_impact_bps(),
        )?;
        self.swap_auto_slippage(pool_id, amount_in, slippage_bps, a_to_b)
    }

    /// Read-only quote: `(amount_out, fee, impact_bps)`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], plus everything
    /// [`SwapPool::get_amount_out`] reports.
    pub fn quote_with_impact(
        &self,
        pool_id: PoolId,
        amount_in: u64,
        a_to_b: bool,
    ) -> Result<(u64, u64, u64)> {
        let pool = self.pool(pool_id)?;
        let (amount_out, fee) = pool.get_amount_out(amount_in, a_to_b)?;
        let (reserve_a, reserve_b) = pool.reserves();
        let (reserve_in, reserve_out) = if a_to_b {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        };
        let impact_bps =
            crate::slippage::price_impact_bps(reserve_in, reserve_out, amount_in, amount_out);
        Ok((amount_out, fee, impact_bps))
    }

    // -- fees ----------------------------------------------------------------

    /// Claims accrued fees for a position.
    ///
    /// Returns `(claimed_a, claimed_b)`; claiming nothing yields `(0, 0)`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], [`AmmError::PoolMismatch`].
    pub fn claim_fees_for_position(
        &mut self,
        pool_id: PoolId,
        position: &mut LpPosition,
    ) -> Result<(u64, u64)> {
        let pool = self.pools.get(&pool_id).ok_or(AmmError::PoolNotFound)?;
        let (claimed_a, claimed_b) = self.distributor.claim(pool, position)?;
        self.events.record(AmmEvent::FeesClaimed {
            position_id: position.id(),
            pool_id,
            amount_a: claimed_a,
            amount_b: claimed_b,
            auto_compounded: false,
        });
        Ok((claimed_a, claimed_b))
    }

    /// Claims and auto-compounds a position's fees back into its pool
    /// using the configured deposit tolerance.
    ///
    /// Returns `(new_shares, claimed_a, claimed_b)`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], plus everything
    /// [`FeeDistributor::auto_compound`] reports.
    pub fn claim_and_compound(
        &mut self,
        pool_id: PoolId,
        position: &mut LpPosition,
    ) -> Result<(u64, u64, u64)> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        let old_shares = position.shares();
        let (new_shares, claimed_a, claimed_b) =
            self.distributor
                .auto_compound(pool, position, self.config.add_tolerance_bps())?;

        self.events.record(AmmEvent::FeesClaimed {
            position_id: position.id(),
            pool_id,
            amount_a: claimed_a,
            amount_b: claimed_b,
            auto_compounded: true,
        });
        if new_shares > 0 {
            self.events.record(AmmEvent::FeesCompounded {
                position_id: position.id(),
                pool_id,
                amount_a: claimed_a,
                amount_b: claimed_b,
                new_shares,
            });
            self.events.record(AmmEvent::SharesUpdated {
                position_id: position.id(),
                old_shares,
                new_shares: position.shares(),
            });
        }
        Ok((new_shares, claimed_a, claimed_b))
    }

    /// Drains a pool's protocol fee buckets for the factory's recipient.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown id.
    pub fn withdraw_protocol_fees(&mut self, pool_id: PoolId) -> Result<(u64, u64)> {
        let pool = self.pools.get_mut(&pool_id).ok_or(AmmError::PoolNotFound)?;
        let (fees_a, fees_b) = pool.withdraw_protocol_fees();
        tracing::info!(
            %pool_id,
            fees_a,
            fees_b,
            recipient = %self.factory.fee_recipient(),
            "protocol fees withdrawn"
        );
        Ok((fees_a, fees_b))
    }

    // -- registry listing ----------------------------------------------------

    /// Unlists a pool in the registry. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown pair/tier.
    pub fn deactivate_pool(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
    ) -> Result<()> {
        let pool_id = self.registry.get_pool(token_a, token_b, fee_bps)?;
        self.registry.deactivate_pool(token_a, token_b, fee_bps)?;
        self.events.record(AmmEvent::PoolDeactivated { pool_id });
        Ok(())
    }

    /// Relists a pool in the registry. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown pair/tier.
    pub fn reactivate_pool(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        fee_bps: u64,
    ) -> Result<()> {
        let pool_id = self.registry.get_pool(token_a, token_b, fee_bps)?;
        self.registry.reactivate_pool(token_a, token_b, fee_bps)?;
        self.events.record(AmmEvent::PoolReactivated { pool_id });
        Ok(())
    }

    fn next_position_id(&mut self) -> PositionId {
        self.position_count += 1;
        PositionId::new(u128::from(self.position_count))
    }
}
