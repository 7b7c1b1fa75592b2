//! Events emitted at successful state transitions.
//!
//! The engine records every transition in an append-only [`EventLog`]
//! owned by the router; transports, subscriptions, and display rendering
//! are the host's concern. Events carry ids and amounts only — never
//! references into live state.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, PoolId, PositionId, TokenId};

/// One state-transition event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmmEvent {
    /// A pool was created and seeded.
    PoolCreated {
        /// New pool identifier.
        pool_id: PoolId,
        /// Fee tier of the pool.
        fee_bps: u64,
        /// Zero-based position in the registry's creation order.
        pool_index: u64,
        /// Creating principal.
        creator: AccountId,
    },
    /// Liquidity entered a pool.
    LiquidityAdded {
        /// Target pool.
        pool_id: PoolId,
        /// Token A deposited.
        amount_a: u64,
        /// Token B deposited.
        amount_b: u64,
        /// Shares minted for the deposit.
        shares_minted: u64,
        /// Outstanding shares after the deposit.
        total_shares: u64,
    },
    /// Liquidity left a pool.
    LiquidityRemoved {
        /// Source pool.
        pool_id: PoolId,
        /// Token A returned.
        amount_a: u64,
        /// Token B returned.
        amount_b: u64,
        /// Shares burned.
        shares_burned: u64,
        /// Outstanding shares after the burn.
        total_shares: u64,
    },
    /// A swap executed.
    SwapExecuted {
        /// Pool the swap ran on.
        pool_id: PoolId,
        /// Input amount, fee included.
        amount_in: u64,
        /// Output amount.
        amount_out: u64,
        /// Fee taken on the input side.
        fee_amount: u64,
        /// Direction: `true` for A → B.
        a_to_b: bool,
    },
    /// A position was minted.
    PositionMinted {
        /// New position identifier.
        position_id: PositionId,
        /// Pool the position is bound to.
        pool_id: PoolId,
        /// Shares the position starts with.
        lp_shares: u64,
        /// Owning principal at mint.
        owner: AccountId,
    },
    /// A position was burned.
    PositionBurned {
        /// Burned position identifier.
        position_id: PositionId,
        /// Pool the position was bound to.
        pool_id: PoolId,
        /// Shares remaining at burn (zero after a full drain).
        final_shares: u64,
    },
    /// Fees were claimed for a position.
    FeesClaimed {
        /// Claiming position.
        position_id: PositionId,
        /// Pool the fees came from.
        pool_id: PoolId,
        /// Token A claimed.
        amount_a: u64,
        /// Token B claimed.
        amount_b: u64,
        /// Whether the claim was part of an auto-compound.
        auto_compounded: bool,
    },
    /// Claimed fees were re-deposited into the pool.
    FeesCompounded {
        /// Compounding position.
        position_id: PositionId,
        /// Pool the fees were re-deposited into.
        pool_id: PoolId,
        /// Token A compounded.
        amount_a: u64,
        /// Token B compounded.
        amount_b: u64,
        /// Shares minted by the compounding deposit.
        new_shares: u64,
    },
    /// A position's share count changed.
    SharesUpdated {
        /// Affected position.
        position_id: PositionId,
        /// Share count before.
        old_shares: u64,
        /// Share count after.
        new_shares: u64,
    },
    /// A pool was registered under its canonical pair key.
    PoolRegistered {
        /// Registered pool.
        pool_id: PoolId,
        /// Lower-ordered token of the canonical pair.
        token_lo: TokenId,
        /// Higher-ordered token of the canonical pair.
        token_hi: TokenId,
        /// Fee tier component of the key.
        fee_bps: u64,
        /// Creating principal.
        creator: AccountId,
    },
    /// A registry entry was unlisted.
    PoolDeactivated {
        /// Affected pool.
        pool_id: PoolId,
    },
    /// A registry entry was relisted.
    PoolReactivated {
        /// Affected pool.
        pool_id: PoolId,
    },
}

/// Append-only event recorder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<AmmEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&mut self, event: AmmEvent) {
        self.events.push(event);
    }

    /// Returns all recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[AmmEvent] {
        &self.events
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns all recorded events, oldest first.
    pub fn drain(&mut self) -> Vec<AmmEvent> {
        core::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_read_in_order() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.record(AmmEvent::PoolDeactivated {
            pool_id: PoolId::new(1),
        });
        log.record(AmmEvent::PoolReactivated {
            pool_id: PoolId::new(1),
        });
        assert_eq!(log.len(), 2);
        assert!(matches!(log.events()[0], AmmEvent::PoolDeactivated { .. }));
        assert!(matches!(log.events()[1], AmmEvent::PoolReactivated { .. }));
    }

    #[test]
    fn drain_empties_the_log() {
        let mut log = EventLog::new();
        log.record(AmmEvent::SharesUpdated {
            position_id: PositionId::new(1),
            old_shares: 10,
            new_shares: 20,
        });
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }
}
