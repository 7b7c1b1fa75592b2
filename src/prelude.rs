//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use reef_amm::prelude::*;
//! ```

pub use crate::config::RouterConfig;
pub use crate::constants::{
    BPS_DENOMINATOR, CP_FEE_TIERS, MAX_AMP, MAX_SLIPPAGE_BPS, MINIMUM_LIQUIDITY,
    PROTOCOL_FEE_BPS,
};
pub use crate::distributor::FeeDistributor;
pub use crate::domain::{AccountId, PairKey, PoolId, PositionId, TokenId};
pub use crate::error::{AmmError, Result};
pub use crate::events::{AmmEvent, EventLog};
pub use crate::factory::PoolFactory;
pub use crate::pools::{AnyPool, ConstantProductPool, StableSwapPool};
pub use crate::position::LpPosition;
pub use crate::registry::{PoolEntry, PoolRegistry};
pub use crate::router::AmmRouter;
pub use crate::traits::{LiquidityPool, SwapPool};
