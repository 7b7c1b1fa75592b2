//! Identifier value types used throughout the engine.
//!
//! Pools, positions, tokens, and principals are all referenced through
//! opaque newtypes with validated constructors. Amounts, shares, and fee
//! indices stay raw `u64` — the arithmetic discipline for those lives in
//! [`crate::math`].

mod account_id;
mod pair_key;
mod pool_id;
mod position_id;
mod token_id;

pub use account_id::AccountId;
pub use pair_key::PairKey;
pub use pool_id::PoolId;
pub use position_id::PositionId;
pub use token_id::TokenId;
