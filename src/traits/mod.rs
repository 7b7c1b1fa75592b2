//! Core trait abstractions for pool operations.
//!
//! [`SwapPool`] covers quoting and executing swaps; [`LiquidityPool`]
//! extends it with share management, fee indices, and the protocol-fee
//! buckets. Both pool curves and the [`AnyPool`](crate::pools::AnyPool)
//! dispatch enum implement both traits.

mod liquidity_pool;
mod swap_pool;

pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
