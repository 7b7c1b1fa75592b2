//! Pool implementations and the [`AnyPool`] dispatch enum.
//!
//! | Pool | Curve | Fee cap | Shares at seed |
//! |------|-------|---------|----------------|
//! | [`ConstantProductPool`] | `x · y = k` | 1000bp | `√(a · b)` |
//! | [`StableSwapPool`] | amplification blend | 100bp | `a + b` |
//!
//! Both pools follow the same fee-index discipline: 10% of every swap fee
//! accrues to the protocol bucket and the remainder raises the per-share
//! index on the input side.

pub mod constant_product;
pub mod stable_swap;

mod any_pool;

#[cfg(test)]
mod proptest_properties;

pub use any_pool::AnyPool;
pub use constant_product::ConstantProductPool;
pub use stable_swap::StableSwapPool;
