//! # Reef AMM
//!
//! Dual-curve automated market maker engine: constant-product and
//! stable-swap pools with transferable LP positions, lazy fee-index
//! distribution, slippage and price-impact protection, a canonical
//! pair/fee-tier registry, and auto-compounding of claimed fees.
//!
//! The engine is pure state-machine: it consumes reserves and amounts as
//! `u64` integers and never touches token custody, identity, transport, or
//! persistence — those are the host's collaborators. All pricing widens to
//! `u128` internally and truncates toward zero on the way back out.
//!
//! # Quick Start
//!
//! ```rust
//! use reef_amm::domain::{AccountId, TokenId};
//! use reef_amm::router::AmmRouter;
//!
//! let mut router = AmmRouter::new(AccountId::zero());
//! let usdc = TokenId::from_symbol("USDC");
//! let eth = TokenId::from_symbol("ETH");
//!
//! // Create, seed, and register a 30bp pool; the seeder gets a position.
//! let (pool_id, mut position) = router
//!     .create_pool_full(usdc, eth, 30, 1_000_000, 1_000_000, AccountId::zero(), 0)
//!     .expect("pool created");
//!
//! // Trade with 1% slippage protection.
//! let (amount_out, fee) = router
//!     .swap_auto_slippage(pool_id, 100_000, 100, true)
//!     .expect("swap executed");
//! assert!(amount_out > 0 && fee > 0);
//!
//! // The swap fee raised the pool's fee index; claim the position's cut.
//! let (claimed_a, _claimed_b) = router
//!     .claim_fees_for_position(pool_id, &mut position)
//!     .expect("claim settled");
//! assert!(claimed_a > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Router     │  user workflows: create+seed, add/remove, swap, claim
//! └──────┬───────┘
//!        │
//!   ┌────┴────┬──────────┬────────────┐
//!   ▼         ▼          ▼            ▼
//! Factory  Registry  Distributor  Pools (AnyPool)
//!   │                              ├─ ConstantProductPool
//!   │ id assignment, fee tiers,    └─ StableSwapPool
//!   │ pausing
//!   ▼
//! Positions (LpPosition) — owned by callers, mutated through operations
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Identifier newtypes: [`TokenId`](domain::TokenId), [`PoolId`](domain::PoolId), [`PairKey`](domain::PairKey), … |
//! | [`math`] | Widened integer arithmetic: `mul_div`, `isqrt`, `geometric_mean` |
//! | [`slippage`] | Min-out/max-in, price impact, deadline checks |
//! | [`position`] | [`LpPosition`](position::LpPosition) owned position object |
//! | [`traits`] | [`SwapPool`](traits::SwapPool) and [`LiquidityPool`](traits::LiquidityPool) seams |
//! | [`pools`] | The two curves plus [`AnyPool`](pools::AnyPool) dispatch |
//! | [`registry`] | Canonical pair/fee-tier registry |
//! | [`distributor`] | Lazy fee settlement and auto-compounding |
//! | [`factory`] | Validated pool creation and pausing |
//! | [`router`] | [`AmmRouter`](router::AmmRouter) composition root |
//! | [`events`] | State-transition events and the append-only log |
//! | [`config`] | [`RouterConfig`](config::RouterConfig) protection defaults |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`constants`] | Wire-visible protocol constants |
//! | [`prelude`] | Convenience re-exports |

#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod distributor;
pub mod domain;
pub mod error;
pub mod events;
pub mod factory;
pub mod math;
pub mod pools;
pub mod position;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod slippage;
pub mod traits;
