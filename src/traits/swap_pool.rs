//! Swap execution trait.

use crate::domain::PoolId;
use crate::error::Result;
use crate::slippage::ensure_min_output;

/// Trait for pools that quote and execute swaps.
///
/// A swap is atomic: the reserve updates, volume counter, and fee-index
/// accrual of one call are observable only as a single transition, and any
/// pre-condition failure aborts before state changes. `amount_in` is always
/// denominated in the source-side token selected by `a_to_b`.
pub trait SwapPool {
    /// Returns the pool identifier.
    fn id(&self) -> PoolId;

    /// Returns the pool fee in basis points.
    fn fee_bps(&self) -> u64;

    /// Returns the current reserves as `(reserve_a, reserve_b)`.
    fn reserves(&self) -> (u64, u64);

    /// Returns lifetime input volume per side as `(volume_a, volume_b)`.
    ///
    /// Analytics counters only; no invariant depends on them.
    fn cumulative_volumes(&self) -> (u64, u64);

    /// Quotes a swap without executing it.
    ///
    /// Returns `(amount_out, fee)`. The output may quote as zero for dust
    /// inputs after fee deduction; executing such a trade is rejected by
    /// [`swap`](Self::swap).
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmountIn`](crate::error::AmmError::ZeroAmountIn)
    ///   for a zero input.
    /// - [`AmmError::ZeroLiquidity`](crate::error::AmmError::ZeroLiquidity)
    ///   if either reserve is empty.
    fn get_amount_out(&self, amount_in: u64, a_to_b: bool) -> Result<(u64, u64)>;

    /// Executes a swap, returning `(amount_out, fee)`.
    ///
    /// # Errors
    ///
    /// Everything [`get_amount_out`](Self::get_amount_out) reports, plus
    /// [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    /// when the trade would produce nothing or drain the output reserve.
    fn swap(&mut self, amount_in: u64, a_to_b: bool) -> Result<(u64, u64)>;

    /// Executes a swap, failing if the output falls below `min_amount_out`.
    ///
    /// The quote is checked *before* any state change; a slippage failure
    /// leaves the pool untouched.
    ///
    /// # Errors
    ///
    /// Everything [`swap`](Self::swap) reports, plus
    /// [`AmmError::SlippageExceeded`](crate::error::AmmError::SlippageExceeded).
    fn swap_with_min_output(
        &mut self,
        amount_in: u64,
        a_to_b: bool,
        min_amount_out: u64,
    ) -> Result<(u64, u64)> {
        let (expected, _fee) = self.get_amount_out(amount_in, a_to_b)?;
        ensure_min_output(expected, min_amount_out)?;
        self.swap(amount_in, a_to_b)
    }
}
