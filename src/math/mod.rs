//! Widened integer arithmetic for AMM pricing.
//!
//! Every `u64 × u64` product inside the engine widens to `u128` before
//! dividing, and the final narrowing back to `u64` truncates toward zero
//! (standard AMM convention). Division by zero is prevented by guards at
//! every call site; reaching one here is a fatal programming error, so the
//! helpers panic rather than propagate.

use crate::constants::BPS_DENOMINATOR;

/// Widens two `u64` factors into their exact `u128` product.
#[inline]
#[must_use]
pub const fn mul_wide(a: u64, b: u64) -> u128 {
    a as u128 * b as u128
}

/// Computes `a · b / denom` with a widened intermediate product.
///
/// The quotient is truncated toward zero and narrowed back to `u64`; the
/// narrowing is exact in every engine call site because the result is
/// bounded by a reserve or share total.
///
/// # Panics
///
/// Panics if `denom` is zero. Callers guard the denominator first.
#[inline]
#[must_use]
pub const fn mul_div(a: u64, b: u64, denom: u64) -> u64 {
    (mul_wide(a, b) / denom as u128) as u64
}

/// Integer square root via Newton's iteration.
///
/// Starts from `n` itself and iterates `y = (x + n/x) / 2` until the
/// estimate stops decreasing. Exact for perfect squares, floor otherwise.
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Geometric mean of two amounts: `⌊√(a · b)⌋`.
///
/// Used for initial constant-product share pricing. The result always
/// fits in `u64` because it is bounded by `max(a, b)`.
#[inline]
#[must_use]
pub const fn geometric_mean(a: u64, b: u64) -> u64 {
    isqrt(mul_wide(a, b)) as u64
}

/// Computes `amount · bps / 10 000`, truncating.
#[inline]
#[must_use]
pub const fn bps_of(amount: u64, bps: u64) -> u64 {
    mul_div(amount, bps, BPS_DENOMINATOR)
}
