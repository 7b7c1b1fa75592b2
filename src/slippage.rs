//! Trade protection: slippage bounds, price impact, deadlines.
//!
//! Pure functions with no pool state. The router wires them at operation
//! entry; pools use [`ensure_min_output`] inside the slippage-checked swap
//! path. Deadlines are checked once, at the boundary — never mid-operation.

use crate::constants::{BPS_DENOMINATOR, MAX_SLIPPAGE_BPS};
use crate::error::{AmmError, Result};
use crate::math::mul_wide;

/// Computes the minimum acceptable output for an expected amount:
/// `expected − expected · slippage_bps / 10 000`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidSlippageTolerance`] if `slippage_bps`
/// exceeds [`MAX_SLIPPAGE_BPS`].
pub fn min_output_for(expected: u64, slippage_bps: u64) -> Result<u64> {
    if slippage_bps > MAX_SLIPPAGE_BPS {
        return Err(AmmError::InvalidSlippageTolerance(slippage_bps));
    }
    let allowance = crate::math::bps_of(expected, slippage_bps);
    Ok(expected - allowance)
}

/// Computes the maximum acceptable input for an expected amount:
/// `expected + expected · slippage_bps / 10 000`.
///
/// The widened sum is narrowed with truncation, matching the engine-wide
/// arithmetic discipline.
#[must_use]
pub fn max_input_for(expected: u64, slippage_bps: u64) -> u64 {
    let allowance = mul_wide(expected, slippage_bps) / u128::from(BPS_DENOMINATOR);
    (u128::from(expected) + allowance) as u64
}

/// Fails if the executed output fell below the caller's minimum.
///
/// # Errors
///
/// Returns [`AmmError::SlippageExceeded`] iff `actual < minimum`.
pub fn ensure_min_output(actual: u64, minimum: u64) -> Result<()> {
    if actual < minimum {
        return Err(AmmError::SlippageExceeded { actual, minimum });
    }
    Ok(())
}

/// Fails if the consumed input rose above the caller's maximum.
///
/// # Errors
///
/// Returns [`AmmError::SlippageExceeded`] iff `actual > maximum`.
pub fn ensure_max_input(actual: u64, maximum: u64) -> Result<()> {
    if actual > maximum {
        return Err(AmmError::SlippageExceeded {
            actual,
            minimum: maximum,
        });
    }
    Ok(())
}

/// Quoted price impact of a trade, in basis points.
///
/// Compares the executed price against the pre-trade spot price:
/// `|reserve_out · amount_in − amount_out · reserve_in| · 10 000
/// / (reserve_out · amount_in)`, entirely in `u128`.
///
/// Returns 0 when `reserve_in` or `amount_in` is zero (no meaningful
/// reference price).
#[must_use]
pub fn price_impact_bps(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    amount_out: u64,
) -> u64 {
    if reserve_in == 0 || amount_in == 0 {
        return 0;
    }
    let spot = mul_wide(reserve_out, amount_in);
    let executed = mul_wide(amount_out, reserve_in);
    let diff = spot.abs_diff(executed);
    (diff * u128::from(BPS_DENOMINATOR) / spot) as u64
}

/// Fails if the quoted trade moves the price more than `max_bps`.
///
/// # Errors
///
/// Returns [`AmmError::PriceImpactTooHigh`] if the impact of the quoted
/// trade exceeds the ceiling.
pub fn ensure_price_impact(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    amount_out: u64,
    max_bps: u64,
) -> Result<()> {
    let actual_bps = price_impact_bps(reserve_in, reserve_out, amount_in, amount_out);
    if actual_bps > max_bps {
        return Err(AmmError::PriceImpactTooHigh {
            actual_bps,
            max_bps,
        });
    }
    Ok(())
}

/// Fails if `now` is past the deadline.
///
/// Both values use whatever monotone unit the host wires in (epoch or
/// timestamp); the inequality is the same either way.
///
/// # Errors
///
/// Returns [`AmmError::DeadlineExpired`] iff `now > deadline`.
pub fn ensure_deadline(now: u64, deadline: u64) -> Result<()> {
    if now > deadline {
        return Err(AmmError::DeadlineExpired);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- min_output_for / max_input_for ---------------------------------------

    #[test]
    fn min_output_basic() {
        // 1% of 100_000 = 1_000
        assert_eq!(min_output_for(100_000, 100), Ok(99_000));
    }

    #[test]
    fn min_output_zero_tolerance() {
        assert_eq!(min_output_for(100_000, 0), Ok(100_000));
    }

    #[test]
    fn min_output_never_exceeds_expected() {
        for bps in [0, 1, 100, 2_500, 5_000] {
            let Ok(min) = min_output_for(987_654, bps) else {
                panic!("tolerance {bps} should be accepted");
            };
            assert!(min <= 987_654);
        }
    }

    #[test]
    fn min_output_rejects_excessive_tolerance() {
        assert_eq!(
            min_output_for(1_000, 5_001),
            Err(AmmError::InvalidSlippageTolerance(5_001))
        );
    }

    #[test]
    fn max_input_basic() {
        // +1% of 100_000
        assert_eq!(max_input_for(100_000, 100), 101_000);
    }

    #[test]
    fn max_input_truncates() {
        // 30bp of 1 = 0.003 → allowance 0
        assert_eq!(max_input_for(1, 30), 1);
    }

    // -- enforcement ----------------------------------------------------------

    #[test]
    fn ensure_min_output_boundary() {
        assert!(ensure_min_output(100, 100).is_ok());
        assert!(ensure_min_output(101, 100).is_ok());
        assert_eq!(
            ensure_min_output(99, 100),
            Err(AmmError::SlippageExceeded {
                actual: 99,
                minimum: 100
            })
        );
    }

    #[test]
    fn ensure_max_input_boundary() {
        assert!(ensure_max_input(100, 100).is_ok());
        assert!(ensure_max_input(99, 100).is_ok());
        assert!(ensure_max_input(101, 100).is_err());
    }

    // -- price impact ---------------------------------------------------------

    #[test]
    fn impact_zero_for_empty_reference() {
        assert_eq!(price_impact_bps(0, 1_000, 100, 90), 0);
        assert_eq!(price_impact_bps(1_000, 1_000, 0, 0), 0);
    }

    #[test]
    fn impact_zero_for_spot_execution() {
        // Executed exactly at spot: 1:1 pool, in 100 out 100.
        assert_eq!(price_impact_bps(1_000, 1_000, 100, 100), 0);
    }

    #[test]
    fn impact_grows_with_trade_size() {
        // 1:1 pool of 1M; CP output without fees.
        let quote = |ain: u64| {
            let out = crate::math::mul_div(ain, 1_000_000, 1_000_000 + ain);
            price_impact_bps(1_000_000, 1_000_000, ain, out)
        };
        assert!(quote(10_000) < quote(100_000));
        assert!(quote(100_000) < quote(500_000));
    }

    #[test]
    fn impact_of_balanced_large_trade() {
        // in 100k against 1M/1M, out = 1M·100k/1.1M = 90_909
        // impact = (100_000 − 90_909) / 100_000 ≈ 909bp
        let impact = price_impact_bps(1_000_000, 1_000_000, 100_000, 90_909);
        assert!((900..=920).contains(&impact), "impact = {impact}");
    }

    #[test]
    fn ensure_price_impact_enforces_ceiling() {
        assert!(ensure_price_impact(1_000_000, 1_000_000, 1_000, 999, 500).is_ok());
        let res = ensure_price_impact(1_000_000, 1_000_000, 100_000, 90_909, 500);
        assert!(matches!(
            res,
            Err(AmmError::PriceImpactTooHigh { max_bps: 500, .. })
        ));
    }

    // -- deadline -------------------------------------------------------------

    #[test]
    fn deadline_boundary() {
        assert!(ensure_deadline(10, 10).is_ok());
        assert!(ensure_deadline(9, 10).is_ok());
        assert_eq!(ensure_deadline(11, 10), Err(AmmError::DeadlineExpired));
    }
}
