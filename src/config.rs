//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_PRICE_IMPACT_BPS, MAX_SLIPPAGE_BPS};
use crate::error::{AmmError, Result};

/// Protection defaults the router applies on behalf of callers.
///
/// Validated at construction; [`Default`] uses the wire constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    max_price_impact_bps: u64,
    add_tolerance_bps: u64,
}

impl RouterConfig {
    /// Creates a validated configuration.
    ///
    /// `max_price_impact_bps` caps the quoted impact of guarded swaps;
    /// `add_tolerance_bps` is the ratio tolerance used when the router
    /// deposits on a caller's behalf (auto-compounding).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidSlippageTolerance`] if either knob
    /// exceeds [`MAX_SLIPPAGE_BPS`].
    pub fn new(max_price_impact_bps: u64, add_tolerance_bps: u64) -> Result<Self> {
        if max_price_impact_bps > MAX_SLIPPAGE_BPS {
            return Err(AmmError::InvalidSlippageTolerance(max_price_impact_bps));
        }
        if add_tolerance_bps > MAX_SLIPPAGE_BPS {
            return Err(AmmError::InvalidSlippageTolerance(add_tolerance_bps));
        }
        Ok(Self {
            max_price_impact_bps,
            add_tolerance_bps,
        })
    }

    /// Ceiling on quoted price impact for guarded swaps, in basis points.
    #[must_use]
    pub const fn max_price_impact_bps(&self) -> u64 {
        self.max_price_impact_bps
    }

    /// Ratio tolerance for router-initiated deposits, in basis points.
    #[must_use]
    pub const fn add_tolerance_bps(&self) -> u64 {
        self.add_tolerance_bps
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_price_impact_bps: DEFAULT_MAX_PRICE_IMPACT_BPS,
            add_tolerance_bps: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_wire_constants() {
        let config = RouterConfig::default();
        assert_eq!(config.max_price_impact_bps(), 500);
        assert_eq!(config.add_tolerance_bps(), 100);
    }

    #[test]
    fn validated_construction() {
        assert!(RouterConfig::new(500, 100).is_ok());
        assert_eq!(
            RouterConfig::new(5_001, 100),
            Err(AmmError::InvalidSlippageTolerance(5_001))
        );
        assert_eq!(
            RouterConfig::new(500, 9_999),
            Err(AmmError::InvalidSlippageTolerance(9_999))
        );
    }
}
