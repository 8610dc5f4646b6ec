use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{RevolverError, RevolverResult};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Terms of a committed revolving credit facility.
///
/// All rates are annual and apply per period without day-count scaling;
/// the forecast's period length defines the accrual unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Floating reference rate before any shock is applied.
    pub base_rate: Rate,
    /// Credit spread charged over the reference rate on drawn balances.
    pub spread: Rate,
    /// Fee charged on the undrawn portion of the commitment.
    pub commitment_fee: Rate,
    /// Total committed facility size.
    pub revolver_limit: Money,
    /// Cash floor the liquidity sweep defends each period.
    pub min_cash_target: Money,
}

impl FacilityConfig {
    /// Checks the facility invariant: the commitment must not be negative.
    ///
    /// Rates and the cash target are deliberately unconstrained. Negative
    /// rates are a real market condition and flow through the arithmetic
    /// unchanged.
    pub fn validate(&self) -> RevolverResult<()> {
        if self.revolver_limit < Decimal::ZERO {
            return Err(RevolverError::InvalidInput {
                field: "revolver_limit".to_string(),
                reason: "Facility limit cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Covenant thresholds tested against every period of every scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CovenantThresholds {
    /// Minimum acceptable debt-service coverage ratio.
    pub dscr_floor: Decimal,
    /// Maximum acceptable utilization of the commitment.
    pub util_limit: Rate,
}

impl Default for CovenantThresholds {
    fn default() -> Self {
        Self {
            dscr_floor: dec!(1.10),
            util_limit: dec!(0.85),
        }
    }
}

/// Debt-service coverage for a single period.
///
/// When the period carries no debt-service cost at all the ratio has no
/// finite value; `Undefined` records that case explicitly instead of
/// overflowing or inventing a sentinel number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Dscr {
    /// EBITDA divided by total debt-service cost.
    Ratio(Decimal),
    /// Total debt-service cost was zero; coverage is unbounded.
    Undefined,
}

impl Dscr {
    /// Whether this coverage level breaches a covenant floor.
    ///
    /// An undefined ratio never breaches: with zero debt cost there is
    /// nothing left uncovered.
    pub fn breaches_floor(&self, floor: Decimal) -> bool {
        match self {
            Dscr::Ratio(r) => *r < floor,
            Dscr::Undefined => false,
        }
    }

    /// The finite ratio, if one exists.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Dscr::Ratio(r) => Some(*r),
            Dscr::Undefined => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
