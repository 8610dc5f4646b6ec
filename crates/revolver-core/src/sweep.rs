//! Liquidity sweep against a revolving credit facility.
//!
//! Walks an ordered cash forecast period by period:
//! - Cash below the minimum target triggers a facility draw for the
//!   shortfall, capped at the remaining headroom under the limit
//! - Cash above the target repays outstanding balance from the surplus,
//!   capped at the balance itself
//! - The facility balance carries from each period into the next and
//!   never leaves the `[0, revolver_limit]` band
//!
//! All calculations use `rust_decimal::Decimal` for precision. No `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{FacilityConfig, Money};
use crate::RevolverResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One period of the liquidity sweep trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPeriod {
    /// Period number (1-based).
    pub period: u32,
    /// Forecast cash before any facility activity.
    pub cash_forecast: Money,
    /// Amount drawn from the facility this period.
    pub draw: Money,
    /// Amount repaid to the facility this period.
    pub repayment: Money,
    /// Outstanding facility balance after this period's activity.
    pub revolver_balance: Money,
    /// True when the facility ran out of headroom and the draw could not
    /// cover the full cash shortfall.
    pub shortfall_unmet: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the liquidity sweep over a cash forecast.
///
/// Periods are processed strictly in forecast order starting from a zero
/// facility balance. At most one of `draw` and `repayment` is non-zero in
/// any period: cash exactly at the minimum target triggers neither, and a
/// surplus with nothing outstanding repays nothing.
///
/// An empty forecast yields an empty trajectory.
pub fn run_sweep(config: &FacilityConfig, forecast: &[Money]) -> RevolverResult<Vec<SweepPeriod>> {
    config.validate()?;

    let mut trajectory: Vec<SweepPeriod> = Vec::with_capacity(forecast.len());
    let mut balance = Decimal::ZERO;

    for (idx, &cash) in forecast.iter().enumerate() {
        let mut draw = Decimal::ZERO;
        let mut repayment = Decimal::ZERO;
        let mut shortfall_unmet = false;

        if cash < config.min_cash_target {
            let shortfall = config.min_cash_target - cash;
            let headroom = config.revolver_limit - balance;
            draw = shortfall.min(headroom).max(Decimal::ZERO);
            balance += draw;
            shortfall_unmet = draw < shortfall;
        } else if cash > config.min_cash_target && balance > Decimal::ZERO {
            let surplus = cash - config.min_cash_target;
            repayment = surplus.min(balance);
            balance -= repayment;
        }

        trajectory.push(SweepPeriod {
            period: (idx as u32) + 1,
            cash_forecast: cash,
            draw,
            repayment,
            revolver_balance: balance,
            shortfall_unmet,
        });
    }

    Ok(trajectory)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
