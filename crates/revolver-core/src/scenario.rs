//! Rate-shock scenarios over a sweep trajectory.
//!
//! Fans a single liquidity sweep out into four parallel-shift rate
//! scenarios (base, +25bps, +50bps, +100bps) and prices each period:
//! - Interest on the drawn balance at base rate + shock + spread
//! - Commitment fee on the undrawn portion of the limit
//! - Total debt-service cost as the sum of the two
//!
//! Each scenario owns an independent table; later pipeline stages mutate
//! one table without touching the others.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sweep::SweepPeriod;
use crate::types::{Dscr, FacilityConfig, Money, Rate};
use crate::RevolverResult;

// ---------------------------------------------------------------------------
// Scenario labels
// ---------------------------------------------------------------------------

/// Parallel rate-shift scenarios, ordered by shock size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ScenarioLabel {
    Base,
    #[serde(rename = "+25bps")]
    Plus25Bps,
    #[serde(rename = "+50bps")]
    Plus50Bps,
    #[serde(rename = "+100bps")]
    Plus100Bps,
}

impl ScenarioLabel {
    /// Every scenario, in ascending shock order.
    pub const ALL: [ScenarioLabel; 4] = [
        ScenarioLabel::Base,
        ScenarioLabel::Plus25Bps,
        ScenarioLabel::Plus50Bps,
        ScenarioLabel::Plus100Bps,
    ];

    /// Parallel shift added to the base rate under this scenario.
    pub fn shock(&self) -> Rate {
        match self {
            ScenarioLabel::Base => Decimal::ZERO,
            ScenarioLabel::Plus25Bps => dec!(0.0025),
            ScenarioLabel::Plus50Bps => dec!(0.0050),
            ScenarioLabel::Plus100Bps => dec!(0.0100),
        }
    }
}

impl std::fmt::Display for ScenarioLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioLabel::Base => write!(f, "Base"),
            ScenarioLabel::Plus25Bps => write!(f, "+25bps"),
            ScenarioLabel::Plus50Bps => write!(f, "+50bps"),
            ScenarioLabel::Plus100Bps => write!(f, "+100bps"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One priced period within a scenario.
///
/// The sweep columns are copied in; the cost columns are computed here.
/// Coverage, hedge and covenant columns start as `None` and are filled by
/// the corresponding pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// Period number (1-based), copied from the sweep.
    pub period: u32,
    /// Forecast cash before facility activity.
    pub cash_forecast: Money,
    /// Facility draw this period.
    pub draw: Money,
    /// Facility repayment this period.
    pub repayment: Money,
    /// Outstanding balance after this period's activity.
    pub revolver_balance: Money,
    /// True when the draw could not cover the full shortfall.
    pub shortfall_unmet: bool,
    /// Interest on the outstanding balance at the scenario's all-in rate.
    pub interest_cost: Money,
    /// Commitment fee on the undrawn portion of the limit.
    pub unused_fee: Money,
    /// Interest plus unused fee.
    pub total_cost: Money,
    /// EBITDA for the period, once coverage has been applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<Money>,
    /// Debt-service coverage, once coverage has been applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr: Option<Dscr>,
    /// Balance swapped to fixed, once the hedge overlay has been applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hedged_balance: Option<Money>,
    /// Balance left floating, once the hedge overlay has been applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_balance: Option<Money>,
    /// Fixed-leg cost on the hedged balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_fixed_cost: Option<Money>,
    /// Balance as a fraction of the limit, once covenants have run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<Rate>,
    /// DSCR covenant breach flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr_fail: Option<bool>,
    /// Utilization covenant breach flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub util_fail: Option<bool>,
    /// Either covenant breached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covenant_fail: Option<bool>,
}

/// A fully independent per-scenario table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioTable {
    /// Which rate scenario this table prices.
    pub label: ScenarioLabel,
    /// base_rate + shock + spread; the rate the drawn balance accrues at.
    pub all_in_rate: Rate,
    /// One row per sweep period, in period order.
    pub rows: Vec<ScenarioRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a sweep trajectory under all four rate scenarios.
///
/// Every scenario copies the same trajectory; only the all-in rate (and
/// therefore the interest cost) differs. The unused fee depends only on
/// the balance and the limit, so it is identical across scenarios. The
/// fee base is clamped at zero should the balance ever sit above the
/// limit.
pub fn run_rate_scenarios(
    config: &FacilityConfig,
    trajectory: &[SweepPeriod],
) -> RevolverResult<BTreeMap<ScenarioLabel, ScenarioTable>> {
    config.validate()?;

    let mut tables = BTreeMap::new();
    for label in ScenarioLabel::ALL {
        let all_in_rate = config.base_rate + label.shock() + config.spread;
        let rows: Vec<ScenarioRow> = trajectory
            .iter()
            .map(|p| price_period(p, all_in_rate, config))
            .collect();
        tables.insert(
            label,
            ScenarioTable {
                label,
                all_in_rate,
                rows,
            },
        );
    }
    Ok(tables)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn price_period(p: &SweepPeriod, all_in_rate: Rate, config: &FacilityConfig) -> ScenarioRow {
    let interest_cost = p.revolver_balance * all_in_rate;
    let undrawn = (config.revolver_limit - p.revolver_balance).max(Decimal::ZERO);
    let unused_fee = undrawn * config.commitment_fee;

    ScenarioRow {
        period: p.period,
        cash_forecast: p.cash_forecast,
        draw: p.draw,
        repayment: p.repayment,
        revolver_balance: p.revolver_balance,
        shortfall_unmet: p.shortfall_unmet,
        interest_cost,
        unused_fee,
        total_cost: interest_cost + unused_fee,
        ebitda: None,
        dscr: None,
        hedged_balance: None,
        floating_balance: None,
        swap_fixed_cost: None,
        utilization: None,
        dscr_fail: None,
        util_fail: None,
        covenant_fail: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
