//! End-to-end revolver analysis.
//!
//! Chains the full pipeline for a single set of facility terms:
//! sweep, rate-scenario fan-out, coverage, hedge overlay, covenant
//! checks. Produces the four fully populated scenario tables plus a
//! compact per-scenario summary suitable for reporting.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coverage::add_coverage;
use crate::covenant::evaluate_covenants;
use crate::hedge::apply_hedge;
use crate::scenario::{run_rate_scenarios, ScenarioLabel, ScenarioTable};
use crate::sweep::run_sweep;
use crate::types::{CovenantThresholds, FacilityConfig, Money, Rate};
use crate::RevolverResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for a full revolver analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevolverAnalysisInput {
    /// Facility terms.
    pub facility: FacilityConfig,
    /// Forecast cash per period, in period order.
    pub liquidity_forecast: Vec<Money>,
    /// EBITDA per period; must match the forecast length.
    pub ebitda_forecast: Vec<Money>,
    /// Fraction of the outstanding balance swapped to fixed (0-1).
    pub hedge_percent: Rate,
    /// Fixed leg of the swap.
    pub fixed_rate: Rate,
    /// Covenant thresholds; defaults to a 1.10 DSCR floor and an 0.85
    /// utilization ceiling when omitted.
    #[serde(default)]
    pub covenants: CovenantThresholds,
}

/// Output of a full revolver analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevolverAnalysisOutput {
    /// Fully populated per-scenario tables, keyed by scenario.
    pub scenarios: BTreeMap<ScenarioLabel, ScenarioTable>,
    /// One summary per scenario, in ascending shock order.
    pub summaries: Vec<ScenarioSummary>,
}

/// Horizon-level aggregates for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Which scenario this summarises.
    pub label: ScenarioLabel,
    /// The scenario's all-in drawn rate.
    pub all_in_rate: Rate,
    /// Interest over the whole horizon.
    pub total_interest_cost: Money,
    /// Unused fees over the whole horizon.
    pub total_unused_fee: Money,
    /// Interest plus unused fees over the whole horizon.
    pub total_cost: Money,
    /// Highest outstanding balance reached.
    pub peak_balance: Money,
    /// Highest utilization reached.
    pub peak_utilization: Rate,
    /// Number of periods with a facility draw.
    pub draw_periods: u32,
    /// Number of periods breaching at least one covenant.
    pub breach_periods: u32,
    /// True when any period breaches a covenant.
    pub any_covenant_breach: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the complete analysis pipeline.
///
/// The sweep runs once; each rate scenario is then covered, hedged and
/// covenant-checked independently. The first stage to reject its input
/// aborts the whole analysis. An empty forecast is valid and produces
/// four empty tables with all-zero summaries.
pub fn run_revolver_analysis(
    input: &RevolverAnalysisInput,
) -> RevolverResult<RevolverAnalysisOutput> {
    let trajectory = run_sweep(&input.facility, &input.liquidity_forecast)?;
    let tables = run_rate_scenarios(&input.facility, &trajectory)?;

    let mut scenarios = BTreeMap::new();
    let mut summaries = Vec::with_capacity(ScenarioLabel::ALL.len());

    for (label, table) in tables {
        let table = add_coverage(table, &input.ebitda_forecast)?;
        let table = apply_hedge(table, input.hedge_percent, input.fixed_rate)?;
        let table = evaluate_covenants(table, &input.facility, &input.covenants)?;
        summaries.push(summarize(&table));
        scenarios.insert(label, table);
    }

    Ok(RevolverAnalysisOutput {
        scenarios,
        summaries,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn summarize(table: &ScenarioTable) -> ScenarioSummary {
    let mut total_interest_cost = Decimal::ZERO;
    let mut total_unused_fee = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;
    let mut peak_balance = Decimal::ZERO;
    let mut peak_utilization = Decimal::ZERO;
    let mut draw_periods: u32 = 0;
    let mut breach_periods: u32 = 0;

    for row in &table.rows {
        total_interest_cost += row.interest_cost;
        total_unused_fee += row.unused_fee;
        total_cost += row.total_cost;

        if row.revolver_balance > peak_balance {
            peak_balance = row.revolver_balance;
        }
        if let Some(utilization) = row.utilization {
            if utilization > peak_utilization {
                peak_utilization = utilization;
            }
        }
        if row.draw > Decimal::ZERO {
            draw_periods += 1;
        }
        if row.covenant_fail == Some(true) {
            breach_periods += 1;
        }
    }

    ScenarioSummary {
        label: table.label,
        all_in_rate: table.all_in_rate,
        total_interest_cost,
        total_unused_fee,
        total_cost,
        peak_balance,
        peak_utilization,
        draw_periods,
        breach_periods,
        any_covenant_breach: breach_periods > 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
