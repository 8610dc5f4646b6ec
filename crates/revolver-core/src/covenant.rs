//! Covenant checks over a fully priced scenario table.
//!
//! Two tests run against every period:
//! - DSCR floor: coverage strictly below the floor fails
//! - Utilization ceiling: balance / limit strictly above the ceiling fails
//!
//! The combined flag is the OR of the two. Boundary values pass both
//! tests. Coverage must already have been applied; checking covenants on
//! an uncovered table is an error, not a silent pass.

use crate::scenario::ScenarioTable;
use crate::types::{CovenantThresholds, FacilityConfig};
use crate::{RevolverError, RevolverResult};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fill the utilization and covenant flag columns of a scenario table.
///
/// Utilization divides by `revolver_limit`, so a zero-limit facility is
/// rejected up front. An undefined DSCR never fails the floor test.
pub fn evaluate_covenants(
    mut table: ScenarioTable,
    config: &FacilityConfig,
    thresholds: &CovenantThresholds,
) -> RevolverResult<ScenarioTable> {
    config.validate()?;
    if config.revolver_limit.is_zero() {
        return Err(RevolverError::DivisionByZero {
            context: "utilization (revolver_limit is zero)".to_string(),
        });
    }

    for row in table.rows.iter_mut() {
        let dscr = row.dscr.ok_or_else(|| {
            RevolverError::InsufficientData(format!(
                "Period {}: DSCR missing; coverage must run before covenant checks.",
                row.period
            ))
        })?;

        let utilization = row.revolver_balance / config.revolver_limit;
        let dscr_fail = dscr.breaches_floor(thresholds.dscr_floor);
        let util_fail = utilization > thresholds.util_limit;

        row.utilization = Some(utilization);
        row.dscr_fail = Some(dscr_fail);
        row.util_fail = Some(util_fail);
        row.covenant_fail = Some(dscr_fail || util_fail);
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::add_coverage;
    use crate::scenario::{run_rate_scenarios, ScenarioLabel, ScenarioTable};
    use crate::sweep::run_sweep;
    use crate::types::Money;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // -- Test helpers --------------------------------------------------------

    fn default_config() -> FacilityConfig {
        FacilityConfig {
            base_rate: dec!(0.05),
            spread: dec!(0.02),
            commitment_fee: dec!(0.005),
            revolver_limit: dec!(5_000_000),
            min_cash_target: dec!(50_000),
        }
    }

    fn covered_table(config: &FacilityConfig, forecast: &[Money], ebitda: &[Money]) -> ScenarioTable {
        let trajectory = run_sweep(config, forecast).unwrap();
        let mut tables = run_rate_scenarios(config, &trajectory).unwrap();
        let base = tables.remove(&ScenarioLabel::Base).unwrap();
        add_coverage(base, ebitda).unwrap()
    }

    fn uncovered_table(config: &FacilityConfig, forecast: &[Money]) -> ScenarioTable {
        let trajectory = run_sweep(config, forecast).unwrap();
        let mut tables = run_rate_scenarios(config, &trajectory).unwrap();
        tables.remove(&ScenarioLabel::Base).unwrap()
    }

    // -- Precondition tests --------------------------------------------------

    #[test]
    fn test_zero_limit_rejected() {
        let mut config = default_config();
        let table = covered_table(&config, &[dec!(90_000)], &[dec!(150_000)]);
        config.revolver_limit = Decimal::ZERO;
        let result = evaluate_covenants(table, &config, &CovenantThresholds::default());
        match result {
            Err(RevolverError::DivisionByZero { context }) => {
                assert!(context.contains("utilization"));
            }
            other => panic!("Expected DivisionByZero, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_limit_rejected() {
        let mut config = default_config();
        let table = covered_table(&config, &[dec!(90_000)], &[dec!(150_000)]);
        config.revolver_limit = dec!(-1);
        assert!(evaluate_covenants(table, &config, &CovenantThresholds::default()).is_err());
    }

    #[test]
    fn test_missing_dscr_rejected() {
        let config = default_config();
        let table = uncovered_table(&config, &[dec!(40_000)]);
        let result = evaluate_covenants(table, &config, &CovenantThresholds::default());
        match result {
            Err(RevolverError::InsufficientData(msg)) => {
                assert!(msg.contains("Period 1"));
            }
            other => panic!("Expected InsufficientData, got {:?}", other),
        }
    }

    // -- Utilization tests ---------------------------------------------------

    #[test]
    fn test_utilization_is_balance_over_limit() {
        let config = default_config();
        let table = covered_table(
            &config,
            &[dec!(40_000), dec!(60_000)],
            &[dec!(150_000), dec!(150_000)],
        );
        let checked = evaluate_covenants(table, &config, &CovenantThresholds::default()).unwrap();
        assert_eq!(checked.rows[0].utilization, Some(dec!(0.002)));
        assert_eq!(checked.rows[1].utilization, Some(Decimal::ZERO));
    }

    #[test]
    fn test_utilization_at_ceiling_passes() {
        let mut config = default_config();
        config.revolver_limit = dec!(100_000);
        config.min_cash_target = dec!(85_000);
        // Draw exactly 85k: utilization lands on the 0.85 ceiling.
        let table = covered_table(&config, &[dec!(0)], &[dec!(150_000)]);
        let checked = evaluate_covenants(table, &config, &CovenantThresholds::default()).unwrap();
        assert_eq!(checked.rows[0].utilization, Some(dec!(0.85)));
        assert_eq!(checked.rows[0].util_fail, Some(false));
    }

    #[test]
    fn test_utilization_above_ceiling_fails() {
        let mut config = default_config();
        config.revolver_limit = dec!(100_000);
        config.min_cash_target = dec!(90_000);
        let table = covered_table(&config, &[dec!(0)], &[dec!(150_000)]);
        let checked = evaluate_covenants(table, &config, &CovenantThresholds::default()).unwrap();
        assert_eq!(checked.rows[0].utilization, Some(dec!(0.90)));
        assert_eq!(checked.rows[0].util_fail, Some(true));
        assert_eq!(checked.rows[0].covenant_fail, Some(true));
    }

    // -- DSCR floor tests ----------------------------------------------------

    #[test]
    fn test_dscr_below_floor_fails() {
        let config = default_config();
        // EBITDA barely covers a fraction of the 25_650 period cost.
        let table = covered_table(&config, &[dec!(40_000)], &[dec!(20_000)]);
        let checked = evaluate_covenants(table, &config, &CovenantThresholds::default()).unwrap();
        assert_eq!(checked.rows[0].dscr_fail, Some(true));
        assert_eq!(checked.rows[0].covenant_fail, Some(true));
    }

    #[test]
    fn test_dscr_at_floor_passes() {
        let config = default_config();
        let thresholds = CovenantThresholds {
            dscr_floor: dec!(150_000) / dec!(25_650),
            util_limit: dec!(0.85),
        };
        let table = covered_table(&config, &[dec!(40_000)], &[dec!(150_000)]);
        let checked = evaluate_covenants(table, &config, &thresholds).unwrap();
        assert_eq!(checked.rows[0].dscr_fail, Some(false));
    }

    #[test]
    fn test_undefined_dscr_never_fails_floor() {
        let mut config = default_config();
        config.commitment_fee = Decimal::ZERO;
        // No balance and no fee: zero cost, undefined coverage.
        let table = covered_table(&config, &[dec!(90_000)], &[dec!(150_000)]);
        let thresholds = CovenantThresholds {
            dscr_floor: dec!(1_000_000),
            util_limit: dec!(0.85),
        };
        let checked = evaluate_covenants(table, &config, &thresholds).unwrap();
        assert_eq!(checked.rows[0].dscr_fail, Some(false));
        assert_eq!(checked.rows[0].covenant_fail, Some(false));
    }

    // -- Combined flag tests -------------------------------------------------

    #[test]
    fn test_combined_flag_is_or_of_failures() {
        let mut config = default_config();
        config.revolver_limit = dec!(20_000);
        config.min_cash_target = dec!(50_000);
        // Forecast 30k: draw 20k, utilization 1.0; tiny EBITDA fails DSCR too.
        let table = covered_table(&config, &[dec!(30_000)], &[dec!(100)]);
        let checked = evaluate_covenants(table, &config, &CovenantThresholds::default()).unwrap();
        let row = &checked.rows[0];
        assert_eq!(row.dscr_fail, Some(true));
        assert_eq!(row.util_fail, Some(true));
        assert_eq!(row.covenant_fail, Some(true));
    }

    #[test]
    fn test_healthy_periods_pass_everything() {
        let config = default_config();
        let table = covered_table(
            &config,
            &[dec!(40_000), dec!(60_000)],
            &[dec!(150_000), dec!(150_000)],
        );
        let checked = evaluate_covenants(table, &config, &CovenantThresholds::default()).unwrap();
        for row in &checked.rows {
            assert_eq!(row.dscr_fail, Some(false));
            assert_eq!(row.util_fail, Some(false));
            assert_eq!(row.covenant_fail, Some(false));
        }
    }

    #[test]
    fn test_empty_table_passes_through() {
        let config = default_config();
        let table = covered_table(&config, &[], &[]);
        let checked = evaluate_covenants(table, &config, &CovenantThresholds::default()).unwrap();
        assert!(checked.rows.is_empty());
    }
}
