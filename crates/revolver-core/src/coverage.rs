//! Debt-service coverage over a priced scenario table.
//!
//! Pairs each period's EBITDA with the period's total debt-service cost
//! and records the DSCR. A period with zero total cost has unbounded
//! coverage and is recorded as [`Dscr::Undefined`] rather than a number.

use crate::scenario::ScenarioTable;
use crate::types::{Dscr, Money};
use crate::{RevolverError, RevolverResult};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fill the EBITDA and DSCR columns of a scenario table.
///
/// `ebitda_forecast` must be aligned with the table period for period;
/// a length mismatch is rejected before any row is touched. The table is
/// taken by value and returned augmented, leaving sibling scenarios
/// untouched.
pub fn add_coverage(
    mut table: ScenarioTable,
    ebitda_forecast: &[Money],
) -> RevolverResult<ScenarioTable> {
    if ebitda_forecast.len() != table.rows.len() {
        return Err(RevolverError::ShapeMismatch {
            context: "ebitda_forecast".to_string(),
            expected: table.rows.len(),
            actual: ebitda_forecast.len(),
        });
    }

    for (row, &ebitda) in table.rows.iter_mut().zip(ebitda_forecast.iter()) {
        row.ebitda = Some(ebitda);
        row.dscr = Some(if row.total_cost.is_zero() {
            Dscr::Undefined
        } else {
            Dscr::Ratio(ebitda / row.total_cost)
        });
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
