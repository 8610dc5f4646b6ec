//! Fixed-rate hedge overlay on a scenario table.
//!
//! Splits each period's outstanding balance into a hedged portion
//! (swapped to a fixed rate) and a floating remainder, and prices the
//! fixed leg. The overlay is informational: it does not change the
//! floating-rate interest already priced into the table.

use rust_decimal::Decimal;

use crate::scenario::ScenarioTable;
use crate::types::Rate;
use crate::{RevolverError, RevolverResult};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fill the hedge columns of a scenario table.
///
/// `hedge_percent` is the fraction of the balance swapped to fixed and
/// must lie in `[0, 1]`. `fixed_rate` is the swap's fixed leg; negative
/// fixed rates are accepted. For every period:
/// hedged + floating = revolver_balance, exactly.
pub fn apply_hedge(
    mut table: ScenarioTable,
    hedge_percent: Rate,
    fixed_rate: Rate,
) -> RevolverResult<ScenarioTable> {
    if hedge_percent < Decimal::ZERO || hedge_percent > Decimal::ONE {
        return Err(RevolverError::InvalidInput {
            field: "hedge_percent".to_string(),
            reason: "Hedge percent must be between 0 and 1".to_string(),
        });
    }

    for row in table.rows.iter_mut() {
        let hedged = row.revolver_balance * hedge_percent;
        row.hedged_balance = Some(hedged);
        row.floating_balance = Some(row.revolver_balance - hedged);
        row.swap_fixed_cost = Some(hedged * fixed_rate);
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
