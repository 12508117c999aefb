//! Step 11: apply the repair output computed in Step 3 to the active
//! perimeter. If Step 10 just lost a zone, repairs land on the new perimeter
//! — the crews fall back with the line. Clamped to base integrity.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content};

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &SimulationContext,
    log: &mut CausalityLog,
) {
    if ctx.repair_amount <= 0 {
        return;
    }

    let perim = state.active_perimeter();
    let base = content.zones[perim].base_integrity;
    let old_integrity = state.zones[perim].current_integrity;
    state.zones[perim].current_integrity = (old_integrity + ctx.repair_amount).min(base);
    let actual_repair = state.zones[perim].current_integrity - old_integrity;

    log.add_flat(
        CausalityCategory::Integrity,
        "Repairs Applied",
        actual_repair,
        format!(
            "Repaired {actual_repair} integrity on {}: {old_integrity} → {}/{base}",
            content.zones[perim].name, state.zones[perim].current_integrity
        ),
    );
}
