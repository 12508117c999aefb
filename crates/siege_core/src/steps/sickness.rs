//! Step 7: sickness progression.
//!
//! Net change is +2 base plus accumulated deltas minus the treatment term.
//! Treatment scales with current severity — sanitation and clinic crews can
//! slow an epidemic, never erase it outright. Triage deaths apply after the
//! meter update.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::population;
use crate::types::ColonyState;

pub(crate) fn execute(state: &mut ColonyState, ctx: &mut SimulationContext, log: &mut CausalityLog) {
    let base_sickness = 2;
    let treatment = ((ctx.sanitation_units + ctx.clinic_units) as f32
        * 0.10
        * state.sickness as f32)
        .round() as i32;
    let total_change = base_sickness + ctx.sickness_delta - treatment;

    log.add_flat(
        CausalityCategory::Sickness,
        "Base Sickness",
        base_sickness,
        "Sickness +2/day (base)",
    );
    if treatment > 0 {
        log.add_flat(
            CausalityCategory::Sickness,
            "Treatment",
            -treatment,
            format!(
                "Sickness -{treatment} (sanitation {} + clinic {} units at severity {})",
                ctx.sanitation_units, ctx.clinic_units, state.sickness
            ),
        );
    }

    let old_sickness = state.sickness;
    state.sickness = (state.sickness + total_change).clamp(0, 100);

    log.add_flat(
        CausalityCategory::Sickness,
        "Net Sickness Change",
        state.sickness - old_sickness,
        format!(
            "Sickness: {old_sickness} → {} (net {total_change}: base +{base_sickness}, modifiers {:+}, treatment -{treatment})",
            state.sickness, ctx.sickness_delta
        ),
    );

    if ctx.deaths_sick > 0 {
        population::apply_deaths_sick_only(state, ctx.deaths_sick, log, "Medical Triage (L9)");
    }
}
