//! Step 8: morale progression — conditional drift, Keep bonus, recovery.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content, KEEP};

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
) {
    let mut morale_delta = ctx.morale_delta;

    if state.sickness > 60 {
        morale_delta -= 3;
        log.add_flat(
            CausalityCategory::Morale,
            "High Sickness (>60)",
            -3,
            "Morale -3 (sickness > 60)",
        );
    }

    if state.any_zone_overcrowded() {
        morale_delta -= 2;
        log.add_flat(
            CausalityCategory::Morale,
            "Overcrowding",
            -2,
            "Morale -2 (overcrowding present)",
        );
    }

    if !state.zones[KEEP].is_lost {
        let bonus = content.zones[KEEP].morale_bonus;
        morale_delta += bonus;
        log.add_flat(
            CausalityCategory::Morale,
            "Keep Intact",
            bonus,
            format!("Morale +{bonus} (Keep intact)"),
        );
    }

    // A quiet day: everyone fed, housed, healthy enough, and calm enough.
    let no_deficits = state.food > 0 && state.water > 0 && state.fuel > 0;
    let no_overcrowding = !state.any_zone_overcrowded();
    if no_deficits && no_overcrowding && state.sickness < 30 && state.unrest < 40 {
        morale_delta += 2;
        log.add_flat(
            CausalityCategory::Morale,
            "Recovery",
            2,
            "Morale +2 (no deficits, no overcrowding, sickness <30, unrest <40)",
        );
    }

    let old_morale = state.morale;
    state.morale = (state.morale + morale_delta).clamp(0, 100);

    if let Some(cap) = ctx.morale_cap {
        if state.morale > cap {
            state.morale = cap;
        }
    }

    log.add_flat(
        CausalityCategory::Morale,
        "Net Morale Change",
        state.morale - old_morale,
        format!("Morale: {old_morale} → {}", state.morale),
    );
}
