//! Step 9: unrest progression — stacking +1 conditions, idle-worker penalty,
//! Inner District growth damping, law cap.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content, INNER};

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
) {
    let mut unrest_delta = ctx.unrest_delta;

    if ctx.food_deficit {
        unrest_delta += 1;
        log.add_flat(
            CausalityCategory::Unrest,
            "Food Deficit",
            1,
            "Unrest +1 (food deficit)",
        );
    }
    if ctx.water_deficit {
        unrest_delta += 1;
        log.add_flat(
            CausalityCategory::Unrest,
            "Water Deficit",
            1,
            "Unrest +1 (water deficit)",
        );
    }
    if ctx.fuel_deficit {
        unrest_delta += 1;
        log.add_flat(
            CausalityCategory::Unrest,
            "Fuel Deficit",
            1,
            "Unrest +1 (fuel deficit)",
        );
    }
    if state.any_zone_overcrowded() {
        unrest_delta += 1;
        log.add_flat(
            CausalityCategory::Unrest,
            "Overcrowding",
            1,
            "Unrest +1 (overcrowding present)",
        );
    }
    if state.morale < 50 {
        unrest_delta += 1;
        log.add_flat(
            CausalityCategory::Unrest,
            "Low Morale (<50)",
            1,
            "Unrest +1 (morale < 50)",
        );
    }
    if state.days_since_last_law_enacted > 3 {
        unrest_delta += 1;
        log.add_flat(
            CausalityCategory::Unrest,
            "No Law in 3+ Days",
            1,
            "Unrest +1 (no law enacted recently)",
        );
    }

    // Idle hands: the thresholds are exclusive by magnitude, not cumulative.
    let idle_percent = state.idle_percent();
    if idle_percent > 20.0 {
        unrest_delta += 5;
        log.add_flat(
            CausalityCategory::Unrest,
            "Idle Workers (>20%)",
            5,
            format!("Unrest +5 (idle workers {idle_percent:.0}%)"),
        );
    } else if idle_percent > 10.0 {
        unrest_delta += 2;
        log.add_flat(
            CausalityCategory::Unrest,
            "Idle Workers (>10%)",
            2,
            format!("Unrest +2 (idle workers {idle_percent:.0}%)"),
        );
    }

    // The Inner District damps growth only — an already-calming day stays as is.
    if !state.zones[INNER].is_lost && unrest_delta > 0 {
        let before = unrest_delta;
        unrest_delta =
            (unrest_delta as f32 * content.zones[INNER].unrest_growth_modifier).floor() as i32;
        let reduction = before - unrest_delta;
        if reduction > 0 {
            log.add_flat(
                CausalityCategory::Unrest,
                "Inner District Intact (-10%)",
                -reduction,
                format!("Unrest reduced by {reduction} (Inner District -10% growth)"),
            );
        }
    }

    let old_unrest = state.unrest;
    state.unrest = (state.unrest + unrest_delta).clamp(0, 100);

    if let Some(cap) = ctx.unrest_cap {
        if state.unrest > cap {
            state.unrest = cap;
        }
    }

    log.add_flat(
        CausalityCategory::Unrest,
        "Net Unrest Change",
        state.unrest - old_unrest,
        format!("Unrest: {old_unrest} → {}", state.unrest),
    );
}
