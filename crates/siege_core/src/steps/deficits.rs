//! Step 5: penalties for resources that hit zero in the consumption step,
//! plus the consecutive-day counters feeding the Hunger Riot event and the
//! Total Collapse loss condition.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::ColonyState;

pub(crate) fn execute(state: &mut ColonyState, ctx: &mut SimulationContext, log: &mut CausalityLog) {
    if ctx.food_deficit {
        ctx.morale_delta -= 5;
        state.consecutive_food_deficit_days += 1;
        log.add_flat(
            CausalityCategory::Morale,
            "Food Deficit",
            -5,
            "Morale -5 (food deficit)",
        );
    } else {
        state.consecutive_food_deficit_days = 0;
    }

    if ctx.water_deficit {
        ctx.morale_delta -= 5;
        log.add_flat(
            CausalityCategory::Morale,
            "Water Deficit",
            -5,
            "Morale -5 (water deficit)",
        );
    }

    if ctx.fuel_deficit {
        ctx.sickness_delta += 10;
        ctx.morale_delta -= 10;
        ctx.unrest_delta += 5;
        log.add_flat(
            CausalityCategory::Sickness,
            "Fuel Deficit",
            10,
            "Sickness +10 (no fuel)",
        );
        log.add_flat(
            CausalityCategory::Morale,
            "Fuel Deficit",
            -10,
            "Morale -10 (no fuel)",
        );
        log.add_flat(
            CausalityCategory::Unrest,
            "Fuel Deficit",
            5,
            "Unrest +5 (no fuel)",
        );
    }

    if ctx.food_deficit && ctx.water_deficit {
        state.consecutive_food_water_zero_days += 1;
    } else {
        state.consecutive_food_water_zero_days = 0;
    }
}
