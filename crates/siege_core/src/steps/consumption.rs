//! Step 4: apply food, water, and fuel consumption.
//!
//! Food is summed per zone with an overcrowding surcharge; water scales off
//! total population; fuel is a population-scaled baseline with a global
//! overcrowding modifier. Each resource clamps at 0 and records its deficit.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content};

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
) {
    // --- 4a. Food ---
    let mut total_food_base = 0;
    for (i, zone) in state.zones.iter().enumerate() {
        if zone.is_lost {
            continue;
        }
        let tiers = zone.overcrowding_tiers();
        let zone_food_mult = 1.0 + 0.05 * tiers as f32;
        let zone_food = (zone.current_population as f32 * zone_food_mult).ceil() as i32;
        total_food_base += zone_food;

        if tiers > 0 {
            log.add_flat(
                CausalityCategory::Consumption,
                format!("Overcrowding Food ({})", content.zones[i].name),
                zone_food - zone.current_population,
                format!(
                    "+{} extra food from {:.0}% overcrowding",
                    zone_food - zone.current_population,
                    zone.overcrowding_percent()
                ),
            );
        }
    }

    let food_mult = ctx.food_consumption_mult * state.profile_food_consumption_mult;
    let total_food =
        (total_food_base as f32 * food_mult).ceil() as i32 + ctx.flat_food_consumption;
    ctx.food_consumed = total_food;

    state.food -= total_food;
    if state.food < 0 {
        state.food = 0;
    }
    ctx.food_deficit = state.food <= 0;

    log.add_flat(
        CausalityCategory::Food,
        "Food Consumed",
        -total_food,
        format!(
            "-{total_food} Food ({total_food_base} base × {food_mult:.2} + {} flat)",
            ctx.flat_food_consumption
        ),
    );

    // --- 4b. Water ---
    let water_mult = ctx.water_consumption_mult;
    let population = state.total_population();
    let total_water = (population as f32 * water_mult).ceil() as i32;
    ctx.water_consumed = total_water;

    state.water -= total_water;
    if state.water < 0 {
        state.water = 0;
    }
    ctx.water_deficit = state.water <= 0;

    log.add_flat(
        CausalityCategory::Water,
        "Water Consumed",
        -total_water,
        format!("-{total_water} Water ({population} pop × {water_mult:.2})"),
    );

    // --- 4c. Fuel ---
    let baseline = content.constants.fuel_consumption_baseline as f32;
    let zones_over_20 = state.zones_over_20pct_count();
    let overcrowding_fuel_mod = 1.0 + 0.10 * zones_over_20 as f32;
    let total_fuel =
        (baseline * (population as f32 / baseline) * overcrowding_fuel_mod).ceil() as i32;
    ctx.fuel_consumed = total_fuel;

    state.fuel -= total_fuel;
    ctx.fuel_deficit = state.fuel <= 0;
    if state.fuel < 0 {
        state.fuel = 0;
    }

    log.add_flat(
        CausalityCategory::Fuel,
        "Fuel Consumed",
        -total_fuel,
        format!(
            "-{total_fuel} Fuel ({baseline:.0} × {population}/{baseline:.0} × {overcrowding_fuel_mod:.2})"
        ),
    );
    if zones_over_20 > 0 {
        log.add_flat(
            CausalityCategory::Consumption,
            "Fuel Overcrowding Modifier",
            zones_over_20,
            format!("{zones_over_20} zones ≥20% overcrowded → fuel ×{overcrowding_fuel_mod:.2}"),
        );
    }
}
