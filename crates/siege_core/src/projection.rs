//! Read-only production/consumption projections for UI preview.
//!
//! Kept in lockstep with Steps 3–4 by construction: the law/order multipliers
//! are staged through the very same step code on a scratch context, and the
//! per-slot formulas mirror the production step term for term. Projections
//! read current stocks; the live pipeline applies the same formulas to the
//! stocks as they stand when the step runs.

use crate::context::SimulationContext;
use crate::log::CausalityLog;
use crate::steps;
use crate::types::{ColonyState, Content, JobSlot, ARTISAN, FARMS};

/// Stage the day's law/order multipliers exactly as Steps 1–2 would.
fn staged_context(state: &ColonyState, content: &Content) -> SimulationContext {
    let mut scratch = state.clone();
    let mut log = CausalityLog::new();
    let mut ctx = SimulationContext::new();
    steps::law_passives::execute(&mut scratch, content, &mut ctx, &mut log);
    steps::orders::execute(&mut scratch, &mut ctx, &mut log);
    ctx
}

fn units(state: &ColonyState, content: &Content, slot: JobSlot) -> i32 {
    state.allocation(slot) / content.constants.workers_per_unit
}

// ---------------------------------------------------------------------------
// Production projections
// ---------------------------------------------------------------------------

pub fn food_production(state: &ColonyState, content: &Content) -> i32 {
    let ctx = staged_context(state, content);
    let n = units(state, content, JobSlot::FoodProduction);
    let farms = &content.zones[FARMS];
    let zone_mult = if state.zones[FARMS].is_lost {
        farms.food_production_lost_modifier
    } else {
        farms.food_production_modifier
    };
    let morale_mult = if state.morale < 40 { 0.8 } else { 1.0 };
    let unrest_mult = if state.unrest > 60 { 0.7 } else { 1.0 };
    let fuel_mult = if state.fuel <= 0 { 0.85 } else { 1.0 };
    let total = ctx.food_production_mult
        * ctx.all_production_mult
        * zone_mult
        * morale_mult
        * unrest_mult
        * fuel_mult;
    ((n * content.constants.base_food_yield) as f32 * total).floor() as i32
}

pub fn water_production(state: &ColonyState, content: &Content) -> i32 {
    let ctx = staged_context(state, content);
    let n = units(state, content, JobSlot::WaterDrawing);
    let wells_mult = if state.wells_damaged { 0.5 } else { 1.0 };
    let total = ctx.water_production_mult * ctx.all_production_mult * wells_mult;
    ((n * content.constants.base_water_yield) as f32 * total).floor() as i32
}

pub fn materials_production(state: &ColonyState, content: &Content) -> i32 {
    let ctx = staged_context(state, content);
    let n = units(state, content, JobSlot::MaterialsCrafting);
    let artisan = &content.zones[ARTISAN];
    let zone_mult = if state.zones[ARTISAN].is_lost {
        artisan.materials_production_lost_modifier
    } else {
        artisan.materials_production_modifier
    };
    let total = ctx.materials_production_mult * ctx.all_production_mult * zone_mult;
    ((n * content.constants.base_materials_yield) as f32 * total).floor() as i32
}

pub fn fuel_production(state: &ColonyState, content: &Content) -> i32 {
    let ctx = staged_context(state, content);
    let n = units(state, content, JobSlot::FuelScavenging);
    let zone_mult = if state.zones[FARMS].is_lost {
        content.zones[FARMS].fuel_scavenging_lost_modifier
    } else {
        1.0
    };
    let total = ctx.fuel_production_mult * ctx.all_production_mult * zone_mult;
    ((n * content.constants.base_fuel_yield) as f32 * total).floor() as i32
}

/// Projected repair output and materials cost, including the proportional
/// degradation the production step applies when materials run short.
pub fn repair_output(state: &ColonyState, content: &Content) -> (i32, i32) {
    let ctx = staged_context(state, content);
    let n = units(state, content, JobSlot::Repairs);
    if n == 0 {
        return (0, 0);
    }
    let total_mult = ctx.repair_output_mult * ctx.all_production_mult;
    let full = ((n * content.constants.base_repair_yield) as f32 * total_mult).floor() as i32;
    let cost = n * content.constants.repair_materials_cost;

    if state.materials < cost && state.materials > 0 {
        let ratio = state.materials as f32 / cost as f32;
        let scaled =
            ((n * content.constants.base_repair_yield) as f32 * total_mult * ratio).floor() as i32;
        (scaled, state.materials)
    } else if state.materials <= 0 {
        (0, 0)
    } else {
        (full, cost)
    }
}

/// Projected clinic units actually staffable and the medicine they consume.
pub fn clinic_capacity(state: &ColonyState, content: &Content) -> (i32, i32) {
    let ctx = staged_context(state, content);
    let n = units(state, content, JobSlot::ClinicStaff);
    if n == 0 {
        return (0, 0);
    }
    let adjusted_cost =
        (content.constants.clinic_medicine_cost as f32 * ctx.clinic_medicine_cost_mult).ceil()
            as i32;
    let total_cost = n * adjusted_cost;

    if state.medicine < total_cost && state.medicine > 0 {
        let effective = state.medicine / adjusted_cost;
        (effective, effective * adjusted_cost)
    } else if state.medicine <= 0 {
        (0, 0)
    } else {
        (n, total_cost)
    }
}

/// Projected sickness reduction from sanitation + clinic at current severity.
pub fn sickness_treatment(state: &ColonyState, content: &Content) -> i32 {
    let san_units = units(state, content, JobSlot::Sanitation);
    let (clinic_units, _) = clinic_capacity(state, content);
    ((san_units + clinic_units) as f32 * 0.10 * state.sickness as f32).round() as i32
}

// ---------------------------------------------------------------------------
// Consumption projections
// ---------------------------------------------------------------------------

pub fn food_consumption(state: &ColonyState, content: &Content) -> i32 {
    let ctx = staged_context(state, content);
    let mut base = 0;
    for zone in &state.zones {
        if zone.is_lost {
            continue;
        }
        let mult = 1.0 + 0.05 * zone.overcrowding_tiers() as f32;
        base += (zone.current_population as f32 * mult).ceil() as i32;
    }
    let mult = ctx.food_consumption_mult * state.profile_food_consumption_mult;
    (base as f32 * mult).ceil() as i32 + ctx.flat_food_consumption
}

pub fn water_consumption(state: &ColonyState, content: &Content) -> i32 {
    let ctx = staged_context(state, content);
    (state.total_population() as f32 * ctx.water_consumption_mult).ceil() as i32
}

pub fn fuel_consumption(state: &ColonyState, content: &Content) -> i32 {
    let baseline = content.constants.fuel_consumption_baseline as f32;
    let overcrowding_mod = 1.0 + 0.10 * state.zones_over_20pct_count() as f32;
    (baseline * (state.total_population() as f32 / baseline) * overcrowding_mod).ceil() as i32
}

// ---------------------------------------------------------------------------
// Net changes
// ---------------------------------------------------------------------------

pub fn food_net_change(state: &ColonyState, content: &Content) -> i32 {
    food_production(state, content) - food_consumption(state, content)
}

pub fn water_net_change(state: &ColonyState, content: &Content) -> i32 {
    water_production(state, content) - water_consumption(state, content)
}

pub fn fuel_net_change(state: &ColonyState, content: &Content) -> i32 {
    fuel_production(state, content) - fuel_consumption(state, content)
}

pub fn materials_net_change(state: &ColonyState, content: &Content) -> i32 {
    materials_production(state, content) - repair_output(state, content).1
}

pub fn medicine_net_change(state: &ColonyState, content: &Content) -> i32 {
    -clinic_capacity(state, content).1
}
