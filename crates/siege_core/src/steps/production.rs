//! Step 3: compute all production from worker allocations and staged modifiers.
//!
//! Units are "5 workers = 1 unit". Multipliers compose in a fixed order:
//! zone intact/lost modifier, then morale/unrest/fuel threshold penalties,
//! then the accumulated law/order multipliers; output floors to an integer.
//! Repairs and the clinic pay a secondary resource with graceful degradation.

use rand::Rng;

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::rng::chance;
use crate::types::{ColonyState, Content, JobSlot, ARTISAN, FARMS};

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
    rng: &mut impl Rng,
) {
    let k = &content.constants;
    let per_unit = k.workers_per_unit;

    // Running the city with no fuel starves the ovens before the fields.
    if state.fuel <= 0 {
        ctx.food_production_mult *= 0.85;
        log.add_mult(
            CausalityCategory::Production,
            "Fuel Deficit",
            0.85,
            "Food production ×0.85 (no fuel)",
        );
    }

    // --- 3a. Food production ---
    let food_units = state.allocation(JobSlot::FoodProduction) / per_unit;
    if food_units > 0 {
        let farms = &content.zones[FARMS];
        let zone_mult = if state.zones[FARMS].is_lost {
            farms.food_production_lost_modifier
        } else {
            farms.food_production_modifier
        };
        let morale_mult = if state.morale < 40 { 0.8 } else { 1.0 };
        let unrest_mult = if state.unrest > 60 { 0.7 } else { 1.0 };

        let total_mult =
            ctx.food_production_mult * ctx.all_production_mult * zone_mult * morale_mult * unrest_mult;
        let produced = ((food_units * k.base_food_yield) as f32 * total_mult).floor() as i32;
        state.food += produced;
        ctx.food_produced = produced;

        log.add_flat(
            CausalityCategory::Food,
            "Food Production",
            produced,
            format!(
                "+{produced} Food ({food_units} units × {} × {total_mult:.2})",
                k.base_food_yield
            ),
        );
        if (zone_mult - 1.0).abs() > f32::EPSILON {
            log.add_mult(
                CausalityCategory::Production,
                if state.zones[FARMS].is_lost { "Farms Lost" } else { "Farms Intact" },
                zone_mult,
                format!("Food zone mult ×{zone_mult:.2}"),
            );
        }
        if morale_mult < 1.0 {
            log.add_mult(
                CausalityCategory::Production,
                "Low Morale (<40)",
                morale_mult,
                "Food ×0.8 (low morale)",
            );
        }
        if unrest_mult < 1.0 {
            log.add_mult(
                CausalityCategory::Production,
                "High Unrest (>60)",
                unrest_mult,
                "Food ×0.7 (high unrest)",
            );
        }
    }

    // --- 3b. Water drawing ---
    let water_units = state.allocation(JobSlot::WaterDrawing) / per_unit;
    if water_units > 0 {
        let wells_mult = if state.wells_damaged { 0.5 } else { 1.0 };
        let total_mult = ctx.water_production_mult * ctx.all_production_mult * wells_mult;
        let produced = ((water_units * k.base_water_yield) as f32 * total_mult).floor() as i32;
        state.water += produced;
        ctx.water_produced = produced;

        log.add_flat(
            CausalityCategory::Water,
            "Water Drawing",
            produced,
            format!(
                "+{produced} Water ({water_units} units × {} × {total_mult:.2})",
                k.base_water_yield
            ),
        );
        if state.wells_damaged {
            log.add_mult(
                CausalityCategory::Production,
                "Wells Damaged",
                wells_mult,
                "Water ×0.5 (damaged wells)",
            );
        }
    }

    // --- 3c. Materials crafting ---
    let mat_units = state.allocation(JobSlot::MaterialsCrafting) / per_unit;
    if mat_units > 0 {
        let artisan = &content.zones[ARTISAN];
        let zone_mult = if state.zones[ARTISAN].is_lost {
            artisan.materials_production_lost_modifier
        } else {
            artisan.materials_production_modifier
        };
        let total_mult = ctx.materials_production_mult * ctx.all_production_mult * zone_mult;
        let produced = ((mat_units * k.base_materials_yield) as f32 * total_mult).floor() as i32;
        state.materials += produced;
        ctx.materials_produced = produced;

        log.add_flat(
            CausalityCategory::Materials,
            "Materials Crafting",
            produced,
            format!(
                "+{produced} Materials ({mat_units} units × {} × {total_mult:.2})",
                k.base_materials_yield
            ),
        );
    }

    // --- 3d. Repairs ---
    let repair_units = state.allocation(JobSlot::Repairs) / per_unit;
    if repair_units > 0 {
        let total_mult = ctx.repair_output_mult * ctx.all_production_mult;
        let full_output = ((repair_units * k.base_repair_yield) as f32 * total_mult).floor() as i32;
        let mut material_cost = repair_units * k.repair_materials_cost;
        let repair_amount;

        if state.materials < material_cost && state.materials > 0 {
            // Not enough materials for every crew: scale output proportionally.
            let ratio = state.materials as f32 / material_cost as f32;
            repair_amount =
                ((repair_units * k.base_repair_yield) as f32 * total_mult * ratio).floor() as i32;
            material_cost = state.materials;
        } else if state.materials <= 0 {
            repair_amount = 0;
            material_cost = 0;
        } else {
            repair_amount = full_output;
        }

        state.materials -= material_cost;
        ctx.repair_amount = repair_amount;

        log.add_flat(
            CausalityCategory::Integrity,
            "Repairs",
            repair_amount,
            format!("Repair +{repair_amount} integrity (cost {material_cost} materials)"),
        );
    }

    // --- 3e. Sanitation ---
    let san_units = state.allocation(JobSlot::Sanitation) / per_unit;
    ctx.sanitation_units = san_units;
    if san_units > 0 {
        log.add_flat(
            CausalityCategory::Sickness,
            "Sanitation",
            0,
            format!("Sanitation capacity: {san_units} units"),
        );
    }

    // --- 3f. Guard duty (automatic) ---
    let guard_units = state.guards / per_unit;
    ctx.siege_damage_reduction = guard_units;
    ctx.guard_unrest_growth_modifier = if guard_units > 0 { 0.5 } else { 1.0 };
    if guard_units > 0 {
        log.add_flat(
            CausalityCategory::SiegeDamage,
            "Guards",
            -ctx.siege_damage_reduction,
            format!("Guards reduce siege damage by {}", ctx.siege_damage_reduction),
        );
        log.add_flat(
            CausalityCategory::Unrest,
            "Guards",
            0,
            "Guards reduce unrest growth by 50%",
        );
    }

    // --- 3g. Clinic staff ---
    let clinic_units = state.allocation(JobSlot::ClinicStaff) / per_unit;
    if clinic_units > 0 {
        let adjusted_med_cost =
            (k.clinic_medicine_cost as f32 * ctx.clinic_medicine_cost_mult).ceil() as i32;
        let total_med_cost = clinic_units * adjusted_med_cost;
        let effective_units;

        if state.medicine < total_med_cost && state.medicine > 0 {
            // Staff only as many wards as the medicine stock can supply.
            effective_units = state.medicine / adjusted_med_cost;
            state.medicine -= effective_units * adjusted_med_cost;
        } else if state.medicine <= 0 {
            effective_units = 0;
        } else {
            effective_units = clinic_units;
            state.medicine -= total_med_cost;
        }

        ctx.clinic_units = effective_units;

        log.add_flat(
            CausalityCategory::Sickness,
            "Clinic",
            0,
            format!(
                "Clinic capacity: {effective_units} units (used {} medicine)",
                effective_units * adjusted_med_cost
            ),
        );
    }

    // --- 3h. Fuel scavenging ---
    let fuel_units = state.allocation(JobSlot::FuelScavenging) / per_unit;
    if fuel_units > 0 {
        let zone_mult = if state.zones[FARMS].is_lost {
            content.zones[FARMS].fuel_scavenging_lost_modifier
        } else {
            1.0
        };
        let total_mult = ctx.fuel_production_mult * ctx.all_production_mult * zone_mult;
        let produced = ((fuel_units * k.base_fuel_yield) as f32 * total_mult).floor() as i32;
        state.fuel += produced;
        ctx.fuel_produced = produced;

        log.add_flat(
            CausalityCategory::Fuel,
            "Fuel Scavenging",
            produced,
            format!(
                "+{produced} Fuel ({fuel_units} units × {} × {total_mult:.2})",
                k.base_fuel_yield
            ),
        );

        // Scavenging parties get caught in the open under a hot siege.
        if state.siege_intensity >= 4 && chance(rng, 0.20) {
            ctx.deaths_default += 2;
            log.add_flat(
                CausalityCategory::Death,
                "Fuel Scavenging Ambush",
                -2,
                "2 deaths from fuel scavenging ambush (Siege ≥4)",
            );
        }
    }
}
