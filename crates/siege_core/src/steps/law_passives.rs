//! Step 1: apply the ongoing effect of every enacted law to the context.
//!
//! Laws stage multipliers and deltas; the two exceptions that touch state
//! directly are Emergency Shelters (permanent capacity raise) and Medical
//! Triage (daily sick deaths, queued here and applied in Step 7).

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content, LawId, INNER};

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
) {
    for i in 0..state.enacted_laws.len() {
        match state.enacted_laws[i] {
            LawId::StrictRations => {
                ctx.food_consumption_mult *= 0.75;
                ctx.unrest_delta += 5;
                log.add_mult(
                    CausalityCategory::Consumption,
                    "Strict Rations (L1)",
                    0.75,
                    "Food consumption ×0.75",
                );
                log.add_flat(
                    CausalityCategory::Unrest,
                    "Strict Rations (L1)",
                    5,
                    "Unrest +5/day from rationing",
                );
            }
            LawId::DilutedWater => {
                ctx.water_consumption_mult *= 0.8;
                ctx.sickness_delta += 5;
                log.add_mult(
                    CausalityCategory::Consumption,
                    "Diluted Water (L2)",
                    0.8,
                    "Water consumption ×0.8",
                );
                log.add_flat(
                    CausalityCategory::Sickness,
                    "Diluted Water (L2)",
                    5,
                    "Sickness +5/day from diluted water",
                );
            }
            LawId::ExtendedShifts => {
                ctx.food_production_mult *= 1.25;
                ctx.water_production_mult *= 1.25;
                ctx.materials_production_mult *= 1.25;
                ctx.fuel_production_mult *= 1.25;
                ctx.sickness_delta += 8;
                log.add_mult(
                    CausalityCategory::Production,
                    "Extended Shifts (L3)",
                    1.25,
                    "All production ×1.25",
                );
                log.add_flat(
                    CausalityCategory::Sickness,
                    "Extended Shifts (L3)",
                    8,
                    "Sickness +8/day from overwork",
                );
            }
            LawId::MandatoryGuardService => {
                ctx.flat_food_consumption += 15;
                log.add_flat(
                    CausalityCategory::Consumption,
                    "Mandatory Guard Service (L4)",
                    15,
                    "Food +15/day extra consumption",
                );
            }
            LawId::EmergencyShelters => {
                state.zones[INNER].effective_capacity = content.zones[INNER].capacity + 30;
                ctx.sickness_delta += 10;
                log.add_flat(
                    CausalityCategory::General,
                    "Emergency Shelters (L5)",
                    30,
                    "Inner District capacity +30",
                );
                log.add_flat(
                    CausalityCategory::Sickness,
                    "Emergency Shelters (L5)",
                    10,
                    "Sickness +10/day from overcrowded shelters",
                );
            }
            LawId::MedicalTriage => {
                ctx.clinic_medicine_cost_mult *= 0.5;
                let sick_to_kill = 5.min(state.sick);
                ctx.deaths_sick += sick_to_kill;
                log.add_mult(
                    CausalityCategory::Production,
                    "Medical Triage (L9)",
                    0.5,
                    "Clinic medicine cost ×0.5",
                );
                log.add_flat(
                    CausalityCategory::Death,
                    "Medical Triage (L9)",
                    -sick_to_kill,
                    format!("{sick_to_kill} sick die from triage daily"),
                );
            }
            LawId::Curfew => {
                ctx.unrest_delta -= 10;
                ctx.all_production_mult *= 0.8;
                log.add_flat(
                    CausalityCategory::Unrest,
                    "Curfew (L10)",
                    -10,
                    "Unrest -10/day from curfew",
                );
                log.add_mult(
                    CausalityCategory::Production,
                    "Curfew (L10)",
                    0.8,
                    "All production ×0.8 from curfew",
                );
            }
            LawId::AbandonOuterRing => {
                ctx.siege_damage_mult *= 0.8;
                log.add_mult(
                    CausalityCategory::SiegeDamage,
                    "Abandon Outer Ring (L11)",
                    0.8,
                    "Siege damage ×0.8",
                );
            }
            LawId::MartialLaw => {
                ctx.unrest_cap = Some(60);
                ctx.morale_cap = Some(40);
                log.add_flat(
                    CausalityCategory::Unrest,
                    "Martial Law (L12)",
                    0,
                    "Unrest capped at 60",
                );
                log.add_flat(
                    CausalityCategory::Morale,
                    "Martial Law (L12)",
                    0,
                    "Morale capped at 40",
                );
            }
            // Enact-only laws: effects land when enacted, nothing ongoing.
            LawId::PublicExecutions | LawId::FaithProcessions | LawId::FoodConfiscation => {}
        }
    }
}
