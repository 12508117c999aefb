//! Step 2: apply the one-day effect of today's emergency order, if any.
//!
//! Distinct from law passives: these never persist past the day and at most
//! one order is active per day. Resource costs were already deducted by
//! `deduct_pre_simulation_costs`.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, OrderId};

pub(crate) fn execute(state: &mut ColonyState, ctx: &mut SimulationContext, log: &mut CausalityLog) {
    let Some(order) = state.today_order else {
        return;
    };

    match order {
        OrderId::DivertSupplies => {
            ctx.repair_output_mult *= 1.5;
            log.add_mult(
                CausalityCategory::Production,
                "Divert Supplies (O1)",
                1.5,
                "Repair output ×1.5 today",
            );
            if state.wells_damaged {
                state.wells_damaged = false;
                log.add_flat(
                    CausalityCategory::General,
                    "Divert Supplies (O1)",
                    0,
                    "Wells repaired as part of O1",
                );
            }
        }
        OrderId::SoupKitchens => {
            ctx.unrest_delta -= 15;
            log.add_flat(
                CausalityCategory::Unrest,
                "Soup Kitchens (O2)",
                -15,
                "Unrest -15 today",
            );
        }
        OrderId::EmergencyWaterRation => {
            ctx.water_consumption_mult *= 0.5;
            ctx.sickness_delta += 10;
            log.add_mult(
                CausalityCategory::Consumption,
                "Emergency Water Ration (O3)",
                0.5,
                "Water consumption ×0.5 today",
            );
            log.add_flat(
                CausalityCategory::Sickness,
                "Emergency Water Ration (O3)",
                10,
                "Sickness +10 today",
            );
        }
        OrderId::CrackdownPatrols => {
            ctx.unrest_delta -= 20;
            ctx.deaths_default += 2;
            ctx.morale_delta -= 10;
            log.add_flat(
                CausalityCategory::Unrest,
                "Crackdown Patrols (O4)",
                -20,
                "Unrest -20 today",
            );
            log.add_flat(
                CausalityCategory::Death,
                "Crackdown Patrols (O4)",
                -2,
                "2 deaths from crackdown",
            );
            log.add_flat(
                CausalityCategory::Morale,
                "Crackdown Patrols (O4)",
                -10,
                "Morale -10 from crackdown",
            );
        }
        OrderId::QuarantineDistrict => {
            ctx.all_production_mult *= 0.5;
            ctx.sickness_delta -= 10;
            log.add_mult(
                CausalityCategory::Production,
                "Quarantine District (O5)",
                0.5,
                "All production ×0.5 today (quarantine)",
            );
            log.add_flat(
                CausalityCategory::Sickness,
                "Quarantine District (O5)",
                -10,
                "Sickness -10 today",
            );
        }
        OrderId::InspireThePeople => {
            ctx.morale_delta += 15;
            log.add_flat(
                CausalityCategory::Morale,
                "Inspire the People (O6)",
                15,
                "Morale +15 today",
            );
        }
    }
}
