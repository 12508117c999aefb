//! Day orchestration.
//!
//! Order of operations for one simulated day:
//! 1. Clear the causality log; snapshot start-of-day values into a fresh context.
//! 2. Steps 1–13 in strict numeric order (no step skipped or reordered).
//! 3. Between Steps 12 and 13: apply queued deaths (default-priority queue
//!    first, then healthy-first), then reconcile zone populations.
//! 4. If the run is not over: advance the day counter and cooldowns, clear
//!    the day's order and quarantine target, check victory.
//!
//! Callers must run [`deduct_pre_simulation_costs`] strictly before
//! [`simulate_day`] — several step computations (e.g. the food-production
//! fuel penalty) read post-deduction resource levels.

use rand::Rng;

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::population;
use crate::steps;
use crate::types::{ColonyState, Content, MissionId, OrderId};

/// Run a full day simulation. Returns the populated context for reporting.
pub fn simulate_day(
    state: &mut ColonyState,
    content: &Content,
    log: &mut CausalityLog,
    rng: &mut impl Rng,
) -> SimulationContext {
    let mut ctx = SimulationContext::new();
    log.clear();

    ctx.food_start = state.food;
    ctx.water_start = state.water;
    ctx.fuel_start = state.fuel;
    ctx.medicine_start = state.medicine;
    ctx.materials_start = state.materials;
    ctx.morale_start = state.morale;
    ctx.unrest_start = state.unrest;
    ctx.sickness_start = state.sickness;

    log.add_flat(
        CausalityCategory::General,
        "Day Start",
        state.meta.day as i32,
        format!("=== Day {} Simulation Start ===", state.meta.day),
    );

    steps::law_passives::execute(state, content, &mut ctx, log);
    steps::orders::execute(state, &mut ctx, log);
    steps::production::execute(state, content, &mut ctx, log, rng);
    steps::consumption::execute(state, content, &mut ctx, log);
    steps::deficits::execute(state, &mut ctx, log);
    steps::overcrowding::execute(state, content, &mut ctx, log);
    steps::sickness::execute(state, &mut ctx, log);
    steps::morale::execute(state, content, &mut ctx, log);
    steps::unrest::execute(state, content, &mut ctx, log);
    steps::siege::execute(state, content, &mut ctx, log);
    steps::repairs::execute(state, content, &ctx, log);
    steps::events::execute(state, content, &mut ctx, log, rng);

    // Queued deaths resolve in a fixed order: default priority, then the
    // Public Executions healthy-first queue.
    if ctx.deaths_default > 0 {
        population::apply_deaths_default(state, ctx.deaths_default, log, "Queued Deaths (default)");
    }
    if ctx.deaths_healthy_first > 0 {
        population::apply_deaths_healthy_first(
            state,
            ctx.deaths_healthy_first,
            log,
            "Queued Deaths (L6)",
        );
    }
    population::recompute_zone_populations_after_deaths(state);

    steps::loss::execute(state, &ctx, log);

    if !state.is_game_over {
        state.meta.day += 1;
        state.days_since_last_law += 1;
        state.days_since_last_law_enacted += 1;
        state.today_order = None;
        state.quarantine_zone = None;

        if state.meta.day > content.constants.victory_day {
            state.is_victory = true;
            log.add_flat(
                CausalityCategory::General,
                "VICTORY",
                content.constants.victory_day as i32,
                format!(
                    "You survived {} days! The siege has ended.",
                    content.constants.victory_day
                ),
            );
        }
    }

    log.add_flat(
        CausalityCategory::General,
        "Day End",
        state.meta.day as i32 - 1,
        format!("=== Day {} Simulation End ===", state.meta.day - 1),
    );

    ctx
}

/// Deduct emergency-order and mission costs. Call strictly before
/// [`simulate_day`].
pub fn deduct_pre_simulation_costs(state: &mut ColonyState, log: &mut CausalityLog) {
    if let Some(order) = state.today_order {
        match order {
            OrderId::DivertSupplies => {
                state.food = (state.food - 30).max(0);
                state.water = (state.water - 20).max(0);
                log.add_flat(
                    CausalityCategory::EmergencyOrder,
                    "O1 Cost",
                    0,
                    "Divert Supplies cost: Food -30, Water -20",
                );
            }
            OrderId::SoupKitchens => {
                state.food = (state.food - 40).max(0);
                log.add_flat(
                    CausalityCategory::EmergencyOrder,
                    "O2 Cost",
                    0,
                    "Soup Kitchens cost: Food -40",
                );
            }
            OrderId::InspireThePeople => {
                state.materials = (state.materials - 15).max(0);
                log.add_flat(
                    CausalityCategory::EmergencyOrder,
                    "O6 Cost",
                    0,
                    "Inspire the People cost: Materials -15",
                );
            }
            // Effects-only orders; their impact lands in Step 2.
            OrderId::EmergencyWaterRation
            | OrderId::CrackdownPatrols
            | OrderId::QuarantineDistrict => {}
        }
    }

    // Night Raid fuel upkeep, paid each day the raid party is out.
    if state
        .active_mission
        .as_ref()
        .is_some_and(|m| m.mission == MissionId::NightRaid)
    {
        let fuel_before = state.fuel;
        state.fuel = (state.fuel - 40).max(0);
        let spent = fuel_before - state.fuel;
        log.add_flat(
            CausalityCategory::Mission,
            "Night Raid Fuel Cost",
            -spent,
            format!("Night Raid fuel cost: -{spent} Fuel"),
        );
    }
}
