//! Step 12: triggered world events, scheduled early incidents, and mission
//! resolution, in that order. Meters are re-clamped after direct shocks.

use rand::Rng;

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::mission;
use crate::population;
use crate::rng::chance;
use crate::types::{ColonyState, Content, IncidentId, ARTISAN};
use crate::zone_loss;

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
    rng: &mut impl Rng,
) {
    run_world_events(state, content, ctx, log, rng);
    run_early_incidents(state, content, log);
    mission::resolve_mission(state, content, log, rng);
    state.clamp_meters();
}

fn run_world_events(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
    rng: &mut impl Rng,
) {
    // E1. Hunger riot
    if state.consecutive_food_deficit_days >= 2 && state.unrest > 50 {
        state.food = (state.food - 80).max(0);
        population::apply_deaths_default(state, 5, log, "Hunger Riot (E1)");
        state.unrest += 15;
        log.add_flat(
            CausalityCategory::Event,
            "Hunger Riot (E1)",
            0,
            "Hunger Riot! Food -80, 5 deaths, Unrest +15 (2+ days food deficit + Unrest > 50)",
        );
    }

    // E2. Fever outbreak
    if state.sickness > 60 {
        population::apply_deaths_default(state, 10, log, "Fever Outbreak (E2)");
        state.unrest += 10;
        log.add_flat(
            CausalityCategory::Event,
            "Fever Outbreak (E2)",
            0,
            "Fever Outbreak! 10 deaths, Unrest +10 (Sickness > 60)",
        );
    }

    // E3. Desertion wave
    if state.morale < 30 {
        population::apply_desertion(state, 10, log);
        log.add_flat(
            CausalityCategory::Event,
            "Desertion Wave (E3)",
            0,
            "Desertion Wave! Up to 10 healthy workers leave (Morale < 30)",
        );
    }

    // E4. Wall breach attempt
    let perim = state.active_perimeter();
    let perim_integrity = state.zones[perim].current_integrity;
    if perim_integrity < 30 && perim_integrity > 0 {
        if state.guards >= 15 {
            log.add_flat(
                CausalityCategory::Event,
                "Wall Breach Attempt (E4) — NEGATED",
                0,
                "Wall Breach Attempt negated by guards (≥15 on duty)",
            );
        } else {
            state.zones[perim].current_integrity -= 15;
            log.add_flat(
                CausalityCategory::Event,
                "Wall Breach Attempt (E4)",
                -15,
                format!(
                    "Wall Breach Attempt! {} Integrity -15 → {}",
                    content.zones[perim].name, state.zones[perim].current_integrity
                ),
            );
            zone_loss::try_apply_zone_loss(state, content, perim, Some(ctx), log, "Wall Breach (E4)");
        }
    }

    // E5. Fire in the Artisan Quarter
    if state.siege_intensity >= 4 && chance(rng, 0.10) {
        state.materials = (state.materials - 50).max(0);
        if state.zones[ARTISAN].is_lost {
            log.add_flat(
                CausalityCategory::Event,
                "Fire in Artisan Quarter (E5)",
                0,
                "Fire in Artisan Quarter! Materials -50 (quarter already lost)",
            );
        } else {
            state.zones[ARTISAN].current_integrity -= 10;
            log.add_flat(
                CausalityCategory::Event,
                "Fire in Artisan Quarter (E5)",
                0,
                format!(
                    "Fire in Artisan Quarter! Materials -50, Artisan Integrity -10 → {}",
                    state.zones[ARTISAN].current_integrity
                ),
            );
        }
    }

    // E6 (Council Revolt) and E7 (Total Collapse) are loss conditions — Step 13.
}

fn run_early_incidents(state: &mut ColonyState, content: &Content, log: &mut CausalityLog) {
    let day = state.meta.day;
    for i in 0..state.scheduled_incidents.len() {
        if state.scheduled_incidents[i].resolved || state.scheduled_incidents[i].day != day {
            continue;
        }
        state.scheduled_incidents[i].resolved = true;

        let incident = state.scheduled_incidents[i].incident;
        let name = content
            .incident(incident)
            .map_or_else(|| format!("{incident:?}"), |d| d.name.clone());
        match incident {
            IncidentId::MinorFire => {
                state.materials = (state.materials - 20).max(0);
                log.add_flat(
                    CausalityCategory::Event,
                    format!("Early Incident: {name}"),
                    -20,
                    "Minor Fire! Materials -20",
                );
            }
            IncidentId::FeverCluster => {
                state.sickness += 8;
                log.add_flat(
                    CausalityCategory::Event,
                    format!("Early Incident: {name}"),
                    8,
                    "Fever Cluster! Sickness +8",
                );
            }
            IncidentId::FoodTheft => {
                state.food = (state.food - 40).max(0);
                state.unrest += 5;
                log.add_flat(
                    CausalityCategory::Event,
                    format!("Early Incident: {name}"),
                    0,
                    "Food Theft! Food -40, Unrest +5",
                );
            }
            IncidentId::GuardDesertion => {
                state.guards = (state.guards - 5).max(0);
                state.unrest += 5;
                log.add_flat(
                    CausalityCategory::Event,
                    format!("Early Incident: {name}"),
                    0,
                    "Guard Desertion! Guards -5, Unrest +5",
                );
            }
        }
    }
}

/// Warning text when an unresolved early incident is scheduled for tomorrow.
pub fn tomorrow_incident_warning(state: &ColonyState, content: &Content) -> Option<String> {
    let tomorrow = state.meta.day + 1;
    state
        .scheduled_incidents
        .iter()
        .find(|i| !i.resolved && i.day == tomorrow)
        .map(|i| {
            let name = content
                .incident(i.incident)
                .map_or_else(|| format!("{:?}", i.incident), |d| d.name.clone());
            format!("WARNING: Reports suggest a '{name}' incident may occur tomorrow.")
        })
}
