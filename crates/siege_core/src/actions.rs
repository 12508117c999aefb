//! Player actions as paired `can_x` / `x` functions.
//!
//! Every mutator is a safe no-op when its predicate fails, so a UI (or the
//! steward) may call them speculatively. Laws, orders, missions, evacuation,
//! and wells repair follow the rules of the action tables; the scheduling API
//! holds at most one pending action for the day boundary.

use crate::log::CausalityLog;
use crate::population;
use crate::types::{
    ActiveMission, ColonyState, Content, JobSlot, LawId, MissionId, OrderId, ScheduledAction,
    FARMS, RESIDENTIAL,
};
use crate::zone_loss;

// ---------------------------------------------------------------------------
// Worker allocation
// ---------------------------------------------------------------------------

pub fn can_allocate_workers(state: &ColonyState, slot: JobSlot, delta: i32) -> bool {
    if slot == JobSlot::GuardDuty {
        return false;
    }
    let new_value = state.allocation(slot) + delta;
    if new_value < 0 || new_value % 5 != 0 {
        return false;
    }
    if delta > 0 && state.idle_workers() < delta {
        return false;
    }
    true
}

pub fn allocate_workers(state: &mut ColonyState, slot: JobSlot, delta: i32) {
    if !can_allocate_workers(state, slot, delta) {
        return;
    }
    let current = state.allocation(slot);
    state.worker_allocation.insert(slot, current + delta);
}

// ---------------------------------------------------------------------------
// Laws
// ---------------------------------------------------------------------------

/// Situational unlock rule per law; availability is gated on colony pressure.
pub fn is_law_unlocked(state: &ColonyState, law: LawId) -> bool {
    match law {
        LawId::StrictRations => true,
        LawId::DilutedWater => state.water < 100,
        LawId::ExtendedShifts => state.meta.day >= 5,
        LawId::MandatoryGuardService => state.unrest > 40,
        LawId::EmergencyShelters => state.any_zone_lost(),
        LawId::PublicExecutions => state.unrest > 60,
        LawId::FaithProcessions => state.morale < 40,
        LawId::FoodConfiscation => state.food < 100,
        LawId::MedicalTriage => state.medicine < 20,
        LawId::Curfew => state.unrest > 50,
        LawId::AbandonOuterRing => {
            !state.zones[FARMS].is_lost && state.zones[FARMS].current_integrity < 40
        }
        LawId::MartialLaw => state.unrest > 75,
    }
}

pub fn can_enact_law(state: &ColonyState, content: &Content, law: LawId) -> bool {
    if state.is_game_over || state.enacted_laws.contains(&law) {
        return false;
    }
    if state.days_since_last_law < content.constants.law_cooldown_days {
        return false;
    }
    if !is_law_unlocked(state, law) {
        return false;
    }
    match law {
        LawId::MandatoryGuardService => state.healthy_workers >= 10,
        LawId::FaithProcessions => state.materials >= 10,
        _ => true,
    }
}

pub fn enact_law(state: &mut ColonyState, content: &Content, law: LawId, log: &mut CausalityLog) {
    if !can_enact_law(state, content, law) {
        return;
    }

    state.enacted_laws.push(law);
    state.days_since_last_law = 0;
    state.days_since_last_law_enacted = 0;

    match law {
        LawId::StrictRations => state.morale -= 10,
        LawId::DilutedWater => state.morale -= 5,
        LawId::ExtendedShifts => state.morale -= 15,
        LawId::MandatoryGuardService => {
            state.healthy_workers -= 10;
            state.guards += 10;
            state.morale -= 10;
            population::validate_worker_allocations(state);
        }
        LawId::EmergencyShelters => state.unrest += 10,
        LawId::PublicExecutions => {
            state.unrest -= 25;
            state.morale -= 20;
            population::apply_deaths_healthy_first(
                state,
                5,
                log,
                "Public Executions (L6) enactment",
            );
            population::recompute_zone_populations_after_deaths(state);
        }
        LawId::FaithProcessions => {
            state.materials -= 10;
            state.morale += 15;
            state.unrest += 5;
        }
        LawId::FoodConfiscation => {
            state.food += 100;
            state.unrest += 20;
            state.morale -= 20;
        }
        LawId::AbandonOuterRing => {
            // Deliberate loss of the outer ring runs the standard cascade,
            // plus the law's own unrest surcharge.
            state.zones[FARMS].current_integrity = 0;
            zone_loss::try_apply_zone_loss(
                state,
                content,
                FARMS,
                None,
                log,
                "Abandon Outer Ring (L11)",
            );
            state.unrest += 15;
        }
        // Passive-only laws: their effects run in Step 1.
        LawId::MedicalTriage | LawId::Curfew | LawId::MartialLaw => {}
    }

    state.clamp_meters();
}

// ---------------------------------------------------------------------------
// Emergency orders
// ---------------------------------------------------------------------------

pub fn can_issue_order(state: &ColonyState, order: OrderId) -> bool {
    if state.is_game_over || state.today_order.is_some() {
        return false;
    }
    match order {
        OrderId::DivertSupplies => state.food >= 30 && state.water >= 20,
        OrderId::SoupKitchens => state.food >= 40,
        OrderId::InspireThePeople => state.materials >= 15,
        OrderId::EmergencyWaterRation
        | OrderId::CrackdownPatrols
        | OrderId::QuarantineDistrict => true,
    }
}

pub fn issue_order(state: &mut ColonyState, order: OrderId, quarantine_zone: Option<usize>) {
    if !can_issue_order(state, order) {
        return;
    }
    state.today_order = Some(order);
    if order == OrderId::QuarantineDistrict {
        state.quarantine_zone = quarantine_zone;
    }
}

pub fn cancel_order(state: &mut ColonyState) {
    state.today_order = None;
    state.quarantine_zone = None;
}

// ---------------------------------------------------------------------------
// Missions
// ---------------------------------------------------------------------------

pub fn can_start_mission(state: &ColonyState, content: &Content) -> bool {
    !state.is_game_over
        && state.active_mission.is_none()
        && state.healthy_workers >= content.constants.mission_workers
}

pub fn start_mission(state: &mut ColonyState, content: &Content, mission: MissionId) {
    if !can_start_mission(state, content) {
        return;
    }
    let fuel_insufficient = mission == MissionId::NightRaid && state.fuel < 40;
    state.active_mission = Some(ActiveMission {
        mission,
        start_day: state.meta.day,
        workers_committed: content.constants.mission_workers,
        fuel_was_insufficient: fuel_insufficient,
    });
    // The committed workers are unavailable from this moment.
    population::validate_worker_allocations(state);
}

// ---------------------------------------------------------------------------
// Evacuation
// ---------------------------------------------------------------------------

pub fn can_evacuate(state: &ColonyState, content: &Content) -> bool {
    if state.is_game_over || state.materials < 20 {
        return false;
    }
    let perim = state.active_perimeter();
    if content.zones[perim].is_keep {
        return false;
    }

    let all_outer_lost = state.zones[FARMS].is_lost && state.zones[RESIDENTIAL].is_lost;
    let integrity_low = state.zones[perim].current_integrity < 40;
    let siege_high = state.siege_intensity >= 5;
    all_outer_lost || integrity_low || siege_high
}

/// Abandon the active perimeter deliberately: pay the surcharge, then run the
/// same cascade a siege loss would.
pub fn evacuate(state: &mut ColonyState, content: &Content, log: &mut CausalityLog) {
    if !can_evacuate(state, content) {
        return;
    }

    let perim = state.active_perimeter();
    state.materials -= 20;
    state.sickness += 10;
    state.unrest += 10;

    state.zones[perim].current_integrity = 0;
    zone_loss::try_apply_zone_loss(state, content, perim, None, log, "Evacuation");

    state.clamp_meters();
}

// ---------------------------------------------------------------------------
// Wells
// ---------------------------------------------------------------------------

pub fn can_repair_wells(state: &ColonyState) -> bool {
    !state.is_game_over && state.wells_damaged && state.materials >= 10
}

pub fn repair_wells(state: &mut ColonyState) {
    if !can_repair_wells(state) {
        return;
    }
    state.materials -= 10;
    state.wells_damaged = false;
}

// ---------------------------------------------------------------------------
// Scheduled action (executed by the driver at the day boundary)
// ---------------------------------------------------------------------------

/// Queue a law for the day boundary, replacing any other pending action.
pub fn schedule_law(state: &mut ColonyState, content: &Content, law: LawId) {
    if can_enact_law(state, content, law) {
        state.scheduled = Some(ScheduledAction::Law(law));
    }
}

pub fn schedule_order(state: &mut ColonyState, order: OrderId, quarantine_zone: Option<usize>) {
    if can_issue_order(state, order) {
        state.scheduled = Some(ScheduledAction::Order(order, quarantine_zone));
    }
}

pub fn schedule_mission(state: &mut ColonyState, content: &Content, mission: MissionId) {
    if can_start_mission(state, content) {
        state.scheduled = Some(ScheduledAction::Mission(mission));
    }
}

pub fn clear_scheduled(state: &mut ColonyState) {
    state.scheduled = None;
}

/// Consume and apply the pending action. Preconditions are re-checked; a
/// stale action degrades to a no-op rather than crashing the boundary.
pub fn execute_scheduled_action(state: &mut ColonyState, content: &Content, log: &mut CausalityLog) {
    let Some(action) = state.scheduled.take() else {
        return;
    };
    match action {
        ScheduledAction::Law(law) => enact_law(state, content, law, log),
        ScheduledAction::Order(order, quarantine_zone) => {
            issue_order(state, order, quarantine_zone);
        }
        ScheduledAction::Mission(mission) => start_mission(state, content, mission),
    }
}
