//! Headless play: a directive source that stands in for the player.
//!
//! The [`Steward`] drives full-length runs deterministically — it rebalances
//! worker shifts against the colony's needs, answers crises with emergency
//! orders, enacts situational laws, and abandons a ring as a last resort.

use serde::{Deserialize, Serialize};
use siege_core::{actions, CausalityLog, ColonyState, Content, JobSlot, LawId, MissionId, OrderId};

/// One planned player action for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    Allocate { slot: JobSlot, delta: i32 },
    ScheduleLaw(LawId),
    ScheduleOrder(OrderId),
    ScheduleMission(MissionId),
    RepairWells,
    Evacuate,
}

pub trait DirectiveSource {
    fn plan_day(&mut self, state: &ColonyState, content: &Content) -> Vec<Directive>;
}

/// Apply a planned directive through the action layer; invalid directives
/// degrade to no-ops there.
pub fn apply_directive(
    state: &mut ColonyState,
    content: &Content,
    directive: &Directive,
    log: &mut CausalityLog,
) {
    match directive {
        Directive::Allocate { slot, delta } => actions::allocate_workers(state, *slot, *delta),
        Directive::ScheduleLaw(law) => actions::schedule_law(state, content, *law),
        Directive::ScheduleOrder(order) => actions::schedule_order(state, *order, None),
        Directive::ScheduleMission(mission) => actions::schedule_mission(state, content, *mission),
        Directive::RepairWells => actions::repair_wells(state),
        Directive::Evacuate => actions::evacuate(state, content, log),
    }
}

/// Drives the colony automatically:
/// 1. Repair sabotaged wells as soon as materials allow.
/// 2. Rebalance worker shifts to the day's needs.
/// 3. Answer crises with an emergency order or a situational law.
/// 4. Launch a forage mission when the larder runs thin.
/// 5. Evacuate a collapsing perimeter as a last resort.
pub struct Steward;

impl Steward {
    /// Target allocation per slot, spending at most the available pool in
    /// whole work crews of five.
    fn plan_shifts(state: &ColonyState, content: &Content) -> Vec<(JobSlot, i32)> {
        let available = state.available_workers();
        let mut budget = available - available % 5;
        let mut targets: Vec<(JobSlot, i32)> = Vec::new();

        let mut take = |want: i32, budget: &mut i32| -> i32 {
            let granted = want.min(*budget).max(0);
            *budget -= granted;
            granted
        };

        let food = take(30, &mut budget);
        targets.push((JobSlot::FoodProduction, food));
        let water = take(20, &mut budget);
        targets.push((JobSlot::WaterDrawing, water));
        let fuel = take(15, &mut budget);
        targets.push((JobSlot::FuelScavenging, fuel));

        let perim = state.active_perimeter();
        let damaged =
            state.zones[perim].current_integrity < content.zones[perim].base_integrity;
        let repairs = if damaged && state.materials >= content.constants.repair_materials_cost {
            take(10, &mut budget)
        } else {
            0
        };
        targets.push((JobSlot::Repairs, repairs));

        let sanitation = if state.sickness > 25 { take(10, &mut budget) } else { 0 };
        targets.push((JobSlot::Sanitation, sanitation));

        let clinic = if state.sickness > 40
            && state.medicine >= content.constants.clinic_medicine_cost
        {
            take(5, &mut budget)
        } else {
            0
        };
        targets.push((JobSlot::ClinicStaff, clinic));

        // Idle hands breed unrest: the remainder goes back to the fields.
        if budget > 0 {
            if let Some(entry) = targets
                .iter_mut()
                .find(|(slot, _)| *slot == JobSlot::FoodProduction)
            {
                entry.1 += budget;
            }
        }

        targets
    }

    fn crisis_action(state: &ColonyState, content: &Content) -> Option<Directive> {
        // Situational laws first — they are permanent answers.
        for law in [
            LawId::MartialLaw,
            LawId::Curfew,
            LawId::FoodConfiscation,
            LawId::MedicalTriage,
            LawId::DilutedWater,
        ] {
            if actions::can_enact_law(state, content, law) {
                return Some(Directive::ScheduleLaw(law));
            }
        }

        // One-day orders for acute pressure.
        if state.unrest >= 60 && actions::can_issue_order(state, OrderId::SoupKitchens) {
            return Some(Directive::ScheduleOrder(OrderId::SoupKitchens));
        }
        if state.unrest >= 70 && actions::can_issue_order(state, OrderId::CrackdownPatrols) {
            return Some(Directive::ScheduleOrder(OrderId::CrackdownPatrols));
        }
        if state.sickness >= 60 && actions::can_issue_order(state, OrderId::QuarantineDistrict) {
            return Some(Directive::ScheduleOrder(OrderId::QuarantineDistrict));
        }
        if state.morale <= 30 && actions::can_issue_order(state, OrderId::InspireThePeople) {
            return Some(Directive::ScheduleOrder(OrderId::InspireThePeople));
        }

        // A thin larder sends the foragers out.
        if state.food < 150 && actions::can_start_mission(state, content) {
            return Some(Directive::ScheduleMission(MissionId::ForageBeyondWalls));
        }

        None
    }
}

impl DirectiveSource for Steward {
    fn plan_day(&mut self, state: &ColonyState, content: &Content) -> Vec<Directive> {
        let mut directives = Vec::new();

        if actions::can_repair_wells(state) {
            directives.push(Directive::RepairWells);
        }

        // Shift rebalancing: free workers before assigning them elsewhere.
        let targets = Self::plan_shifts(state, content);
        let mut deltas: Vec<(JobSlot, i32)> = targets
            .iter()
            .map(|(slot, target)| (*slot, target - state.allocation(*slot)))
            .filter(|(_, delta)| *delta != 0)
            .collect();
        deltas.sort_by_key(|(_, delta)| *delta);
        for (slot, delta) in deltas {
            directives.push(Directive::Allocate { slot, delta });
        }

        if let Some(action) = Self::crisis_action(state, content) {
            directives.push(action);
        }

        // Last resort: give up a crumbling ring rather than lose it overnight.
        let perim = state.active_perimeter();
        if state.zones[perim].current_integrity < 15 && actions::can_evacuate(state, content) {
            directives.push(Directive::Evacuate);
        }

        directives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siege_core::test_fixtures::{base_content, base_state};

    #[test]
    fn steward_repairs_damaged_wells() {
        let content = base_content();
        let mut state = base_state(&content);
        state.wells_damaged = true;

        let directives = Steward.plan_day(&state, &content);

        assert!(directives.contains(&Directive::RepairWells));
    }

    #[test]
    fn steward_allocation_fits_the_available_pool() {
        let content = base_content();
        let mut state = base_state(&content);
        let directives = Steward.plan_day(&state, &content);

        let mut log = CausalityLog::new();
        for directive in &directives {
            apply_directive(&mut state, &content, directive, &mut log);
        }

        assert!(state.assigned_workers() <= state.available_workers());
        assert!(
            state.idle_workers() < 10,
            "steward leaves {} workers idle",
            state.idle_workers()
        );
        for slot in JobSlot::ALLOCATABLE {
            assert_eq!(state.allocation(slot) % 5, 0);
        }
    }

    #[test]
    fn steward_rebalances_when_the_pool_shrinks() {
        let content = base_content();
        let mut state = base_state(&content);
        let mut log = CausalityLog::new();
        for directive in &Steward.plan_day(&state, &content) {
            apply_directive(&mut state, &content, directive, &mut log);
        }

        state.healthy_workers = 50;
        siege_core::population::validate_worker_allocations(&mut state);
        for directive in &Steward.plan_day(&state, &content) {
            apply_directive(&mut state, &content, directive, &mut log);
        }

        assert!(state.assigned_workers() <= state.available_workers());
    }

    #[test]
    fn steward_orders_soup_kitchens_under_high_unrest() {
        let content = base_content();
        let mut state = base_state(&content);
        state.unrest = 65;

        let directives = Steward.plan_day(&state, &content);

        // Curfew unlocks at unrest > 50 and takes precedence as a permanent fix.
        assert!(
            directives.contains(&Directive::ScheduleLaw(LawId::Curfew))
                || directives.contains(&Directive::ScheduleOrder(OrderId::SoupKitchens))
        );
    }

    #[test]
    fn steward_sends_foragers_when_food_runs_thin() {
        let content = base_content();
        let mut state = base_state(&content);
        state.food = 200; // no laws unlock, larder not yet thin
        let calm = Steward.plan_day(&state, &content);
        assert!(!calm
            .iter()
            .any(|d| matches!(d, Directive::ScheduleMission(_))));

        state.food = 120;
        state.days_since_last_law = 0; // keep laws off the table
        let hungry = Steward.plan_day(&state, &content);
        assert!(hungry.contains(&Directive::ScheduleMission(MissionId::ForageBeyondWalls)));
    }

    #[test]
    fn steward_evacuates_a_collapsing_perimeter() {
        let content = base_content();
        let mut state = base_state(&content);
        state.zones[0].current_integrity = 10;

        let directives = Steward.plan_day(&state, &content);

        assert!(directives.contains(&Directive::Evacuate));
    }

    #[test]
    fn steward_plan_is_deterministic() {
        let content = base_content();
        let state = base_state(&content);

        let a = Steward.plan_day(&state, &content);
        let b = Steward.plan_day(&state, &content);

        assert_eq!(a, b);
    }
}
