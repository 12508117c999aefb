use super::*;
use crate::actions;

#[test]
fn worker_allocation_enforces_multiples_of_five_and_idle_pool() {
    let content = test_content();
    let mut state = test_state(&content);

    assert!(actions::can_allocate_workers(&state, JobSlot::FoodProduction, 20));
    assert!(!actions::can_allocate_workers(&state, JobSlot::FoodProduction, 3));
    assert!(!actions::can_allocate_workers(&state, JobSlot::FoodProduction, -5));
    assert!(!actions::can_allocate_workers(&state, JobSlot::GuardDuty, 5));
    assert!(!actions::can_allocate_workers(&state, JobSlot::FoodProduction, 90));

    actions::allocate_workers(&mut state, JobSlot::FoodProduction, 20);
    assert_eq!(state.allocation(JobSlot::FoodProduction), 20);

    actions::allocate_workers(&mut state, JobSlot::FoodProduction, -5);
    assert_eq!(state.allocation(JobSlot::FoodProduction), 15);
}

#[test]
fn mutators_are_safe_no_ops_when_preconditions_fail() {
    let content = test_content();
    let mut state = test_state(&content);
    state.materials = 10; // too poor for Inspire the People and evacuation
    let snapshot = serde_json::to_string(&state).unwrap();
    let mut log = CausalityLog::new();

    // All of these violate a precondition and must leave state untouched.
    actions::allocate_workers(&mut state, JobSlot::FoodProduction, 3);
    actions::enact_law(&mut state, &content, LawId::MartialLaw, &mut log); // locked
    actions::issue_order(&mut state, OrderId::InspireThePeople, None);
    actions::evacuate(&mut state, &content, &mut log);
    actions::repair_wells(&mut state); // wells intact
    state.healthy_workers = 5;
    actions::start_mission(&mut state, &content, MissionId::ForageBeyondWalls);
    assert!(state.active_mission.is_none());
    state.healthy_workers = 85;

    let end = serde_json::to_string(&state).unwrap();
    assert_eq!(snapshot, end);
}

#[test]
fn one_order_per_day() {
    let content = test_content();
    let mut state = test_state(&content);

    actions::issue_order(&mut state, OrderId::SoupKitchens, None);
    assert_eq!(state.today_order, Some(OrderId::SoupKitchens));

    actions::issue_order(&mut state, OrderId::CrackdownPatrols, None);
    assert_eq!(state.today_order, Some(OrderId::SoupKitchens));

    actions::cancel_order(&mut state);
    assert!(state.today_order.is_none());
}

#[test]
fn quarantine_order_records_its_target_zone() {
    let content = test_content();
    let mut state = test_state(&content);

    actions::issue_order(&mut state, OrderId::QuarantineDistrict, Some(2));

    assert_eq!(state.today_order, Some(OrderId::QuarantineDistrict));
    assert_eq!(state.quarantine_zone, Some(2));
}

#[test]
fn mission_start_commits_workers_and_captures_fuel_flag() {
    let content = test_content();
    let mut state = test_state(&content);
    state.fuel = 30;

    actions::start_mission(&mut state, &content, MissionId::NightRaid);

    let mission = state.active_mission.as_ref().unwrap();
    assert_eq!(mission.workers_committed, 10);
    assert!(mission.fuel_was_insufficient);
    assert_eq!(state.available_workers(), 75);

    // Only one mission at a time.
    actions::start_mission(&mut state, &content, MissionId::ForageBeyondWalls);
    assert_eq!(
        state.active_mission.as_ref().unwrap().mission,
        MissionId::NightRaid
    );
}

#[test]
fn mission_commitment_sheds_over_allocated_workers() {
    let content = test_content();
    let mut state = test_state(&content);
    assign(&mut state, JobSlot::FoodProduction, 50);
    assign(&mut state, JobSlot::WaterDrawing, 35);
    // All 85 assigned; committing 10 leaves 75 available.

    actions::start_mission(&mut state, &content, MissionId::ForageBeyondWalls);

    assert!(state.assigned_workers() <= state.available_workers());
}

#[test]
fn wells_repair_spends_materials() {
    let content = test_content();
    let mut state = test_state(&content);
    state.wells_damaged = true;

    assert!(actions::can_repair_wells(&state));
    actions::repair_wells(&mut state);

    assert!(!state.wells_damaged);
    assert_eq!(state.materials, 110);
}

#[test]
fn evacuation_requires_eligibility() {
    let content = test_content();
    let mut state = test_state(&content);

    assert!(!actions::can_evacuate(&state, &content));

    state.siege_intensity = 5;
    assert!(actions::can_evacuate(&state, &content));

    state.siege_intensity = 1;
    state.zones[FARMS].current_integrity = 30;
    assert!(actions::can_evacuate(&state, &content));

    state.materials = 10;
    assert!(!actions::can_evacuate(&state, &content));
}

#[test]
fn evacuation_refused_when_only_the_keep_remains() {
    let content = test_content();
    let mut state = test_state(&content);
    for i in 0..KEEP {
        state.zones[i].is_lost = true;
        state.zones[i].current_population = 0;
    }

    assert!(!actions::can_evacuate(&state, &content));
}

#[test]
fn scheduling_is_mutually_exclusive() {
    let content = test_content();
    let mut state = test_state(&content);

    actions::schedule_law(&mut state, &content, LawId::StrictRations);
    assert_eq!(state.scheduled, Some(ScheduledAction::Law(LawId::StrictRations)));

    actions::schedule_mission(&mut state, &content, MissionId::ForageBeyondWalls);
    assert_eq!(
        state.scheduled,
        Some(ScheduledAction::Mission(MissionId::ForageBeyondWalls))
    );

    actions::schedule_order(&mut state, OrderId::SoupKitchens, None);
    assert_eq!(
        state.scheduled,
        Some(ScheduledAction::Order(OrderId::SoupKitchens, None))
    );

    actions::clear_scheduled(&mut state);
    assert!(state.scheduled.is_none());
}

#[test]
fn execute_scheduled_action_applies_and_consumes_the_action() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut log = CausalityLog::new();

    actions::schedule_law(&mut state, &content, LawId::StrictRations);
    actions::execute_scheduled_action(&mut state, &content, &mut log);

    assert!(state.enacted_laws.contains(&LawId::StrictRations));
    assert!(state.scheduled.is_none());
    assert_eq!(state.morale, 45);
}

#[test]
fn stale_scheduled_action_degrades_to_a_no_op() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut log = CausalityLog::new();

    actions::schedule_order(&mut state, OrderId::SoupKitchens, None);
    state.food = 10; // the kitchens can no longer be stocked

    actions::execute_scheduled_action(&mut state, &content, &mut log);

    assert!(state.today_order.is_none());
    assert!(state.scheduled.is_none());
}
