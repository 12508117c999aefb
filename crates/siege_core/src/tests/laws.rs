use super::*;
use crate::actions;
use crate::steps;

fn run_law_passives(state: &mut ColonyState, content: &Content) -> SimulationContext {
    let mut ctx = SimulationContext::new();
    let mut log = CausalityLog::new();
    steps::law_passives::execute(state, content, &mut ctx, &mut log);
    ctx
}

#[test]
fn strict_rations_reduces_food_consumption() {
    let content = test_content();
    let mut state = test_state(&content);
    state.enacted_laws.push(LawId::StrictRations);

    let ctx = run_law_passives(&mut state, &content);

    assert!((ctx.food_consumption_mult - 0.75).abs() < 0.01);
    assert_eq!(ctx.unrest_delta, 5);
}

#[test]
fn extended_shifts_boost_all_four_production_lines() {
    let content = test_content();
    let mut state = test_state(&content);
    state.enacted_laws.push(LawId::ExtendedShifts);

    let ctx = run_law_passives(&mut state, &content);

    for mult in [
        ctx.food_production_mult,
        ctx.water_production_mult,
        ctx.materials_production_mult,
        ctx.fuel_production_mult,
    ] {
        assert!((mult - 1.25).abs() < 0.01);
    }
    assert_eq!(ctx.sickness_delta, 8);
}

#[test]
fn emergency_shelters_raise_inner_district_capacity() {
    let content = test_content();
    let mut state = test_state(&content);
    state.enacted_laws.push(LawId::EmergencyShelters);

    run_law_passives(&mut state, &content);

    assert_eq!(
        state.zones[INNER].effective_capacity,
        content.zones[INNER].capacity + 30
    );
}

#[test]
fn medical_triage_queues_sick_deaths_and_halves_clinic_cost() {
    let content = test_content();
    let mut state = test_state(&content);
    state.enacted_laws.push(LawId::MedicalTriage);
    state.sick = 20;

    let ctx = run_law_passives(&mut state, &content);

    assert_eq!(ctx.deaths_sick, 5);
    assert!((ctx.clinic_medicine_cost_mult - 0.5).abs() < 0.01);
}

#[test]
fn medical_triage_queue_caps_at_sick_pool() {
    let content = test_content();
    let mut state = test_state(&content);
    state.enacted_laws.push(LawId::MedicalTriage);
    state.sick = 3;

    let ctx = run_law_passives(&mut state, &content);

    assert_eq!(ctx.deaths_sick, 3);
}

#[test]
fn martial_law_installs_caps() {
    let content = test_content();
    let mut state = test_state(&content);
    state.enacted_laws.push(LawId::MartialLaw);

    let ctx = run_law_passives(&mut state, &content);

    assert_eq!(ctx.unrest_cap, Some(60));
    assert_eq!(ctx.morale_cap, Some(40));
}

#[test]
fn law_passives_compose_multiplicatively() {
    let content = test_content();
    let mut state = test_state(&content);
    state.enacted_laws.push(LawId::ExtendedShifts);
    state.enacted_laws.push(LawId::Curfew);

    let ctx = run_law_passives(&mut state, &content);

    // 1.25 per-line and 0.8 global are staged separately; production applies
    // both, so food effectively runs at 1.25 × 0.8 = 1.0.
    assert!((ctx.food_production_mult - 1.25).abs() < 0.01);
    assert!((ctx.all_production_mult - 0.8).abs() < 0.01);
}

// --- Enactment --------------------------------------------------------

#[test]
fn law_unlock_rules_track_colony_pressure() {
    let content = test_content();
    let mut state = test_state(&content);

    assert!(actions::is_law_unlocked(&state, LawId::StrictRations));
    assert!(!actions::is_law_unlocked(&state, LawId::EmergencyShelters));
    assert!(!actions::is_law_unlocked(&state, LawId::MartialLaw));

    state.zones[FARMS].is_lost = true;
    assert!(actions::is_law_unlocked(&state, LawId::EmergencyShelters));

    state.unrest = 80;
    assert!(actions::is_law_unlocked(&state, LawId::MartialLaw));
}

#[test]
fn enacting_requires_cooldown_between_laws() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut log = CausalityLog::new();

    actions::enact_law(&mut state, &content, LawId::StrictRations, &mut log);
    assert!(state.enacted_laws.contains(&LawId::StrictRations));
    assert_eq!(state.days_since_last_law, 0);

    // Second law immediately after is refused by the 3-day spacing.
    state.food = 50; // unlocks Food Confiscation
    assert!(!actions::can_enact_law(&state, &content, LawId::FoodConfiscation));
    actions::enact_law(&mut state, &content, LawId::FoodConfiscation, &mut log);
    assert!(!state.enacted_laws.contains(&LawId::FoodConfiscation));
}

#[test]
fn laws_enact_at_most_once_per_run() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut log = CausalityLog::new();

    actions::enact_law(&mut state, &content, LawId::StrictRations, &mut log);
    state.days_since_last_law = 3;
    assert!(!actions::can_enact_law(&state, &content, LawId::StrictRations));
}

#[test]
fn public_executions_kill_healthy_first_on_enact() {
    let content = test_content();
    let mut state = test_state(&content);
    state.unrest = 70;
    let mut log = CausalityLog::new();

    actions::enact_law(&mut state, &content, LawId::PublicExecutions, &mut log);

    assert_eq!(state.healthy_workers, 80);
    assert_eq!(state.sick, 15);
    assert_eq!(state.unrest, 70 - 25);
    assert_eq!(state.morale, 55 - 20);
}

#[test]
fn abandon_outer_ring_runs_the_loss_cascade() {
    let content = test_content();
    let mut state = test_state(&content);
    state.zones[FARMS].current_integrity = 30;
    let mut log = CausalityLog::new();

    actions::enact_law(&mut state, &content, LawId::AbandonOuterRing, &mut log);

    assert!(state.zones[FARMS].is_lost);
    assert_eq!(state.zones[FARMS].current_integrity, 0);
    assert_eq!(state.zones[FARMS].current_population, 0);
    // Zone shock (+15) plus the law's own surcharge (+15).
    assert_eq!(state.unrest, 25 + 15 + 15);
    assert_eq!(state.sickness, 20 + 10);
}

#[test]
fn mandatory_guard_service_drafts_workers() {
    let content = test_content();
    let mut state = test_state(&content);
    state.unrest = 45;
    let mut log = CausalityLog::new();

    actions::enact_law(&mut state, &content, LawId::MandatoryGuardService, &mut log);

    assert_eq!(state.healthy_workers, 75);
    assert_eq!(state.guards, 20);
    assert_eq!(state.morale, 45);
}
