use super::*;

#[test]
fn full_day_runs_all_steps_and_advances_the_day() {
    let content = test_content();
    let mut state = test_state(&content);
    assign(&mut state, JobSlot::FoodProduction, 20);
    assign(&mut state, JobSlot::WaterDrawing, 15);
    assign(&mut state, JobSlot::FuelScavenging, 10);
    assign(&mut state, JobSlot::Repairs, 10);
    assign(&mut state, JobSlot::Sanitation, 5);
    state.materials = 50;

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    let day_before = state.meta.day;
    let ctx = simulate_day(&mut state, &content, &mut log, &mut rng);

    assert_eq!(state.meta.day, day_before + 1);
    assert_ne!(state.food, 320, "consumption must have occurred");
    assert!(!log.entries().is_empty());
    assert_eq!(ctx.food_start, 320);
    assert_state_invariants(&state);
}

#[test]
fn day_counter_does_not_advance_when_the_run_ends() {
    let content = test_content();
    let mut state = test_state(&content);
    state.unrest = 95; // Council Revolt territory

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    simulate_day(&mut state, &content, &mut log, &mut rng);

    assert!(state.is_game_over);
    assert_eq!(state.meta.day, 1, "day must not advance on game over");
}

#[test]
fn loss_priority_breach_beats_council_revolt() {
    let content = test_content();
    let mut state = test_state(&content);
    state.unrest = 95;
    for i in 0..KEEP {
        state.zones[i].is_lost = true;
        state.zones[i].current_population = 0;
    }
    state.zones[KEEP].current_integrity = 1; // today's siege damage fells it
    state.siege_intensity = 6;

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    simulate_day(&mut state, &content, &mut log, &mut rng);

    assert!(state.is_game_over);
    assert_eq!(state.game_over_reason, Some(GameOverReason::Breach));
}

#[test]
fn total_collapse_after_two_dry_days() {
    let content = test_content();
    let mut state = test_state(&content);
    state.food = 0;
    state.water = 0;
    state.fuel = 500;
    state.unrest = 0;
    state.consecutive_food_water_zero_days = 1;
    state.enacted_laws.push(LawId::MartialLaw); // hold unrest below revolt

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    simulate_day(&mut state, &content, &mut log, &mut rng);

    assert!(state.is_game_over);
    assert_eq!(state.game_over_reason, Some(GameOverReason::TotalCollapse));
}

#[test]
fn victory_on_surviving_past_the_final_day() {
    let content = test_content();
    let mut state = test_state(&content);
    state.meta.day = 40;
    state.food = 2000;
    state.water = 2000;
    state.fuel = 2000;
    state.siege_intensity = 0;
    state.guards = 50;

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    simulate_day(&mut state, &content, &mut log, &mut rng);

    assert!(!state.is_game_over);
    assert!(state.is_victory);
    assert_eq!(state.meta.day, 41);
}

#[test]
fn order_and_quarantine_clear_at_day_end() {
    let content = test_content();
    let mut state = test_state(&content);
    state.today_order = Some(OrderId::QuarantineDistrict);
    state.quarantine_zone = Some(2);

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    simulate_day(&mut state, &content, &mut log, &mut rng);

    assert!(state.today_order.is_none());
    assert!(state.quarantine_zone.is_none());
}

#[test]
fn cooldown_counters_tick_daily() {
    let content = test_content();
    let mut state = test_state(&content);
    state.days_since_last_law = 0;
    state.days_since_last_law_enacted = 0;

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    simulate_day(&mut state, &content, &mut log, &mut rng);

    assert_eq!(state.days_since_last_law, 1);
    assert_eq!(state.days_since_last_law_enacted, 1);
}

#[test]
fn queued_deaths_apply_default_queue_before_healthy_first() {
    let content = test_content();
    let mut state = test_state(&content);
    state.today_order = Some(OrderId::CrackdownPatrols); // queues 2 default deaths

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    simulate_day(&mut state, &content, &mut log, &mut rng);

    // Crackdown's 2 deaths follow the default priority: sick first.
    assert_eq!(state.total_population(), 118);
    assert_eq!(state.sick, 13);
    assert_state_invariants(&state);
}

#[test]
fn pre_simulation_costs_deduct_order_resources() {
    let content = test_content();
    let mut state = test_state(&content);
    state.today_order = Some(OrderId::DivertSupplies);
    let mut log = CausalityLog::new();

    deduct_pre_simulation_costs(&mut state, &mut log);

    assert_eq!(state.food, 320 - 30);
    assert_eq!(state.water, 360 - 20);
}

#[test]
fn pre_simulation_costs_charge_night_raid_fuel_daily() {
    let content = test_content();
    let mut state = test_state(&content);
    state.active_mission = Some(ActiveMission {
        mission: MissionId::NightRaid,
        start_day: 1,
        workers_committed: 10,
        fuel_was_insufficient: false,
    });
    let mut log = CausalityLog::new();

    deduct_pre_simulation_costs(&mut state, &mut log);
    assert_eq!(state.fuel, 200);

    deduct_pre_simulation_costs(&mut state, &mut log);
    assert_eq!(state.fuel, 160);
}

#[test]
fn simulation_is_deterministic_for_a_fixed_seed() {
    let content = test_content();

    let run = || {
        let mut state = test_state(&content);
        assign(&mut state, JobSlot::FoodProduction, 30);
        assign(&mut state, JobSlot::WaterDrawing, 20);
        assign(&mut state, JobSlot::FuelScavenging, 15);
        let mut log = CausalityLog::new();
        let mut rng = make_rng();
        for _ in 0..10 {
            if state.is_game_over || state.is_victory {
                break;
            }
            deduct_pre_simulation_costs(&mut state, &mut log);
            simulate_day(&mut state, &content, &mut log, &mut rng);
        }
        state
    };

    let a = run();
    let b = run();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn meters_and_resources_stay_in_range_across_a_long_run() {
    let content = test_content();
    let mut state = test_state(&content);
    assign(&mut state, JobSlot::FoodProduction, 25);
    assign(&mut state, JobSlot::WaterDrawing, 15);
    assign(&mut state, JobSlot::FuelScavenging, 15);
    assign(&mut state, JobSlot::Repairs, 10);

    let mut log = CausalityLog::new();
    let mut rng = make_rng();
    for _ in 0..45 {
        if state.is_game_over || state.is_victory {
            break;
        }
        let day_before = state.meta.day;
        deduct_pre_simulation_costs(&mut state, &mut log);
        simulate_day(&mut state, &content, &mut log, &mut rng);
        assert_state_invariants(&state);
        if !state.is_game_over {
            assert_eq!(state.meta.day, day_before + 1);
        }
    }
}
