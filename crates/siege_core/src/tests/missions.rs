use super::*;
use crate::mission;

const ALL_MISSIONS: [MissionId; 4] = [
    MissionId::ForageBeyondWalls,
    MissionId::NightRaid,
    MissionId::SearchAbandonedHomes,
    MissionId::NegotiateBlackMarket,
];

#[test]
fn odds_sum_to_one_for_every_mission_and_fuel_band() {
    let content = test_content();
    for mission_id in ALL_MISSIONS {
        for fuel in [150, 100, 75, 50, 25, 1, 0] {
            let mut state = test_state(&content);
            state.fuel = fuel;
            let odds = mission_odds(mission_id, &state);
            let sum: f32 = odds.probabilities.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-5,
                "{mission_id:?} at fuel {fuel}: probabilities sum to {sum}"
            );
        }
    }
}

#[test]
fn bad_outcome_grows_monotonically_as_fuel_drops() {
    let content = test_content();
    for mission_id in ALL_MISSIONS {
        let mut last_bad = -1.0f32;
        for fuel in [150, 60, 20, 0] {
            let mut state = test_state(&content);
            state.fuel = fuel;
            let odds = mission_odds(mission_id, &state);
            let bad = odds.probabilities[2];
            assert!(
                bad >= last_bad,
                "{mission_id:?}: bad outcome shrank as fuel dropped ({last_bad} → {bad})"
            );
            last_bad = bad;
        }
    }
}

#[test]
fn forage_odds_at_full_fuel_and_calm_siege() {
    let content = test_content();
    let mut state = test_state(&content);
    state.fuel = 150;
    state.siege_intensity = 1;

    let odds = mission_odds(MissionId::ForageBeyondWalls, &state);

    assert!((odds.probabilities[0] - 0.60).abs() < 0.01);
    assert!((odds.probabilities[1] - 0.25).abs() < 0.01);
    assert!((odds.probabilities[2] - 0.15).abs() < 0.01);
}

#[test]
fn forage_ambush_worsens_under_hot_siege_and_low_fuel() {
    let content = test_content();
    let mut state = test_state(&content);
    state.fuel = 30; // +0.15 risk
    state.siege_intensity = 4; // base 0.30

    let odds = mission_odds(MissionId::ForageBeyondWalls, &state);

    assert!((odds.probabilities[2] - 0.45).abs() < 0.01);
}

#[test]
fn night_raid_preview_adds_under_fuel_surcharge() {
    let content = test_content();
    let mut state = test_state(&content);
    state.fuel = 30; // under 40 → +0.20 base, fuel band → +0.15

    let odds = mission_odds(MissionId::NightRaid, &state);

    assert!((odds.probabilities[2] - 0.55).abs() < 0.01);
    // Remaining mass splits evenly between the two good bands.
    assert!((odds.probabilities[0] - odds.probabilities[1]).abs() < 1e-5);
}

#[test]
fn mission_does_not_resolve_before_completion_day() {
    let content = test_content();
    let mut state = test_state(&content);
    state.active_mission = Some(ActiveMission {
        mission: MissionId::ForageBeyondWalls,
        start_day: 1,
        workers_committed: 10,
        fuel_was_insufficient: false,
    });
    state.meta.day = 3; // needs day ≥ 5
    let mut log = CausalityLog::new();
    let mut rng = make_rng();

    mission::resolve_mission(&mut state, &content, &mut log, &mut rng);

    assert!(state.active_mission.is_some(), "mission still in flight");
}

#[test]
fn forage_resolution_applies_exactly_one_outcome_and_returns_workers() {
    let content = test_content();
    let mut state = test_state(&content);
    state.active_mission = Some(ActiveMission {
        mission: MissionId::ForageBeyondWalls,
        start_day: 1,
        workers_committed: 10,
        fuel_was_insufficient: false,
    });
    state.meta.day = 5;
    let pop_before = state.total_population();
    let food_before = state.food;
    let mut log = CausalityLog::new();
    let mut rng = make_rng();

    mission::resolve_mission(&mut state, &content, &mut log, &mut rng);

    assert!(state.active_mission.is_none(), "workers returned");
    let food_gain = state.food - food_before;
    let deaths = pop_before - state.total_population();
    let outcomes = [
        food_gain == 120 && deaths == 0,
        food_gain == 80 && deaths == 0,
        food_gain == 0 && deaths == 5,
    ];
    assert_eq!(
        outcomes.iter().filter(|hit| **hit).count(),
        1,
        "exactly one outcome band must apply (gain {food_gain}, deaths {deaths})"
    );
}

#[test]
fn night_raid_resolution_lands_in_a_valid_band() {
    let content = test_content();
    let mut state = test_state(&content);
    state.active_mission = Some(ActiveMission {
        mission: MissionId::NightRaid,
        start_day: 2,
        workers_committed: 10,
        fuel_was_insufficient: true,
    });
    state.meta.day = 6;
    let pop_before = state.total_population();
    let mut log = CausalityLog::new();
    let mut rng = make_rng();

    mission::resolve_mission(&mut state, &content, &mut log, &mut rng);

    assert!(state.active_mission.is_none());
    let captured = state.total_population() == pop_before - 8;
    let debuffed = state
        .night_raid_debuff
        .as_ref()
        .is_some_and(|d| d.intensity_reduction == 5 || d.intensity_reduction == 10);
    assert!(captured ^ debuffed, "exactly one of capture/debuff outcomes");
}

#[test]
fn resolution_consumes_exactly_one_draw() {
    // Two identical states resolving with identically seeded generators must
    // agree, and the generators must advance by the same amount.
    let content = test_content();
    let make = |day| {
        let mut s = test_state(&content);
        s.active_mission = Some(ActiveMission {
            mission: MissionId::SearchAbandonedHomes,
            start_day: 1,
            workers_committed: 10,
            fuel_was_insufficient: false,
        });
        s.meta.day = day;
        s
    };
    let mut log = CausalityLog::new();

    let mut a = make(5);
    let mut rng_a = make_rng();
    mission::resolve_mission(&mut a, &content, &mut log, &mut rng_a);

    let mut b = make(5);
    let mut rng_b = make_rng();
    mission::resolve_mission(&mut b, &content, &mut log, &mut rng_b);

    assert_eq!(a.materials, b.materials);
    assert_eq!(a.medicine, b.medicine);
    assert_eq!(a.sickness, b.sickness);
}
