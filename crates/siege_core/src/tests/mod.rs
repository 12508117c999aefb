use crate::test_fixtures::{base_content, base_state, make_rng};
use crate::*;

mod actions;
mod laws;
mod missions;
mod simulator;

// --- Shared test helpers ------------------------------------------------

fn test_content() -> Content {
    base_content()
}

fn test_state(content: &Content) -> ColonyState {
    base_state(content)
}

fn assign(state: &mut ColonyState, slot: JobSlot, workers: i32) {
    state.worker_allocation.insert(slot, workers);
}

/// Every resource non-negative, every meter in range, intensity in range.
fn assert_state_invariants(state: &ColonyState) {
    assert!(state.food >= 0, "food went negative");
    assert!(state.water >= 0, "water went negative");
    assert!(state.fuel >= 0, "fuel went negative");
    assert!(state.medicine >= 0, "medicine went negative");
    assert!(state.materials >= 0, "materials went negative");
    assert!((0..=100).contains(&state.morale), "morale out of range");
    assert!((0..=100).contains(&state.unrest), "unrest out of range");
    assert!((0..=100).contains(&state.sickness), "sickness out of range");
    assert!(
        (0..=6).contains(&state.siege_intensity),
        "siege intensity out of range"
    );
    assert!(state.healthy_workers >= 0);
    assert!(state.guards >= 0);
    assert!(state.sick >= 0);
    assert!(state.elderly >= 0);
    for zone in &state.zones {
        assert!(zone.current_population >= 0);
        assert!(!zone.is_lost || zone.current_integrity == 0);
    }
}
