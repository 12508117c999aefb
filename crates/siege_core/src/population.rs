//! Population bookkeeping: death priorities, desertion, worker-allocation
//! shedding, forced inward migration, and zone population (re)initialization.

use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content, JobSlot};

#[derive(Debug, Clone, Copy)]
enum Pool {
    Sick,
    Elderly,
    Healthy,
    Guards,
}

fn drain_pool(state: &mut ColonyState, pool: Pool, remaining: &mut i32) -> i32 {
    let slot = match pool {
        Pool::Sick => &mut state.sick,
        Pool::Elderly => &mut state.elderly,
        Pool::Healthy => &mut state.healthy_workers,
        Pool::Guards => &mut state.guards,
    };
    let taken = (*remaining).min(*slot);
    *slot -= taken;
    *remaining -= taken;
    taken
}

fn apply_deaths(
    state: &mut ColonyState,
    count: i32,
    priority: [Pool; 4],
    log: &mut CausalityLog,
    source: &str,
    note: &str,
) {
    if count <= 0 {
        return;
    }
    let mut remaining = count;
    let mut total_killed = 0;
    for pool in priority {
        if remaining <= 0 {
            break;
        }
        total_killed += drain_pool(state, pool, &mut remaining);
    }
    if total_killed > 0 {
        log.add_flat(
            CausalityCategory::Death,
            source,
            -total_killed,
            format!("{total_killed} deaths ({source}{note})"),
        );
        validate_worker_allocations(state);
    }
}

/// Default death priority: Sick → Elderly → Healthy → Guards.
pub fn apply_deaths_default(state: &mut ColonyState, count: i32, log: &mut CausalityLog, source: &str) {
    apply_deaths(
        state,
        count,
        [Pool::Sick, Pool::Elderly, Pool::Healthy, Pool::Guards],
        log,
        source,
        "",
    );
}

/// Public Executions priority: Healthy → Sick → Elderly → Guards.
pub fn apply_deaths_healthy_first(
    state: &mut ColonyState,
    count: i32,
    log: &mut CausalityLog,
    source: &str,
) {
    apply_deaths(
        state,
        count,
        [Pool::Healthy, Pool::Sick, Pool::Elderly, Pool::Guards],
        log,
        source,
        ", healthy first",
    );
}

/// Kill specifically from the sick population (Medical Triage).
pub fn apply_deaths_sick_only(
    state: &mut ColonyState,
    count: i32,
    log: &mut CausalityLog,
    source: &str,
) {
    if count <= 0 {
        return;
    }
    let killed = count.min(state.sick);
    state.sick -= killed;
    if killed > 0 {
        log.add_flat(
            CausalityCategory::Death,
            source,
            -killed,
            format!("{killed} sick deaths ({source})"),
        );
    }
}

/// Remove healthy workers specifically (desertion events).
pub fn apply_desertion(state: &mut ColonyState, count: i32, log: &mut CausalityLog) {
    let deserted = count.min(state.healthy_workers);
    state.healthy_workers -= deserted;
    if deserted > 0 {
        log.add_flat(
            CausalityCategory::Death,
            "Desertion Wave (E3)",
            -deserted,
            format!("{deserted} healthy workers deserted"),
        );
        validate_worker_allocations(state);
    }
}

/// If assigned workers exceed the available pool (after deaths, desertion, or
/// a mission commitment), unassign the excess starting from the least
/// critical slots, in whole multiples of 5, rounding up to remove enough.
pub fn validate_worker_allocations(state: &mut ColonyState) {
    let available = state.available_workers();
    let assigned = state.assigned_workers();
    if assigned <= available {
        return;
    }

    let mut excess = assigned - available;
    for slot in JobSlot::SHED_ORDER {
        if excess <= 0 {
            break;
        }
        let current = state.allocation(slot);
        let mut remove = current.min(excess);
        remove = ((remove + 4) / 5) * 5;
        remove = remove.min(current);
        if remove > 0 {
            state.worker_allocation.insert(slot, current - remove);
            excess -= remove;
        }
    }
}

/// Move all population from a lost/evacuated zone to the next inner non-lost
/// zone. Finding no receiving zone is an internal-consistency anomaly (the
/// Keep cannot be lost through this path) and is logged as such.
pub fn force_population_inward(
    state: &mut ColonyState,
    content: &Content,
    lost_zone: usize,
    log: &mut CausalityLog,
) {
    let displaced = state.zones[lost_zone].current_population;
    state.zones[lost_zone].current_population = 0;
    if displaced <= 0 {
        return;
    }

    for i in (lost_zone + 1)..state.zones.len() {
        if !state.zones[i].is_lost {
            state.zones[i].current_population += displaced;
            log.add_flat(
                CausalityCategory::Population,
                "Forced Inward",
                displaced,
                format!(
                    "{displaced} displaced from {} → {}",
                    content.zones[lost_zone].name, content.zones[i].name
                ),
            );
            return;
        }
    }

    debug_assert!(false, "no zone available to receive displaced population");
    log.add_flat(
        CausalityCategory::General,
        "Migration Anomaly",
        displaced,
        format!(
            "{displaced} displaced from {} had no receiving zone",
            content.zones[lost_zone].name
        ),
    );
}

/// Fill zones outer-to-inner with the total population, up to each capacity.
pub fn initialize_zone_populations(state: &mut ColonyState) {
    let mut remaining = state.total_population();
    for zone in &mut state.zones {
        let placed = zone.effective_capacity.min(remaining);
        zone.current_population = placed;
        remaining -= placed;
    }
}

/// After deaths shrink the total population, trim the now-excess headcount
/// from the outermost non-lost zones first. Deaths are pool-wide, not
/// zone-aware; this keeps the per-zone sum consistent with the total.
pub fn recompute_zone_populations_after_deaths(state: &mut ColonyState) {
    let in_zones: i32 = state
        .zones
        .iter()
        .filter(|z| !z.is_lost)
        .map(|z| z.current_population)
        .sum();

    let mut excess = in_zones - state.total_population();
    if excess <= 0 {
        return;
    }

    for zone in &mut state.zones {
        if excess <= 0 {
            break;
        }
        if zone.is_lost {
            continue;
        }
        let removed = zone.current_population.min(excess);
        zone.current_population -= removed;
        excess -= removed;
    }
}
