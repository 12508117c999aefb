//! Mission resolution (sub-step 12b) and the read-only odds preview.
//!
//! Both paths share one band computation so the preview can never drift from
//! the resolution arithmetic. Every mission has three outcome bands; the bad
//! band worsens with the fuel situation and the rest of the probability mass
//! is split between best and moderate preserving their unmodified ratio.

use rand::Rng;

use crate::log::{CausalityCategory, CausalityLog};
use crate::population;
use crate::types::{ColonyState, Content, MissionId, NightRaidDebuff};

/// Additive bad-outcome modifier from the current fuel stock.
fn fuel_risk(fuel: i32) -> f32 {
    if fuel >= 100 {
        0.0
    } else if fuel >= 50 {
        0.05
    } else if fuel >= 1 {
        0.15
    } else {
        0.25
    }
}

/// (best, moderate, bad) probabilities for a mission resolving now.
/// `night_raid_under_fueled` only matters for the Night Raid surcharge.
fn outcome_bands(
    mission: MissionId,
    state: &ColonyState,
    night_raid_under_fueled: bool,
) -> (f32, f32, f32) {
    let risk = fuel_risk(state.fuel);
    match mission {
        MissionId::ForageBeyondWalls => {
            let base_ambush = if state.siege_intensity >= 4 { 0.30 } else { 0.15 };
            let bad = base_ambush + risk;
            let remaining = 1.0 - bad;
            // Unmodified best/moderate split, tightened under a hot siege.
            let (orig_best, orig_moderate) = if state.siege_intensity >= 4 {
                (0.5294, 0.1706)
            } else {
                (0.60, 0.25)
            };
            let total = orig_best + orig_moderate;
            (
                remaining * (orig_best / total),
                remaining * (orig_moderate / total),
                bad,
            )
        }
        MissionId::NightRaid => {
            let mut base_captured = 0.20;
            if night_raid_under_fueled {
                base_captured += 0.20;
            }
            let bad = base_captured + risk;
            let remaining = 1.0 - bad;
            (remaining * 0.5, remaining * 0.5, bad)
        }
        MissionId::SearchAbandonedHomes | MissionId::NegotiateBlackMarket => {
            let bad = 0.20 + risk;
            let remaining = 1.0 - bad;
            (
                remaining * (0.50 / 0.80),
                remaining * (0.30 / 0.80),
                bad,
            )
        }
    }
}

/// Outcome probabilities and labels for UI/CLI preview. Probabilities sum to
/// 1 and are ordered best / moderate / bad. Consumes no random draw.
#[derive(Debug, Clone)]
pub struct MissionOdds {
    pub probabilities: [f32; 3],
    pub labels: [&'static str; 3],
}

pub fn mission_odds(mission: MissionId, state: &ColonyState) -> MissionOdds {
    // Preview derives the Night Raid surcharge from the current stock; the
    // live resolution uses the flag captured at launch.
    let under_fueled = state.fuel < 40;
    let (best, moderate, bad) = outcome_bands(mission, state, under_fueled);
    let labels = match mission {
        MissionId::ForageBeyondWalls => ["+120 Food", "+80 Food", "Ambushed: 5 deaths"],
        MissionId::NightRaid => [
            "Siege -10 (3 days)",
            "Siege -5 (3 days)",
            "Captured: 8 deaths +15 Unrest",
        ],
        MissionId::SearchAbandonedHomes => {
            ["+60 Materials", "+40 Medicine", "Plague: Sickness +15"]
        }
        MissionId::NegotiateBlackMarket => ["+100 Water", "+80 Food", "Scandal: Unrest +20"],
    };
    MissionOdds {
        probabilities: [best, moderate, bad],
        labels,
    }
}

/// Resolve the active mission if its duration has elapsed; no-op otherwise.
/// Workers return on every outcome.
pub(crate) fn resolve_mission(
    state: &mut ColonyState,
    content: &Content,
    log: &mut CausalityLog,
    rng: &mut impl Rng,
) {
    let Some(active) = state.active_mission.clone() else {
        return;
    };

    let duration = content.mission_duration(active.mission);
    if state.meta.day < active.start_day + duration - 1 {
        return; // still in flight
    }

    let (_, moderate, bad) = outcome_bands(active.mission, state, active.fuel_was_insufficient);
    let roll: f32 = rng.gen();

    match active.mission {
        MissionId::ForageBeyondWalls => resolve_forage(state, roll, moderate, bad, log),
        MissionId::NightRaid => resolve_night_raid(state, roll, moderate, bad, log),
        MissionId::SearchAbandonedHomes => resolve_search_homes(state, roll, moderate, bad, log),
        MissionId::NegotiateBlackMarket => resolve_black_market(state, roll, moderate, bad, log),
    }

    state.active_mission = None;
}

fn pct(p: f32) -> String {
    format!("{:.0}%", p * 100.0)
}

fn resolve_forage(state: &mut ColonyState, roll: f32, moderate: f32, bad: f32, log: &mut CausalityLog) {
    if roll < bad {
        population::apply_deaths_default(state, 5, log, "Forage Ambush (M1)");
        log.add_flat(
            CausalityCategory::Mission,
            "Forage (M1): Ambushed",
            0,
            format!("Forage mission AMBUSHED! 5 deaths (chance: {})", pct(bad)),
        );
    } else if roll < bad + moderate {
        state.food += 80;
        log.add_flat(
            CausalityCategory::Mission,
            "Forage (M1): Moderate",
            80,
            format!("Forage mission returned with +80 Food (chance: {})", pct(moderate)),
        );
    } else {
        state.food += 120;
        log.add_flat(
            CausalityCategory::Mission,
            "Forage (M1): Great",
            120,
            format!(
                "Forage mission returned with +120 Food (chance: {})",
                pct(1.0 - bad - moderate)
            ),
        );
    }
}

fn resolve_night_raid(
    state: &mut ColonyState,
    roll: f32,
    moderate: f32,
    bad: f32,
    log: &mut CausalityLog,
) {
    if roll < bad {
        population::apply_deaths_default(state, 8, log, "Night Raid Captured (M2)");
        state.unrest += 15;
        state.siege_intensity = (state.siege_intensity + 1).min(6);
        log.add_flat(
            CausalityCategory::Mission,
            "Night Raid (M2): Captured",
            0,
            format!(
                "Night Raid CAPTURED! 8 deaths, Unrest +15, Siege Intensity +1 (chance: {})",
                pct(bad)
            ),
        );
    } else if roll < bad + moderate {
        state.night_raid_debuff = Some(NightRaidDebuff {
            intensity_reduction: 5,
            days_remaining: 3,
        });
        log.add_flat(
            CausalityCategory::Mission,
            "Night Raid (M2): Moderate",
            0,
            format!(
                "Night Raid partial success: Siege Intensity -5 for 3 days (chance: {})",
                pct(moderate)
            ),
        );
    } else {
        state.night_raid_debuff = Some(NightRaidDebuff {
            intensity_reduction: 10,
            days_remaining: 3,
        });
        log.add_flat(
            CausalityCategory::Mission,
            "Night Raid (M2): Great",
            0,
            format!(
                "Night Raid great success: Siege Intensity -10 for 3 days (chance: {})",
                pct(1.0 - bad - moderate)
            ),
        );
    }
}

fn resolve_search_homes(
    state: &mut ColonyState,
    roll: f32,
    moderate: f32,
    bad: f32,
    log: &mut CausalityLog,
) {
    if roll < bad {
        state.sickness += 15;
        log.add_flat(
            CausalityCategory::Mission,
            "Search Homes (M3): Plague",
            15,
            format!("Search mission: Plague exposure! Sickness +15 (chance: {})", pct(bad)),
        );
    } else if roll < bad + moderate {
        state.medicine += 40;
        log.add_flat(
            CausalityCategory::Mission,
            "Search Homes (M3): Medicine",
            40,
            format!("Search mission found +40 Medicine (chance: {})", pct(moderate)),
        );
    } else {
        state.materials += 60;
        log.add_flat(
            CausalityCategory::Mission,
            "Search Homes (M3): Materials",
            60,
            format!(
                "Search mission found +60 Materials (chance: {})",
                pct(1.0 - bad - moderate)
            ),
        );
    }
}

fn resolve_black_market(
    state: &mut ColonyState,
    roll: f32,
    moderate: f32,
    bad: f32,
    log: &mut CausalityLog,
) {
    if roll < bad {
        state.unrest += 20;
        log.add_flat(
            CausalityCategory::Mission,
            "Black Market (M4): Scandal",
            20,
            format!("Black Market scandal! Unrest +20 (chance: {})", pct(bad)),
        );
    } else if roll < bad + moderate {
        state.food += 80;
        log.add_flat(
            CausalityCategory::Mission,
            "Black Market (M4): Food",
            80,
            format!("Black Market: +80 Food (chance: {})", pct(moderate)),
        );
    } else {
        state.water += 100;
        log.add_flat(
            CausalityCategory::Mission,
            "Black Market (M4): Water",
            100,
            format!(
                "Black Market: +100 Water (chance: {})",
                pct(1.0 - bad - moderate)
            ),
        );
    }
}
