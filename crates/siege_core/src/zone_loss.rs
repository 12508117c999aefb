//! The single code path for zone loss and keep breach.
//!
//! Siege damage, wall-breach events, Abandon Outer Ring, and evacuation all
//! route through [`try_apply_zone_loss`] so the cascade is identical at every
//! call site; only the cause label differs.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::population;
use crate::types::{ColonyState, Content};

/// Checks whether a zone has reached 0 integrity and, if so, applies the
/// standard on-loss effects (stat shock, population migration, optional
/// production note). Returns true if the zone was lost or the keep breached.
///
/// `ctx` may be None outside the day pipeline (player abandonment actions).
pub fn try_apply_zone_loss(
    state: &mut ColonyState,
    content: &Content,
    zone: usize,
    ctx: Option<&mut SimulationContext>,
    log: &mut CausalityLog,
    cause: &str,
) -> bool {
    if state.zones[zone].current_integrity > 0 {
        return false;
    }

    state.zones[zone].current_integrity = 0;
    let def = &content.zones[zone];

    if def.is_keep {
        if let Some(ctx) = ctx {
            ctx.keep_breached = true;
        }
        log.add_flat(
            CausalityCategory::Integrity,
            "KEEP BREACHED",
            0,
            format!("Keep integrity reached 0 — BREACH GAME OVER ({cause})"),
        );
        return true;
    }

    state.zones[zone].is_lost = true;

    state.unrest += def.on_loss_unrest;
    state.sickness += def.on_loss_sickness;
    state.morale += def.on_loss_morale;
    state.clamp_meters();

    log.add_flat(
        CausalityCategory::Integrity,
        format!("Zone Lost: {}", def.name),
        0,
        format!(
            "{} LOST! Unrest +{}, Sickness +{}, Morale {} ({cause})",
            def.name, def.on_loss_unrest, def.on_loss_sickness, def.on_loss_morale
        ),
    );

    if let Some(note) = &def.on_loss_production_note {
        log.add_flat(CausalityCategory::Production, "Zone Loss Production", 0, note.clone());
    }

    population::force_population_inward(state, content, zone, log);

    true
}
