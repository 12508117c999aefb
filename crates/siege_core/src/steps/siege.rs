//! Step 10: siege damage to the active perimeter.
//!
//! Handles the intensity escalation schedule and the decaying night-raid
//! debuff. Escalation lands after today's effective intensity is captured, so
//! it bites from the next day onward.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content};
use crate::zone_loss;

pub(crate) fn execute(
    state: &mut ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
) {
    let mut effective_intensity = state.siege_intensity;
    if let Some(debuff) = &mut state.night_raid_debuff {
        effective_intensity = (effective_intensity - debuff.intensity_reduction).max(0);
        debuff.days_remaining -= 1;
        let reduction = debuff.intensity_reduction;
        let days_left = debuff.days_remaining;
        log.add_flat(
            CausalityCategory::SiegeDamage,
            "Night Raid Debuff",
            -reduction,
            format!("Effective intensity reduced by {reduction} (Night Raid, {} days left)", days_left + 1),
        );
        if days_left <= 0 {
            state.night_raid_debuff = None;
        }
    }

    let interval = content.constants.siege_escalation_interval_days;
    if state.meta.day > 1 && (state.meta.day - 1) % interval == 0 {
        let old_intensity = state.siege_intensity;
        state.siege_intensity = (state.siege_intensity + 1).min(6);
        if state.siege_intensity > old_intensity {
            log.add_flat(
                CausalityCategory::SiegeDamage,
                "Intensity Escalation",
                1,
                format!(
                    "Siege Intensity: {old_intensity} → {} (every {interval} days)",
                    state.siege_intensity
                ),
            );
        }
    }

    let perim = state.active_perimeter();
    let perim_def = &content.zones[perim];
    let base_damage = (3 + effective_intensity) as f32;
    let raw_damage = base_damage * perim_def.perimeter_factor;
    let after_guards = (raw_damage - ctx.siege_damage_reduction as f32).max(0.0);
    let final_damage = (after_guards * ctx.siege_damage_mult).floor() as i32;

    state.zones[perim].current_integrity -= final_damage;

    log.add_flat(
        CausalityCategory::SiegeDamage,
        "Siege Damage",
        -final_damage,
        format!(
            "Siege: (3+{effective_intensity}) × {:.1} - {} guards × {:.2} = {final_damage} dmg → {} ({}/{})",
            perim_def.perimeter_factor,
            ctx.siege_damage_reduction,
            ctx.siege_damage_mult,
            perim_def.name,
            state.zones[perim].current_integrity,
            perim_def.base_integrity
        ),
    );

    zone_loss::try_apply_zone_loss(state, content, perim, Some(ctx), log, "Siege Damage");
}
