//! Step 13: loss conditions, checked in strict priority order.
//! First match wins: Keep Breach → Council Revolt → Total Collapse.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, GameOverReason, KEEP};

pub(crate) fn execute(state: &mut ColonyState, ctx: &SimulationContext, log: &mut CausalityLog) {
    if ctx.keep_breached || state.zones[KEEP].current_integrity <= 0 {
        state.is_game_over = true;
        state.game_over_reason = Some(GameOverReason::Breach);
        log.add_flat(
            CausalityCategory::General,
            "GAME OVER",
            0,
            "The Keep has been breached. The city has fallen.",
        );
        return;
    }

    if state.unrest > 85 {
        state.is_game_over = true;
        state.game_over_reason = Some(GameOverReason::CouncilRevolt);
        log.add_flat(
            CausalityCategory::General,
            "GAME OVER",
            0,
            format!(
                "Council Revolt! Unrest reached {} (> 85). The people have overthrown you.",
                state.unrest
            ),
        );
        return;
    }

    if state.consecutive_food_water_zero_days >= 2 {
        state.is_game_over = true;
        state.game_over_reason = Some(GameOverReason::TotalCollapse);
        log.add_flat(
            CausalityCategory::General,
            "GAME OVER",
            0,
            "Total Collapse! Food and Water depleted for 2 consecutive days.",
        );
    }
}
