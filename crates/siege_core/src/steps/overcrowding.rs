//! Step 6: overcrowding penalties to unrest and sickness.
//!
//! Food and fuel overcrowding surcharges already landed in Step 4.

use crate::context::SimulationContext;
use crate::log::{CausalityCategory, CausalityLog};
use crate::types::{ColonyState, Content};

pub(crate) fn execute(
    state: &ColonyState,
    content: &Content,
    ctx: &mut SimulationContext,
    log: &mut CausalityLog,
) {
    for (i, zone) in state.zones.iter().enumerate() {
        if zone.is_lost || !zone.is_overcrowded() {
            continue;
        }
        let tiers = zone.overcrowding_tiers();
        if tiers <= 0 {
            continue;
        }

        let unrest_add = 2 * tiers;
        let sickness_add = 2 * tiers;
        ctx.unrest_delta += unrest_add;
        ctx.sickness_delta += sickness_add;

        log.add_flat(
            CausalityCategory::Overcrowding,
            format!("Overcrowding ({})", content.zones[i].name),
            unrest_add + sickness_add,
            format!(
                "Overcrowding {:.0}% in {}: Unrest +{unrest_add}, Sickness +{sickness_add}",
                zone.overcrowding_percent(),
                content.zones[i].name
            ),
        );
    }
}
