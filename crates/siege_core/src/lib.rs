//! `siege_core` — deterministic day-simulation for the siege survival game.
//!
//! No IO, no network. All randomness via the passed-in Rng. One call to
//! [`simulate_day`] advances the colony by exactly one day; callers deduct
//! pre-simulation costs first via [`deduct_pre_simulation_costs`].

pub mod actions;
mod context;
mod log;
mod mission;
pub mod population;
pub mod projection;
pub(crate) mod rng;
mod simulator;
pub(crate) mod steps;
mod types;
mod zone_loss;

pub use context::SimulationContext;
pub use log::{CausalityCategory, CausalityEntry, CausalityLog};
pub use mission::{mission_odds, MissionOdds};
pub use simulator::{deduct_pre_simulation_costs, simulate_day};
pub use steps::events::tomorrow_incident_warning;
pub use types::*;
pub use zone_loss::try_apply_zone_loss;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

#[cfg(test)]
mod tests;
