//! Probability helpers over the caller-supplied random stream.
//!
//! All draws in a run come from one seeded generator in a fixed call order;
//! replays are deterministic as long as callers never reorder draws.

use rand::Rng;

/// Returns true with the given probability in [0, 1].
pub(crate) fn chance(rng: &mut impl Rng, probability: f32) -> bool {
    rng.gen::<f32>() < probability
}
