//! Environment inputs the rules consume but never own.
//!
//! Battles are deterministic given a seed: randomness is injected through
//! [`BattleRng`] so the session, the enemy policy, and tests can each supply
//! their own source.
mod rng;

pub use rng::{BattleRng, PcgRng, ScriptedRng, compute_seed};
