//! Combatant statistics.
//!
//! ```text
//! [ Core Stats ]   vitality, strength, resolve, fortitude, fortune (never negative)
//! [ Modifiers  ]   emotion shift + active buffs/debuffs, signed StatDelta layers
//! [ Resources ]    health and willpower meters (0 <= current <= maximum)
//! ```
//!
//! Base core stats are the only stored stats. Effective stats are derived as
//! `max(0, base + sum(layers))`, so adding or removing a modifier never
//! leaves a residue behind, however the zero floor was hit in between.

pub mod core;
pub mod resources;

pub use self::core::{CoreStats, Stat, StatDelta};
pub use resources::{ResourceKind, ResourceMeter};
