//! Data-driven battle content and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - The spell catalog (data-driven via RON, embedded at build time)
//! - Encounter rosters (data-driven via RON)
//! - Battle tuning (data-driven via TOML)
//!
//! Content feeds [`game_core::BattleSession::new`] and is never mutated by a battle.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, RosterLoader, SpellCatalog, SpellLoader, Tuning};
