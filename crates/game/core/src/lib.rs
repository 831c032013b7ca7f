//! Deterministic battle rules for Murder in Chicago.
//!
//! `game-core` defines the canonical combat rules (combatants, spells,
//! emotions, timed effects, turn order) and exposes pure APIs that the runtime
//! and offline tools share. All battle state lives in
//! [`engine::BattleSession`]; every mutation flows through
//! [`engine::BattleSession::execute`], which reports what happened as
//! [`combat::BattleEvent`]s.
pub mod action;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod emotion;
pub mod engine;
pub mod env;
pub mod error;
pub mod spell;
pub mod stats;
pub mod status;

pub use action::{ActionError, ActionOutcome, BattleAction};
pub use combat::{ActionResolver, BattleEvent, DamageOutcome, DamageType, HealOutcome, Hit};
pub use combatant::{Combatant, CombatantId, CombatantSpec, RosterError, RosterSpec, Side};
pub use config::BattleConfig;
pub use emotion::{Emotion, EmotionChange, EmotionShift, EmotionState};
pub use engine::{BattleSession, ScheduledTurn, SpellPick, TurnScheduler, determine_action};
pub use env::{BattleRng, PcgRng, ScriptedRng};
pub use error::{ErrorSeverity, GameError};
pub use spell::{EffectType, Spell, SpellTable, SpellTableError, TargetCardinality};
pub use stats::{CoreStats, ResourceKind, ResourceMeter, Stat, StatDelta};
pub use status::{AppliedEffect, BuffModifier, EffectKind, StatusEffects};
