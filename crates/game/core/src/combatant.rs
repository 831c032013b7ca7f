//! Combatants and the roster they are built from.

use strum::{AsRefStr, Display, EnumString};

use crate::combat::DamageType;
use crate::emotion::{Emotion, EmotionChange, EmotionState};
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{CoreStats, ResourceMeter, StatDelta};
use crate::status::{AppliedEffect, BuffModifier, StatusEffects};

/// Index of a combatant in its battle session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Base data for one combatant, as supplied by the roster provider.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub max_health: u32,
    pub max_willpower: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_willpower: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: CoreStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weakness: Option<DamageType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<String>,
}

/// Ordered allies and enemies for one battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSpec {
    pub allies: Vec<CombatantSpec>,
    pub enemies: Vec<CombatantSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("the {0} side has no combatants")]
    EmptySide(Side),

    #[error("combatant `{0}` needs a maximum health above zero")]
    ZeroHealth(String),

    #[error("combatant name `{0}` is used more than once")]
    DuplicateName(String),

    #[error("combatant `{combatant}` knows unknown spell `{spell}`")]
    UnknownSpell { combatant: String, spell: String },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySide(_) => "roster_empty_side",
            Self::ZeroHealth(_) => "roster_zero_health",
            Self::DuplicateName(_) => "roster_duplicate_name",
            Self::UnknownSpell { .. } => "roster_unknown_spell",
        }
    }
}

/// A party member or enemy in battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub health: ResourceMeter,
    pub willpower: ResourceMeter,
    pub regen_willpower: u32,
    /// Stats from the roster, never modified in battle.
    pub base_stats: CoreStats,
    /// Effective stats: `base_stats` plus the emotion and status layers.
    /// Kept in sync by the methods that change those layers.
    pub stats: CoreStats,
    pub weakness: Option<DamageType>,
    pub alive: bool,
    pub is_my_turn: bool,
    pub emotion: EmotionState,
    pub effects: StatusEffects,
    pub known_spells: Vec<String>,
}

impl Combatant {
    /// Builds a combatant at full health and willpower.
    pub fn from_spec(id: CombatantId, side: Side, spec: &CombatantSpec) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            side,
            health: ResourceMeter::full(spec.max_health),
            willpower: ResourceMeter::full(spec.max_willpower),
            regen_willpower: spec.regen_willpower,
            base_stats: spec.stats,
            stats: spec.stats,
            weakness: spec.weakness,
            alive: spec.max_health > 0,
            is_my_turn: false,
            emotion: EmotionState::new(),
            effects: StatusEffects::new(),
            known_spells: spec.spells.clone(),
        }
    }

    pub fn current_emotion(&self) -> Emotion {
        self.emotion.current()
    }

    /// Effective stats for the current base, emotion, and status layers.
    pub fn compute_stats(&self) -> CoreStats {
        self.base_stats
            .layered([&self.emotion.active_shift().stats, &self.effects.total()])
    }

    /// Recomputes [`Combatant::stats`] and returns the change that landed.
    pub fn refresh_stats(&mut self) -> StatDelta {
        let next = self.compute_stats();
        let landed = next.delta_from(&self.stats);
        self.stats = next;
        landed
    }

    /// Moves to `next` emotion and refreshes the effective stats.
    pub fn change_emotion(&mut self, next: Emotion, shift: u32) -> Option<EmotionChange> {
        let change = self.emotion.transition(next, shift, &mut self.health)?;
        self.refresh_stats();
        Some(change)
    }

    /// Adds a buff layer. Returns the change that landed on the effective stats.
    pub fn add_buff(
        &mut self,
        source: &str,
        magnitudes: &StatDelta,
        turns: u32,
        modifier: BuffModifier,
    ) -> StatDelta {
        self.effects.apply_buff(source, magnitudes, turns, modifier);
        self.refresh_stats()
    }

    /// Adds a debuff layer. Returns the change that landed, which stops at
    /// the zero floor.
    pub fn add_debuff(&mut self, source: &str, magnitudes: &StatDelta, turns: u32) -> StatDelta {
        self.effects.apply_debuff(source, magnitudes, turns);
        self.refresh_stats()
    }

    /// Counts down status effects and drops the expired layers one at a time,
    /// pairing each with the change its removal made to the effective stats.
    pub fn expire_effects(&mut self) -> Vec<(AppliedEffect, StatDelta)> {
        let expired = self.effects.tick();
        let mut pending: StatDelta = expired.iter().map(|effect| effect.delta).sum();

        let mut restored = Vec::with_capacity(expired.len());
        for effect in expired {
            pending = pending - effect.delta;
            let next = self.base_stats.layered([
                &self.emotion.active_shift().stats,
                &self.effects.total(),
                &pending,
            ]);
            let change = next.delta_from(&self.stats);
            self.stats = next;
            restored.push((effect, change));
        }
        restored
    }

    pub fn knows_spell(&self, name: &str) -> bool {
        self.known_spells
            .iter()
            .any(|known| known.eq_ignore_ascii_case(name.trim()))
    }

    pub fn is_opponent_of(&self, other: &Combatant) -> bool {
        self.side != other.side
    }
}

impl core::fmt::Display for Combatant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.name, self.id)
    }
}
