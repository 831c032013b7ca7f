//! Spell definitions and the read-only spell catalog.
//!
//! Spells are immutable once loaded. Anything that changes per cast (the
//! amplified buff delta, a debuff clamped at zero) is recorded on the target's
//! [`crate::status::AppliedEffect`] instead of being written back here.

mod table;

pub use table::{SpellTable, SpellTableError};

use strum::{AsRefStr, Display, EnumString};

use crate::combat::DamageType;
use crate::emotion::Emotion;
use crate::stats::StatDelta;

/// What a spell does when it lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectType {
    Fire,
    Ice,
    Curse,
    Poison,
    Heal,
    Buff,
    Debuff,
    Emotion,
}

impl EffectType {
    /// Damage type for elemental spells, `None` for everything else.
    pub const fn damage_type(self) -> Option<DamageType> {
        match self {
            EffectType::Fire => Some(DamageType::Fire),
            EffectType::Ice => Some(DamageType::Ice),
            EffectType::Curse => Some(DamageType::Curse),
            EffectType::Poison => Some(DamageType::Poison),
            EffectType::Heal | EffectType::Buff | EffectType::Debuff | EffectType::Emotion => None,
        }
    }

    /// Spells aimed at the caster's own side.
    pub const fn is_supportive(self) -> bool {
        matches!(self, EffectType::Heal | EffectType::Buff)
    }

    /// Spells that record a timed effect on the target.
    pub const fn is_timed(self) -> bool {
        matches!(self, EffectType::Buff | EffectType::Debuff)
    }
}

/// How many combatants a spell may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCardinality {
    Single,
    Multiple,
}

/// Immutable spell definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub name: String,
    pub effect_type: EffectType,
    pub target: TargetCardinality,
    pub emotion: Emotion,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Damage or healing before bonuses. Zero for buffs, debuffs, and emotion spells.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_amount: u32,
    /// Buff/debuff duration in the target's turns. 1 means instantaneous.
    pub turn_count: u32,
    /// Willpower cost before the Fear surcharge.
    pub cost: u32,
    /// Emotion points granted (to the caster, or to the target for emotion spells).
    pub emotion_points: u32,
    /// Stat magnitudes for buffs and debuffs, zero otherwise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_delta: StatDelta,
}

impl Spell {
    pub fn is_multi_target(&self) -> bool {
        self.target == TargetCardinality::Multiple
    }
}
