use serde::{Deserialize, Serialize};

use game_core::{BattleAction, CombatantId, DamageType, EffectType, Spell};

/// One-shot visual played on a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualEffect {
    Slash,
    Element(DamageType),
    HealSparkle,
    BuffAura,
    DebuffAura,
    EmotionBurst,
    RestGlow,
    Miss,
}

impl VisualEffect {
    /// The effect played on each target of a spell.
    pub fn for_spell(spell: &Spell) -> Self {
        match spell.effect_type {
            EffectType::Heal => VisualEffect::HealSparkle,
            EffectType::Buff => VisualEffect::BuffAura,
            EffectType::Debuff => VisualEffect::DebuffAura,
            EffectType::Emotion => VisualEffect::EmotionBurst,
            EffectType::Fire | EffectType::Ice | EffectType::Curse | EffectType::Poison => {
                VisualEffect::Element(spell.effect_type.damage_type().unwrap_or(DamageType::Physical))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub effect: VisualEffect,
    pub target: CombatantId,
    /// How long the effect should roughly take, in milliseconds.
    pub duration_hint_ms: u32,
}

impl EffectRequest {
    pub const DEFAULT_DURATION_MS: u32 = 600;

    pub fn new(effect: VisualEffect, target: CombatantId) -> Self {
        Self {
            effect,
            target,
            duration_hint_ms: Self::DEFAULT_DURATION_MS,
        }
    }

    /// The effects that precede resolving `action`, one per target.
    pub fn for_action(action: &BattleAction, actor: CombatantId, spell: Option<&Spell>) -> Vec<Self> {
        match action {
            BattleAction::Attack { target } => vec![Self::new(VisualEffect::Slash, *target)],
            BattleAction::Cast { targets, .. } => {
                let effect = spell.map_or(VisualEffect::EmotionBurst, VisualEffect::for_spell);
                targets.iter().map(|t| Self::new(effect, *t)).collect()
            }
            BattleAction::Rest => vec![Self::new(VisualEffect::RestGlow, actor)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupKind {
    Damage { critical: bool },
    Heal { critical: bool },
    Willpower,
}

/// A floating number over a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPopup {
    pub target: CombatantId,
    /// Signed so willpower spending can show as a loss.
    pub value: i64,
    pub kind: PopupKind,
}
