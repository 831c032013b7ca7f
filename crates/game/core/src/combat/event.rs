//! Events emitted while resolving an action.
//!
//! Presentation layers turn these into popups, effect animations, and looping
//! emotion sprites. The order of events is the order things happened.

use crate::combatant::CombatantId;
use crate::emotion::Emotion;
use crate::stats::StatDelta;
use crate::status::EffectKind;

use super::damage::DamageType;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    Damaged {
        target: CombatantId,
        amount: u32,
        damage_type: DamageType,
        critical: bool,
        remaining: u32,
    },
    Missed {
        target: CombatantId,
    },
    Healed {
        target: CombatantId,
        amount: u32,
        critical: bool,
    },
    HealBlocked {
        target: CombatantId,
    },
    WillpowerSpent {
        caster: CombatantId,
        amount: u32,
    },
    WillpowerRestored {
        combatant: CombatantId,
        amount: u32,
    },
    EffectApplied {
        target: CombatantId,
        kind: EffectKind,
        spell: String,
        /// Change to the effective stats, stopping at the zero floor.
        applied: StatDelta,
        turns: u32,
        suppressed: bool,
    },
    EffectExpired {
        target: CombatantId,
        kind: EffectKind,
        spell: String,
        /// Change to the effective stats when the layer was dropped.
        restored: StatDelta,
    },
    EmotionPointsGained {
        combatant: CombatantId,
        emotion: Emotion,
        amount: u32,
        total: u32,
    },
    EmotionChanged {
        combatant: CombatantId,
        from: Emotion,
        to: Emotion,
    },
    Died {
        combatant: CombatantId,
    },
    TurnEnded {
        combatant: CombatantId,
    },
}

impl BattleEvent {
    /// The combatant this event is about.
    pub fn subject(&self) -> CombatantId {
        match self {
            BattleEvent::Damaged { target, .. }
            | BattleEvent::Missed { target }
            | BattleEvent::Healed { target, .. }
            | BattleEvent::HealBlocked { target }
            | BattleEvent::EffectApplied { target, .. }
            | BattleEvent::EffectExpired { target, .. } => *target,
            BattleEvent::WillpowerSpent { caster, .. } => *caster,
            BattleEvent::WillpowerRestored { combatant, .. }
            | BattleEvent::EmotionPointsGained { combatant, .. }
            | BattleEvent::EmotionChanged { combatant, .. }
            | BattleEvent::Died { combatant }
            | BattleEvent::TurnEnded { combatant } => *combatant,
        }
    }
}
