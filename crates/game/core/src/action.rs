//! Actions a combatant can take on its turn, and why they can be refused.

use crate::combatant::CombatantId;
use crate::combat::BattleEvent;
use crate::error::{ErrorSeverity, GameError};

/// A terminal choice for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleAction {
    Attack {
        target: CombatantId,
    },
    Cast {
        spell: String,
        targets: Vec<CombatantId>,
    },
    Rest,
}

impl BattleAction {
    pub fn attack(target: CombatantId) -> Self {
        BattleAction::Attack { target }
    }

    pub fn cast(spell: impl Into<String>, targets: impl IntoIterator<Item = CombatantId>) -> Self {
        BattleAction::Cast {
            spell: spell.into(),
            targets: targets.into_iter().collect(),
        }
    }

    /// Combatants this action is aimed at, in order.
    pub fn targets(&self) -> &[CombatantId] {
        match self {
            BattleAction::Attack { target } => core::slice::from_ref(target),
            BattleAction::Cast { targets, .. } => targets,
            BattleAction::Rest => &[],
        }
    }
}

impl core::fmt::Display for BattleAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BattleAction::Attack { target } => write!(f, "attack {target}"),
            BattleAction::Cast { spell, targets } => {
                write!(f, "cast {spell} on ")?;
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{target}")?;
                }
                Ok(())
            }
            BattleAction::Rest => write!(f, "rest"),
        }
    }
}

/// Everything that happened while one action resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub actor: CombatantId,
    pub action: BattleAction,
    pub events: Vec<BattleEvent>,
}

/// Reasons an action is refused. A refused action mutates nothing and does
/// not end the turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("{caster} needs {cost} willpower to cast {spell} but has {available}")]
    InsufficientWillpower {
        caster: CombatantId,
        spell: String,
        cost: u32,
        available: u32,
    },

    #[error("no spell named `{0}`")]
    UnknownSpell(String),

    #[error("{caster} does not know {spell}")]
    SpellNotKnown { caster: CombatantId, spell: String },

    #[error("target {0} is missing or already dead")]
    InvalidTarget(CombatantId),

    #[error("{spell} needs at least one target")]
    NoTargets { spell: String },

    #[error("{spell} takes a single target but {count} were given")]
    TooManyTargets { spell: String, count: usize },

    #[error("it is not {actor}'s turn")]
    NotActive { actor: CombatantId },

    #[error("no combatant {0} in this battle")]
    UnknownCombatant(CombatantId),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientWillpower { .. } => ErrorSeverity::Recoverable,
            Self::NotActive { .. } => ErrorSeverity::Internal,
            Self::UnknownSpell(_)
            | Self::SpellNotKnown { .. }
            | Self::InvalidTarget(_)
            | Self::NoTargets { .. }
            | Self::TooManyTargets { .. }
            | Self::UnknownCombatant(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientWillpower { .. } => "insufficient_willpower",
            Self::UnknownSpell(_) => "unknown_spell",
            Self::SpellNotKnown { .. } => "spell_not_known",
            Self::InvalidTarget(_) => "invalid_target",
            Self::NoTargets { .. } => "no_targets",
            Self::TooManyTargets { .. } => "too_many_targets",
            Self::NotActive { .. } => "not_active",
            Self::UnknownCombatant(_) => "unknown_combatant",
        }
    }
}
