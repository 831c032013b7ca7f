//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from battle setup, content loading, and action providers
//! so clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;

use game_core::{ActionError, CombatantId, RosterError, Side};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no living combatants available for turn scheduling")]
    NoLivingCombatants,

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("action provider channel closed")]
    ActionProviderChannelClosed,

    #[error("combatant {0} is not part of this battle")]
    UnknownCombatant(CombatantId),

    #[error("action could not be resolved: {0}")]
    Action(#[from] ActionError),

    #[error("invalid roster: {0}")]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

/// Which default provider a combatant falls back to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Player,
    Enemy,
}

impl ProviderKind {
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Ally => ProviderKind::Player,
            Side::Enemy => ProviderKind::Enemy,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Enemy => "enemy",
        };
        write!(f, "{}", label)
    }
}
