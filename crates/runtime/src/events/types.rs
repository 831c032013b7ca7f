//! Event types for different topics.

use serde::{Deserialize, Serialize};

use game_core::{BattleAction, BattleEvent, CombatantId, Side};

/// Events related to turn flow (lightweight)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A combatant was handed the turn.
    Started {
        actor: CombatantId,
        round: u32,
        /// The turn queue was rebuilt for this turn.
        new_round: bool,
    },

    /// A decision source chose an action the battle refused.
    Rejected {
        actor: CombatantId,
        action: BattleAction,
        error: String,
        attempt: u32,
    },

    /// Decision attempts ran out and the actor rests instead.
    ForcedRest { actor: CombatantId },

    /// The battle is over.
    Ended(BattleResult),
}

/// Events related to resolved actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An action was resolved; `events` lists what happened, in order.
    Resolved {
        actor: CombatantId,
        action: BattleAction,
        events: Vec<BattleEvent>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Every combatant on the other side is dead.
    Victory(Side),
    /// The round limit ran out first.
    Stalemate,
}

/// Summary of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub rounds: u32,
    pub turns: u32,
    pub survivors: Vec<CombatantId>,
}

impl BattleResult {
    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            BattleOutcome::Victory(side) => Some(side),
            BattleOutcome::Stalemate => None,
        }
    }
}
