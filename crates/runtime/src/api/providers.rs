//! Asynchronous abstraction for sourcing ally and enemy decisions.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, the scripted enemy policy, or test fixtures.
use async_trait::async_trait;
use game_core::{ActionError, BattleAction, BattleSession, CombatantId};

use super::errors::Result;

/// Trait for choosing a combatant's action on its turn.
///
/// Different implementations can handle:
/// - Player input (from a terminal or UI)
/// - The scripted enemy policy
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor` given the current battle.
    ///
    /// # Arguments
    /// * `actor` - The combatant whose turn it is
    /// * `session` - Read-only view of the battle
    ///
    /// # Returns
    /// The action to resolve, or an error if no action can be determined
    async fn provide_action(&self, actor: CombatantId, session: &BattleSession)
    -> Result<BattleAction>;

    /// Called when the last action this provider chose was refused. The
    /// runtime asks again afterwards.
    fn on_rejected(&self, _actor: CombatantId, _error: &ActionError) {}
}

/// A simple action provider that always rests.
/// Useful for testing or as a fallback.
pub struct RestActionProvider;

#[async_trait]
impl ActionProvider for RestActionProvider {
    async fn provide_action(
        &self,
        _actor: CombatantId,
        _session: &BattleSession,
    ) -> Result<BattleAction> {
        Ok(BattleAction::Rest)
    }
}
