use async_trait::async_trait;
use tokio::sync::Mutex;

use game_core::{BattleAction, BattleSession, CombatantId, PcgRng, determine_action};

use crate::api::{ActionProvider, Result};

/// RNG stream reserved for policy rolls, independent of combat rolls.
pub const POLICY_STREAM: u32 = 1;

/// Enemy policy with its own seeded roll source.
pub struct ScriptedPolicyProvider {
    rng: Mutex<PcgRng>,
}

impl ScriptedPolicyProvider {
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, POLICY_STREAM)
    }

    /// A policy on its own stream, so two providers seeded alike still roll
    /// differently.
    pub fn with_stream(seed: u64, stream: u32) -> Self {
        Self {
            rng: Mutex::new(PcgRng::for_stream(seed, stream)),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedPolicyProvider {
    async fn provide_action(
        &self,
        actor: CombatantId,
        session: &BattleSession,
    ) -> Result<BattleAction> {
        let mut rng = self.rng.lock().await;
        let action = determine_action(session, actor, &mut *rng);
        tracing::debug!(target: "runtime::policy", %actor, %action, "policy decided");
        Ok(action)
    }
}
