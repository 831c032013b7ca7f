use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use game_core::{ActionError, BattleAction, BattleSession, CombatantId};

use crate::api::{ActionProvider, Result, RuntimeError};

/// Action provider that waits for actions sent over a channel.
pub struct ChannelActionProvider {
    /// Receiver for chosen actions (wrapped in Mutex for interior mutability)
    rx_action: Mutex<mpsc::Receiver<BattleAction>>,
    /// Optional feedback channel for refused actions.
    tx_rejected: Option<mpsc::UnboundedSender<(CombatantId, ActionError)>>,
}

impl ChannelActionProvider {
    pub fn new(rx_action: mpsc::Receiver<BattleAction>) -> Self {
        Self {
            rx_action: Mutex::new(rx_action),
            tx_rejected: None,
        }
    }

    /// Report refused actions back to the sending side.
    pub fn with_rejections(mut self, tx: mpsc::UnboundedSender<(CombatantId, ActionError)>) -> Self {
        self.tx_rejected = Some(tx);
        self
    }

    /// Creates a provider together with the sender that feeds it.
    pub fn channel(buffer: usize) -> (mpsc::Sender<BattleAction>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl ActionProvider for ChannelActionProvider {
    async fn provide_action(
        &self,
        actor: CombatantId,
        _session: &BattleSession,
    ) -> Result<BattleAction> {
        let mut rx = self.rx_action.lock().await;

        match rx.recv().await {
            Some(action) => {
                tracing::debug!(target: "runtime::input", %actor, %action, "received action");
                Ok(action)
            }
            None => Err(RuntimeError::ActionProviderChannelClosed),
        }
    }

    fn on_rejected(&self, actor: CombatantId, error: &ActionError) {
        if let Some(tx) = &self.tx_rejected
            && tx.send((actor, error.clone())).is_err()
        {
            tracing::trace!("No listener for rejected actions");
        }
    }
}
