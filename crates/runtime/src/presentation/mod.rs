//! Presentation sink consumed by the battle loop.
//!
//! The runtime never draws anything. It asks a [`PresentationSink`] to play
//! effects and popups and, for the effects that precede resolution, waits on
//! the returned [`Completion`]s before touching any combatant.

mod completion;
mod effects;

pub use completion::{Completion, CompletionSignal, join_all};
pub use effects::{EffectRequest, NumberPopup, PopupKind, VisualEffect};

use game_core::{BattleAction, BattleSession, CombatantId, Emotion};

/// Renders battle feedback. Every call is fire-and-forget except
/// [`PresentationSink::play_effect`], whose completion the runtime may await.
pub trait PresentationSink: Send + Sync {
    /// Plays a one-shot effect on a combatant.
    fn play_effect(&self, request: EffectRequest) -> Completion;

    /// Starts the looping sprite for an emotion on `owner`.
    fn play_looping(&self, emotion: Emotion, owner: CombatantId);

    /// Stops whatever loop is playing on `owner`.
    fn stop_looping(&self, owner: CombatantId);

    fn show_popup(&self, popup: NumberPopup);

    /// Called once an action has been accepted, before its effects play.
    fn announce_action(&self, _session: &BattleSession, _actor: CombatantId, _action: &BattleAction) {}
}

/// Sink that shows nothing and completes every effect immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

impl PresentationSink for NullPresentation {
    fn play_effect(&self, _request: EffectRequest) -> Completion {
        Completion::ready()
    }

    fn play_looping(&self, _emotion: Emotion, _owner: CombatantId) {}

    fn stop_looping(&self, _owner: CombatantId) {}

    fn show_popup(&self, _popup: NumberPopup) {}
}
