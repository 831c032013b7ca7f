//! Runtime orchestration for the turn-based battle core.
//!
//! This crate wires together the action provider abstraction, the
//! presentation sink, and the event bus into a cohesive runtime API.
//! Consumers embed [`BattleRuntime`] to drive turns, subscribe to events, and
//! render what happened.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`presentation`] is the seam to whatever draws the battle
//! - [`providers`] ships the built-in decision sources
pub mod api;
pub mod events;
pub mod presentation;
pub mod providers;
pub mod runtime;

pub use api::{
    ActionProvider, ProviderKind, ProviderRegistry, RestActionProvider, Result, RuntimeError,
};
pub use events::{
    BattleOutcome, BattleResult, CombatEvent, Event, EventBus, Topic, TurnEvent,
};
pub use presentation::{
    Completion, CompletionSignal, EffectRequest, NullPresentation, NumberPopup, PopupKind,
    PresentationSink, VisualEffect, join_all,
};
pub use providers::{ChannelActionProvider, ScriptedPolicyProvider};
pub use runtime::{BattleRuntime, RuntimeBuilder, RuntimeConfig, StepOutcome};
