//! Topic-based event bus for battle events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need: a transcript writer, a spectator view, or tests.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BattleOutcome, BattleResult, CombatEvent, TurnEvent};
