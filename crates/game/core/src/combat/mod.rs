//! Combat resolution system.
//!
//! Two layers:
//!
//! - **Pure Functions** (`hit`, `damage`): roll thresholds and damage formulas
//!   taking plain numbers, no state and no randomness.
//! - **[`ActionResolver`]**: applies physical attacks, spell casts, rest, and
//!   turn end to borrowed combatants, drawing rolls from a [`crate::BattleRng`]
//!   and recording a [`BattleEvent`] for everything that happened.
//!
//! The resolver never validates targets. [`crate::BattleSession`] filters dead
//! or missing targets before any resolver call.

pub mod damage;
pub mod event;
pub mod hit;
pub mod resolver;
pub mod result;

pub use damage::{DamageType, apply_damage, mitigate, physical_damage};
pub use event::BattleEvent;
pub use hit::{check_dodge, crit_bonus, effective_cost};
pub use resolver::ActionResolver;
pub use result::{DamageOutcome, HealOutcome, Hit};
