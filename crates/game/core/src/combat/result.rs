//! Combat result types.

use super::damage::DamageType;

/// Damage about to be applied to one defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub amount: u32,
    pub damage_type: DamageType,
    /// Whether a critical bonus is part of `amount`.
    pub critical: bool,
}

/// Outcome of [`super::ActionResolver::take_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    /// The defender dodged. Nothing changed.
    Dodged,
    /// Damage landed. `amount` is after fortitude and weakness.
    Landed { amount: u32, killed: bool },
}

impl DamageOutcome {
    pub fn amount(&self) -> u32 {
        match self {
            DamageOutcome::Dodged => 0,
            DamageOutcome::Landed { amount, .. } => *amount,
        }
    }
}

/// Outcome of healing one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealOutcome {
    /// Disgust blocked the heal entirely.
    Blocked,
    /// `healed` is the health actually restored after clamping to the maximum.
    Healed { healed: u32, rolled: u32 },
}
