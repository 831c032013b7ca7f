//! Resource pools: health and willpower.
//!
//! Both pools hold `0 <= current <= maximum` after every operation. All
//! arithmetic saturates instead of wrapping.

use strum::{AsRefStr, Display};

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Health,
    Willpower,
}

/// A bounded resource pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// A pool starting at its maximum.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount` and returns how much was actually removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount` without exceeding the maximum and returns the gain.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.maximum.saturating_sub(self.current));
        self.current += gained;
        gained
    }

    /// Shifts the maximum by `amount`, never below `floor`, pulling `current`
    /// down if it now exceeds the maximum. Returns the landed change.
    pub fn shift_maximum(&mut self, amount: i32, floor: u32) -> i32 {
        let before = self.maximum;
        self.maximum = shift_floored(before, amount, floor);
        self.current = self.current.min(self.maximum);
        self.maximum as i32 - before as i32
    }

    /// Shifts `current` by `amount`, never below `floor` and never above the
    /// maximum. Returns the landed change.
    pub fn shift_current(&mut self, amount: i32, floor: u32) -> i32 {
        let before = self.current;
        self.current = shift_floored(before, amount, floor).min(self.maximum);
        self.current as i32 - before as i32
    }
}

fn shift_floored(value: u32, amount: i32, floor: u32) -> u32 {
    if amount >= 0 {
        value.saturating_add(amount.unsigned_abs())
    } else {
        value.saturating_sub(amount.unsigned_abs()).max(floor.min(value))
    }
}
