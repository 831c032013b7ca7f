//! Emotion points and the per-combatant emotion state machine.
//!
//! ```text
//!            CheckThreshold                Rest / Death
//!   None ───────────────────► Emotion ────────────────────► None
//!                               │  ▲
//!                               └──┘ CheckThreshold (another emotion)
//! ```
//!
//! Entering an emotion records an [`EmotionShift`]: a stat layer the combatant
//! folds into its effective stats, plus the health change that actually
//! landed. Leaving the emotion drops the layer and gives the health back, so
//! a round trip through any emotion restores stats bit-for-bit.

use strum::{AsRefStr, Display, EnumString};

use crate::config::BattleConfig;
use crate::stats::{ResourceMeter, StatDelta};

/// A combatant's emotional status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Emotion {
    #[default]
    None,
    Happiness,
    Anger,
    Sadness,
    Fear,
    Disgust,
}

impl Emotion {
    /// Threshold scan order. Earlier entries win ties.
    pub const PRIORITY: [Emotion; 5] = [
        Emotion::Happiness,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    /// Slot in the emotion point counters, `None` for [`Emotion::None`].
    pub const fn point_slot(self) -> Option<usize> {
        match self {
            Emotion::None => None,
            Emotion::Happiness => Some(0),
            Emotion::Anger => Some(1),
            Emotion::Sadness => Some(2),
            Emotion::Fear => Some(3),
            Emotion::Disgust => Some(4),
        }
    }

    /// Stat shift this emotion applies on entry, scaled by `shift`.
    ///
    /// Happiness also lowers both health fields; see [`EmotionState::transition`].
    pub fn stat_delta(self, shift: u32) -> StatDelta {
        let k = shift as i32;
        match self {
            Emotion::Anger => StatDelta::new(0, k, k, -k, -k),
            Emotion::Sadness => StatDelta::new(0, -k, -k, k, k),
            Emotion::Happiness => StatDelta::new(0, -k, 0, 0, 0),
            Emotion::None | Emotion::Fear | Emotion::Disgust => StatDelta::ZERO,
        }
    }
}

/// What entering an emotion changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionShift {
    /// Stat layer held while the emotion lasts.
    pub stats: StatDelta,
    pub max_health: i32,
    pub current_health: i32,
}

impl EmotionShift {
    pub fn is_zero(&self) -> bool {
        self.stats.is_zero() && self.max_health == 0 && self.current_health == 0
    }
}

/// Result of a transition that changed something.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionChange {
    pub from: Emotion,
    pub to: Emotion,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionState {
    current: Emotion,
    past: Emotion,
    points: [u32; BattleConfig::EMOTION_COUNT],
    shift: EmotionShift,
}

impl EmotionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Emotion {
        self.current
    }

    pub fn past(&self) -> Emotion {
        self.past
    }

    pub fn points(&self, emotion: Emotion) -> u32 {
        emotion.point_slot().map_or(0, |slot| self.points[slot])
    }

    /// What entering the current emotion changed. Its `stats` are a layer
    /// over the owner's base stats.
    pub fn active_shift(&self) -> &EmotionShift {
        &self.shift
    }

    pub fn has_happiness(&self) -> bool {
        self.current == Emotion::Happiness
    }

    pub fn has_fear(&self) -> bool {
        self.current == Emotion::Fear
    }

    pub fn has_disgust(&self) -> bool {
        self.current == Emotion::Disgust
    }

    /// Fear and Disgust keep Rest from calming a combatant down.
    pub fn blocks_rest(&self) -> bool {
        self.has_fear() || self.has_disgust()
    }

    /// Adds points to one counter. Points for [`Emotion::None`] are ignored.
    pub fn add_points(&mut self, emotion: Emotion, amount: u32) {
        if let Some(slot) = emotion.point_slot() {
            self.points[slot] = self.points[slot].saturating_add(amount);
        }
    }

    /// The first emotion in priority order whose counter reached `threshold`.
    pub fn check_threshold(&self, threshold: u32) -> Option<Emotion> {
        Emotion::PRIORITY
            .into_iter()
            .find(|emotion| self.points(*emotion) >= threshold)
    }

    /// Switches to `next`, reverting the current emotion's shift and applying
    /// the new one. Counters are cleared on every transition.
    ///
    /// Only health is touched here; the owner refreshes its effective stats
    /// from [`EmotionState::active_shift`] afterwards.
    ///
    /// `None -> None` is a no-op and returns `None`.
    pub fn transition(
        &mut self,
        next: Emotion,
        shift: u32,
        health: &mut ResourceMeter,
    ) -> Option<EmotionChange> {
        if next == Emotion::None && self.current == Emotion::None {
            return None;
        }

        let from = self.current;
        self.past = from;
        self.revert_shift(health);
        self.points = [0; BattleConfig::EMOTION_COUNT];

        let mut landed = EmotionShift {
            stats: next.stat_delta(shift),
            ..EmotionShift::default()
        };
        if next == Emotion::Happiness {
            let k = shift as i32;
            let current_before = health.current;
            landed.max_health = health.shift_maximum(-k, 1);
            health.shift_current(-k, 1);
            landed.current_health = health.current as i32 - current_before as i32;
        }

        self.shift = landed;
        self.current = next;
        Some(EmotionChange { from, to: next })
    }

    fn revert_shift(&mut self, health: &mut ResourceMeter) {
        // Maximum first so the restored current health fits under it.
        health.shift_maximum(-self.shift.max_health, 0);
        health.shift_current(-self.shift.current_health, 0);
        self.shift = EmotionShift::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CoreStats;

    const SHIFT: u32 = BattleConfig::DEFAULT_EMOTION_STAT_SHIFT;

    fn fixture() -> (EmotionState, CoreStats, ResourceMeter) {
        (
            EmotionState::new(),
            CoreStats::new(3, 6, 6, 3, 2),
            ResourceMeter::full(20),
        )
    }

    fn effective(state: &EmotionState, base: &CoreStats) -> CoreStats {
        base.layered([&state.active_shift().stats])
    }

    #[test]
    fn threshold_uses_priority_order() {
        let mut state = EmotionState::new();
        state.add_points(Emotion::Disgust, 120);
        state.add_points(Emotion::Anger, 100);
        assert_eq!(state.check_threshold(100), Some(Emotion::Anger));
        assert_eq!(state.check_threshold(121), None);
    }

    #[test]
    fn points_for_none_are_ignored() {
        let mut state = EmotionState::new();
        state.add_points(Emotion::None, 500);
        assert_eq!(state.check_threshold(1), None);
    }

    #[test]
    fn anger_round_trip_restores_stats() {
        let (mut state, base, mut hp) = fixture();

        let change = state.transition(Emotion::Anger, SHIFT, &mut hp);
        assert_eq!(
            change,
            Some(EmotionChange {
                from: Emotion::None,
                to: Emotion::Anger
            })
        );
        let angry = effective(&state, &base);
        assert_eq!(angry.strength, 11);
        assert_eq!(angry.resolve, 11);
        assert_eq!(angry.fortitude, 0);
        assert_eq!(angry.fortune, 0);

        state.transition(Emotion::None, SHIFT, &mut hp);
        assert_eq!(effective(&state, &base), base);
        assert_eq!(state.past(), Emotion::Anger);
    }

    #[test]
    fn happiness_floors_health_at_one_and_reverts_exactly() {
        let (mut state, base, _) = fixture();
        let mut hp = ResourceMeter::new(3, 4);

        state.transition(Emotion::Happiness, SHIFT, &mut hp);
        assert!(state.has_happiness());
        assert_eq!(hp, ResourceMeter::new(1, 1));
        assert_eq!(effective(&state, &base).strength, 1);

        state.transition(Emotion::None, SHIFT, &mut hp);
        assert_eq!(hp, ResourceMeter::new(3, 4));
        assert_eq!(effective(&state, &base).strength, 6);
    }

    #[test]
    fn switching_emotions_does_not_leak_the_old_shift() {
        let (mut state, base, mut hp) = fixture();
        state.transition(Emotion::Anger, SHIFT, &mut hp);
        state.transition(Emotion::Sadness, SHIFT, &mut hp);
        let sad = effective(&state, &base);
        assert_eq!(sad.strength, 1);
        assert_eq!(sad.fortitude, 8);
        state.transition(Emotion::None, SHIFT, &mut hp);
        assert_eq!(effective(&state, &base), base);
    }

    #[test]
    fn none_to_none_is_a_no_op() {
        let (mut state, _, mut hp) = fixture();
        state.add_points(Emotion::Fear, 40);
        assert_eq!(state.transition(Emotion::None, SHIFT, &mut hp), None);
        assert_eq!(state.points(Emotion::Fear), 40);
    }

    #[test]
    fn transition_clears_counters_and_sets_flags() {
        let (mut state, _, mut hp) = fixture();
        state.add_points(Emotion::Fear, 100);
        state.add_points(Emotion::Sadness, 30);
        state.transition(Emotion::Fear, SHIFT, &mut hp);
        assert!(state.has_fear());
        assert!(state.blocks_rest());
        assert_eq!(state.points(Emotion::Sadness), 0);
        assert!(state.active_shift().is_zero());
    }
}
