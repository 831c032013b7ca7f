//! Timed stat modifiers (buffs and debuffs).
//!
//! Each application is its own layer over the target's base stats. Nothing
//! here touches stats directly: the combatant folds [`StatusEffects::total`]
//! into its effective stats, so expiry removes exactly the layer that was
//! added and a debuff that hit the zero floor never hands back more than it
//! took.

use strum::{AsRefStr, Display};

use crate::stats::StatDelta;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Buff,
    Debuff,
}

/// One active buff or debuff on a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    /// Spell that produced the effect.
    pub source: String,
    pub kind: EffectKind,
    /// Signed layer this effect adds over the base stats.
    pub delta: StatDelta,
    pub remaining_turns: u32,
}

/// How a buff is modified by the target's emotion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuffModifier {
    /// Added to every positive entry (Happiness).
    pub bonus: i32,
    /// Nothing lands, though the effect is still recorded (Disgust).
    pub suppressed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: Vec<AppliedEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a buff adding `magnitudes` for `turns` of the target's turns.
    pub fn apply_buff(
        &mut self,
        source: &str,
        magnitudes: &StatDelta,
        turns: u32,
        modifier: BuffModifier,
    ) -> &AppliedEffect {
        let delta = if modifier.suppressed {
            StatDelta::ZERO
        } else {
            magnitudes.amplified(modifier.bonus)
        };
        self.push(source, EffectKind::Buff, delta, turns)
    }

    /// Records a debuff subtracting `magnitudes` for `turns` of the target's turns.
    pub fn apply_debuff(&mut self, source: &str, magnitudes: &StatDelta, turns: u32) -> &AppliedEffect {
        self.push(source, EffectKind::Debuff, magnitudes.negated(), turns)
    }

    fn push(
        &mut self,
        source: &str,
        kind: EffectKind,
        delta: StatDelta,
        turns: u32,
    ) -> &AppliedEffect {
        let index = self.effects.len();
        self.effects.push(AppliedEffect {
            source: source.to_string(),
            kind,
            delta,
            remaining_turns: turns,
        });
        &self.effects[index]
    }

    /// Counts down every effect by one turn and removes the ones that ran
    /// out. Returns the expired effects in application order.
    pub fn tick(&mut self) -> Vec<AppliedEffect> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            if effect.remaining_turns == 0 {
                expired.push(effect.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Sum of every active layer.
    pub fn total(&self) -> StatDelta {
        self.effects.iter().map(|effect| effect.delta).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppliedEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CoreStats;

    #[test]
    fn buff_expires_after_its_turns() {
        let base = CoreStats::new(0, 2, 0, 0, 0);
        let mut effects = StatusEffects::new();
        effects.apply_buff(
            "Strengthen",
            &StatDelta::new(0, 4, 0, 0, 0),
            2,
            BuffModifier::default(),
        );
        assert_eq!(base.layered([&effects.total()]).strength, 6);

        assert!(effects.tick().is_empty());
        assert_eq!(base.layered([&effects.total()]).strength, 6);

        let expired = effects.tick();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].kind, EffectKind::Buff);
        assert_eq!(base.layered([&effects.total()]).strength, 2);
        assert!(effects.is_empty());
    }

    #[test]
    fn happiness_bonus_only_touches_positive_entries() {
        let mut effects = StatusEffects::new();
        let delta = effects
            .apply_buff(
                "Supreme Being",
                &StatDelta::new(0, 2, 0, 2, 0),
                3,
                BuffModifier {
                    bonus: 2,
                    suppressed: false,
                },
            )
            .delta;
        assert_eq!(delta, StatDelta::new(0, 4, 0, 4, 0));
    }

    #[test]
    fn suppressed_buff_is_recorded_but_changes_nothing() {
        let mut effects = StatusEffects::new();
        effects.apply_buff(
            "Rally",
            &StatDelta::new(0, 2, 0, 0, 0),
            1,
            BuffModifier {
                bonus: 0,
                suppressed: true,
            },
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.total(), StatDelta::ZERO);
        assert_eq!(effects.tick().len(), 1);
    }

    #[test]
    fn clamped_debuff_restores_exactly() {
        let base = CoreStats::new(0, 1, 5, 0, 3);
        let mut effects = StatusEffects::new();
        effects.apply_debuff("Annihilation", &StatDelta::new(0, 2, 2, 2, 2), 3);
        assert_eq!(base.layered([&effects.total()]), CoreStats::new(0, 0, 3, 0, 1));

        for _ in 0..3 {
            effects.tick();
        }
        assert_eq!(base.layered([&effects.total()]), base);
    }

    #[test]
    fn overlapping_effects_are_independent() {
        let base = CoreStats::new(0, 5, 0, 0, 0);
        let mut effects = StatusEffects::new();
        effects.apply_debuff("Debilitate", &StatDelta::new(0, 2, 0, 0, 0), 1);
        effects.apply_debuff("Debilitate", &StatDelta::new(0, 2, 0, 0, 0), 2);
        assert_eq!(base.layered([&effects.total()]).strength, 1);

        let expired = effects.tick();
        assert_eq!(expired.len(), 1);
        assert_eq!(base.layered([&effects.total()]).strength, 3);
        effects.tick();
        assert_eq!(base.layered([&effects.total()]).strength, 5);
    }
}
