/// Battle tuning constants and tunable parameters.
///
/// Every roll threshold and flat bonus used by the resolver lives here so a
/// content file can retune an encounter without touching the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Emotion points needed before an emotion takes hold.
    pub emotion_threshold: u32,
    /// `roll + fortune` below this value produces a critical bonus.
    pub crit_threshold: u32,
    /// Flat part of the critical bonus (fortune is added on top).
    pub crit_base_bonus: u32,
    /// `roll + fortune` at or above this value dodges incoming damage.
    pub dodge_threshold: u32,
    /// Extra damage when the incoming damage type matches a weakness.
    pub weakness_bonus: u32,
    /// Flat damage of a physical attack before strength and crit.
    pub physical_base_damage: u32,
    /// Willpower granted by Rest on top of the combatant's regeneration.
    pub rest_willpower_bonus: u32,
    /// Extra healing received while Happiness is active.
    pub happiness_heal_bonus: u32,
    /// Extra buff strength per positive stat entry while Happiness is active.
    pub happiness_buff_bonus: u32,
    /// Percentage added to spell costs while Fear is active.
    pub fear_cost_percent: u32,
    /// Stat shift applied by Anger, Sadness, and Happiness.
    pub emotion_stat_shift: u32,
    /// Enemy policy: rolls below this value attack.
    pub policy_attack_below: u32,
    /// Enemy policy: rolls below this value (and not attacking) cast a spell.
    pub policy_spell_below: u32,
    /// Enemy policy: how many times a spell pick is re-rolled looking for one it can afford.
    pub policy_spell_rerolls: u32,
    /// Seed for the battle's random number generator.
    pub seed: u64,
}

impl BattleConfig {
    pub const EMOTION_COUNT: usize = 5;
    pub const STAT_COUNT: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EMOTION_THRESHOLD: u32 = 100;
    pub const DEFAULT_CRIT_THRESHOLD: u32 = 10;
    pub const DEFAULT_CRIT_BASE_BONUS: u32 = 3;
    pub const DEFAULT_DODGE_THRESHOLD: u32 = 95;
    pub const DEFAULT_WEAKNESS_BONUS: u32 = 3;
    pub const DEFAULT_PHYSICAL_BASE_DAMAGE: u32 = 4;
    pub const DEFAULT_REST_WILLPOWER_BONUS: u32 = 3;
    pub const DEFAULT_HAPPINESS_HEAL_BONUS: u32 = 3;
    pub const DEFAULT_HAPPINESS_BUFF_BONUS: u32 = 2;
    pub const DEFAULT_FEAR_COST_PERCENT: u32 = 50;
    pub const DEFAULT_EMOTION_STAT_SHIFT: u32 = 5;
    pub const DEFAULT_POLICY_ATTACK_BELOW: u32 = 30;
    pub const DEFAULT_POLICY_SPELL_BELOW: u32 = 80;
    pub const DEFAULT_POLICY_SPELL_REROLLS: u32 = 8;
    pub const DEFAULT_SEED: u64 = 0x4d49_4331_3932_3900;

    pub fn new() -> Self {
        Self {
            emotion_threshold: Self::DEFAULT_EMOTION_THRESHOLD,
            crit_threshold: Self::DEFAULT_CRIT_THRESHOLD,
            crit_base_bonus: Self::DEFAULT_CRIT_BASE_BONUS,
            dodge_threshold: Self::DEFAULT_DODGE_THRESHOLD,
            weakness_bonus: Self::DEFAULT_WEAKNESS_BONUS,
            physical_base_damage: Self::DEFAULT_PHYSICAL_BASE_DAMAGE,
            rest_willpower_bonus: Self::DEFAULT_REST_WILLPOWER_BONUS,
            happiness_heal_bonus: Self::DEFAULT_HAPPINESS_HEAL_BONUS,
            happiness_buff_bonus: Self::DEFAULT_HAPPINESS_BUFF_BONUS,
            fear_cost_percent: Self::DEFAULT_FEAR_COST_PERCENT,
            emotion_stat_shift: Self::DEFAULT_EMOTION_STAT_SHIFT,
            policy_attack_below: Self::DEFAULT_POLICY_ATTACK_BELOW,
            policy_spell_below: Self::DEFAULT_POLICY_SPELL_BELOW,
            policy_spell_rerolls: Self::DEFAULT_POLICY_SPELL_REROLLS,
            seed: Self::DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_emotion_threshold(mut self, threshold: u32) -> Self {
        self.emotion_threshold = threshold;
        self
    }

    pub fn with_crit_threshold(mut self, threshold: u32) -> Self {
        self.crit_threshold = threshold;
        self
    }

    pub fn with_dodge_threshold(mut self, threshold: u32) -> Self {
        self.dodge_threshold = threshold;
        self
    }

    /// Sets the enemy policy split: `[0, attack)` attacks, `[attack, spell)`
    /// casts, and the rest of the percentile range rests.
    pub fn with_policy_ranges(mut self, attack_below: u32, spell_below: u32) -> Self {
        self.policy_attack_below = attack_below;
        self.policy_spell_below = spell_below.max(attack_below);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_ranges_never_overlap() {
        let config = BattleConfig::new().with_policy_ranges(60, 20);
        assert_eq!(config.policy_attack_below, 60);
        assert_eq!(config.policy_spell_below, 60);
    }
}
