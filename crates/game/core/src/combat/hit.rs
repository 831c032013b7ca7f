//! Critical, dodge, and cost calculations.

use crate::config::BattleConfig;

/// Critical bonus for a percentile `roll` (0-99).
///
/// # Formula
///
/// ```text
/// if roll + fortune < crit_threshold:  bonus = crit_base_bonus + fortune
/// else:                                bonus = 0
/// ```
///
/// A low roll crits. Fortune raises the bonus but also pushes the roll past
/// the threshold, so lucky combatants crit less often but harder.
pub fn crit_bonus(roll: u32, fortune: u32, config: &BattleConfig) -> u32 {
    if roll.saturating_add(fortune) >= config.crit_threshold {
        0
    } else {
        config.crit_base_bonus.saturating_add(fortune)
    }
}

/// Whether a percentile `roll` dodges: `roll + fortune >= dodge_threshold`.
pub fn check_dodge(roll: u32, fortune: u32, config: &BattleConfig) -> bool {
    roll.saturating_add(fortune) >= config.dodge_threshold
}

/// Willpower cost after the Fear surcharge.
///
/// The surcharge is truncated: a cost of 5 under Fear becomes `5 + 2 = 7`.
pub fn effective_cost(cost: u32, has_fear: bool, config: &BattleConfig) -> u32 {
    if has_fear {
        cost.saturating_add(cost.saturating_mul(config.fear_cost_percent) / 100)
    } else {
        cost
    }
}
