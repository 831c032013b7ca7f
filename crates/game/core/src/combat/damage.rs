//! Damage calculation and application.

use strum::{AsRefStr, Display, EnumString};

use crate::config::BattleConfig;

/// Damage type, matched against a combatant's weakness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Weapon and fist attacks. The only type fortitude reduces.
    Physical,
    Fire,
    Ice,
    Curse,
    Poison,
}

/// Raw damage of a physical attack: `physical_base_damage + strength + crit`.
pub fn physical_damage(strength: u32, crit: u32, config: &BattleConfig) -> u32 {
    config
        .physical_base_damage
        .saturating_add(strength)
        .saturating_add(crit)
}

/// Damage after defences.
///
/// # Formula
///
/// ```text
/// if physical:          amount = max(0, amount - fortitude)
/// if type == weakness:  amount += weakness_bonus
/// ```
pub fn mitigate(
    amount: u32,
    damage_type: DamageType,
    fortitude: u32,
    weakness: Option<DamageType>,
    config: &BattleConfig,
) -> u32 {
    let mut amount = if damage_type == DamageType::Physical {
        amount.saturating_sub(fortitude)
    } else {
        amount
    };
    if weakness == Some(damage_type) {
        amount = amount.saturating_add(config.weakness_bonus);
    }
    amount
}

/// HP reduction, clamped to 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
