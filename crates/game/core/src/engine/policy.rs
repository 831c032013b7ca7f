//! Scripted decision policy for enemies.
//!
//! One percentile roll splits the turn three ways:
//!
//! ```text
//! [0, policy_attack_below)                  physical attack on a random opponent
//! [policy_attack_below, policy_spell_below) cast a known spell (attack if none known)
//! [policy_spell_below, 100)                 rest
//! ```
//!
//! Spells are picked uniformly from the caster's repertoire and re-rolled a
//! bounded number of times until one is affordable; if none turns up the
//! policy rests instead.

use crate::action::BattleAction;
use crate::combat::effective_cost;
use crate::combatant::{Combatant, CombatantId};
use crate::env::BattleRng;
use crate::spell::Spell;

use super::BattleSession;

/// Result of looking for a castable spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellPick<'a> {
    Chosen(&'a Spell),
    NoneKnown,
    NoneAffordable,
}

/// Picks an action for `actor`. Always returns something the session accepts
/// for a living actor with at least one living opponent.
pub fn determine_action(
    session: &BattleSession,
    actor: CombatantId,
    rng: &mut dyn BattleRng,
) -> BattleAction {
    let Some(me) = session.combatant(actor) else {
        return BattleAction::Rest;
    };
    let opponents: Vec<CombatantId> = session.living(me.side.opponent()).map(|c| c.id).collect();
    if opponents.is_empty() {
        return BattleAction::Rest;
    }

    let config = session.config();
    let roll = rng.roll_percent();

    if roll < config.policy_attack_below {
        return BattleAction::attack(opponents[rng.pick(opponents.len())]);
    }

    if roll < config.policy_spell_below {
        return match pick_spell(session, me, rng) {
            SpellPick::Chosen(spell) => {
                let targets = choose_targets(session, me, spell, &opponents, rng);
                BattleAction::cast(spell.name.clone(), targets)
            }
            SpellPick::NoneKnown => BattleAction::attack(opponents[rng.pick(opponents.len())]),
            SpellPick::NoneAffordable => BattleAction::Rest,
        };
    }

    BattleAction::Rest
}

/// Uniform pick over known spells, re-rolled until affordable.
pub fn pick_spell<'s>(
    session: &'s BattleSession,
    caster: &Combatant,
    rng: &mut dyn BattleRng,
) -> SpellPick<'s> {
    let known: Vec<&Spell> = caster
        .known_spells
        .iter()
        .filter_map(|name| session.spells().get(name))
        .collect();
    if known.is_empty() {
        return SpellPick::NoneKnown;
    }

    let config = session.config();
    let has_fear = caster.emotion.has_fear();
    for _ in 0..=config.policy_spell_rerolls {
        let spell = known[rng.pick(known.len())];
        if effective_cost(spell.cost, has_fear, config) <= caster.willpower.current {
            return SpellPick::Chosen(spell);
        }
    }
    SpellPick::NoneAffordable
}

fn choose_targets(
    session: &BattleSession,
    caster: &Combatant,
    spell: &Spell,
    opponents: &[CombatantId],
    rng: &mut dyn BattleRng,
) -> Vec<CombatantId> {
    match (spell.effect_type.is_supportive(), spell.is_multi_target()) {
        (true, false) => vec![caster.id],
        (true, true) => session.living(caster.side).map(|c| c.id).collect(),
        (false, false) => vec![opponents[rng.pick(opponents.len())]],
        (false, true) => opponents.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantSpec, RosterSpec, Side};
    use crate::config::BattleConfig;
    use crate::emotion::Emotion;
    use crate::env::ScriptedRng;
    use crate::spell::{EffectType, SpellTable, TargetCardinality};
    use crate::stats::{CoreStats, StatDelta};

    fn spell(name: &str, effect_type: EffectType, target: TargetCardinality, cost: u32) -> Spell {
        Spell {
            name: name.to_string(),
            effect_type,
            target,
            emotion: Emotion::Anger,
            description: String::new(),
            base_amount: 3,
            turn_count: 1,
            cost,
            emotion_points: 10,
            stat_delta: StatDelta::ZERO,
        }
    }

    fn unit(name: &str, willpower: u32, spells: &[&str]) -> CombatantSpec {
        CombatantSpec {
            name: name.to_string(),
            max_health: 30,
            max_willpower: willpower,
            regen_willpower: 1,
            stats: CoreStats::new(0, 2, 2, 1, 0),
            weakness: None,
            spells: spells.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn session(enemy_spells: &[&str], enemy_willpower: u32) -> BattleSession {
        let table = SpellTable::new(vec![
            spell("Fire", EffectType::Fire, TargetCardinality::Single, 4),
            spell("Soulfire", EffectType::Fire, TargetCardinality::Multiple, 5),
            spell("Mercy", EffectType::Heal, TargetCardinality::Multiple, 4),
            spell("Heal", EffectType::Heal, TargetCardinality::Single, 4),
        ])
        .unwrap();
        let roster = RosterSpec {
            allies: vec![unit("Ada", 10, &[]), unit("Bo", 10, &[])],
            enemies: vec![unit("Goon", enemy_willpower, enemy_spells), unit("Thug", 10, &[])],
        };
        BattleSession::new(&roster, table, BattleConfig::default()).unwrap()
    }

    const GOON: CombatantId = CombatantId(2);

    #[test]
    fn low_rolls_attack_a_living_opponent() {
        let session = session(&["Fire"], 10);
        let mut rng = ScriptedRng::new([5, 1]);
        assert_eq!(
            determine_action(&session, GOON, &mut rng),
            BattleAction::attack(CombatantId(1))
        );
    }

    #[test]
    fn high_rolls_rest() {
        let session = session(&["Fire"], 10);
        let mut rng = ScriptedRng::new([80]);
        assert_eq!(determine_action(&session, GOON, &mut rng), BattleAction::Rest);
    }

    #[test]
    fn middle_rolls_without_spells_fall_back_to_attack() {
        let session = session(&[], 10);
        let mut rng = ScriptedRng::new([50, 0]);
        assert_eq!(
            determine_action(&session, GOON, &mut rng),
            BattleAction::attack(CombatantId(0))
        );
    }

    #[test]
    fn unaffordable_repertoire_rests() {
        let session = session(&["Fire", "Soulfire"], 3);
        let mut rng = ScriptedRng::new([50]).with_fallback(1);
        assert_eq!(determine_action(&session, GOON, &mut rng), BattleAction::Rest);
    }

    #[test]
    fn hostile_multi_target_spells_hit_every_opponent() {
        let session = session(&["Soulfire"], 10);
        let mut rng = ScriptedRng::new([50, 0]);
        assert_eq!(
            determine_action(&session, GOON, &mut rng),
            BattleAction::cast("Soulfire", [CombatantId(0), CombatantId(1)])
        );
    }

    #[test]
    fn supportive_spells_target_the_casters_side() {
        let session = session(&["Heal"], 10);
        let mut rng = ScriptedRng::new([50, 0]);
        assert_eq!(
            determine_action(&session, GOON, &mut rng),
            BattleAction::cast("Heal", [GOON])
        );

        let session = self::session(&["Mercy"], 10);
        let mut rng = ScriptedRng::new([50, 0]);
        assert_eq!(
            determine_action(&session, GOON, &mut rng),
            BattleAction::cast("Mercy", [GOON, CombatantId(3)])
        );
    }

    #[test]
    fn rerolls_find_an_affordable_spell() {
        // Soulfire (index 0) costs 5, Fire (index 1) costs 4.
        let session = session(&["Soulfire", "Fire"], 4);
        let me = session.combatant(GOON).unwrap();
        let mut rng = ScriptedRng::new([0, 0, 1]);
        match pick_spell(&session, me, &mut rng) {
            SpellPick::Chosen(spell) => assert_eq!(spell.name, "Fire"),
            other => panic!("expected a spell, got {other:?}"),
        }
    }
}
