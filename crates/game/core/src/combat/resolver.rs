//! Applies attacks, spells, rest, and turn end to combatants.

use crate::action::ActionError;
use crate::combatant::{Combatant, CombatantId};
use crate::config::BattleConfig;
use crate::emotion::Emotion;
use crate::env::BattleRng;
use crate::spell::{EffectType, Spell};
use crate::status::{BuffModifier, EffectKind};

use super::damage::{DamageType, apply_damage, mitigate, physical_damage};
use super::event::BattleEvent;
use super::hit::{check_dodge, crit_bonus, effective_cost};
use super::result::{DamageOutcome, HealOutcome, Hit};

/// Resolves one action against borrowed combatants.
///
/// The resolver holds no battle state of its own: tuning, the roll source, and
/// the event log of the action in progress.
pub struct ActionResolver<'a> {
    config: &'a BattleConfig,
    rng: &'a mut dyn BattleRng,
    events: Vec<BattleEvent>,
}

impl<'a> ActionResolver<'a> {
    pub fn new(config: &'a BattleConfig, rng: &'a mut dyn BattleRng) -> Self {
        Self {
            config,
            rng,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    // ========================================================================
    // Rolls
    // ========================================================================

    /// Rolls for a critical bonus. Zero when the roll misses the crit range.
    pub fn crit(&mut self, fortune: u32) -> u32 {
        crit_bonus(self.rng.roll_percent(), fortune, self.config)
    }

    pub fn dodge(&mut self, fortune: u32) -> bool {
        check_dodge(self.rng.roll_percent(), fortune, self.config)
    }

    // ========================================================================
    // Damage and healing
    // ========================================================================

    /// Applies `hit` to `defender` unless it dodges.
    ///
    /// A dodge negates everything: no health change, no death, no side effects.
    pub fn take_damage(&mut self, defender: &mut Combatant, hit: Hit) -> DamageOutcome {
        if self.dodge(defender.stats.fortune) {
            self.events.push(BattleEvent::Missed { target: defender.id });
            return DamageOutcome::Dodged;
        }

        let amount = mitigate(
            hit.amount,
            hit.damage_type,
            defender.stats.fortitude,
            defender.weakness,
            self.config,
        );
        defender.health.current = apply_damage(defender.health.current, amount);
        self.events.push(BattleEvent::Damaged {
            target: defender.id,
            amount,
            damage_type: hit.damage_type,
            critical: hit.critical,
            remaining: defender.health.current,
        });

        let killed = defender.health.is_empty() && defender.alive;
        if killed {
            self.death(defender);
        }
        DamageOutcome::Landed { amount, killed }
    }

    /// Heals every target by `amount` plus Happiness and crit bonuses, each
    /// rolled for that target.
    pub fn heal(
        &mut self,
        combatants: &mut [Combatant],
        amount: u32,
        targets: &[CombatantId],
    ) -> Vec<HealOutcome> {
        let mut outcomes = Vec::with_capacity(targets.len());
        for id in targets {
            if let Some(target) = combatants.get_mut(id.index()) {
                outcomes.push(self.heal_one(target, amount));
            }
        }
        outcomes
    }

    fn heal_one(&mut self, target: &mut Combatant, amount: u32) -> HealOutcome {
        let happiness = if target.emotion.has_happiness() {
            self.config.happiness_heal_bonus
        } else {
            0
        };
        let crit = self.crit(target.stats.fortune);

        if target.emotion.has_disgust() {
            self.events.push(BattleEvent::HealBlocked { target: target.id });
            return HealOutcome::Blocked;
        }

        let rolled = amount.saturating_add(happiness).saturating_add(crit);
        let healed = target.health.restore(rolled);
        self.events.push(BattleEvent::Healed {
            target: target.id,
            amount: healed,
            critical: crit > 0,
        });
        HealOutcome::Healed { healed, rolled }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// `physical_base_damage + strength + crit` against `defender`, then ends
    /// the attacker's turn.
    pub fn physical_attack(
        &mut self,
        combatants: &mut [Combatant],
        attacker: CombatantId,
        defender: CombatantId,
    ) -> DamageOutcome {
        let Some((strength, fortune)) = combatants
            .get(attacker.index())
            .map(|a| (a.stats.strength, a.stats.fortune))
        else {
            return DamageOutcome::Dodged;
        };

        let crit = self.crit(fortune);
        let hit = Hit {
            amount: physical_damage(strength, crit, self.config),
            damage_type: DamageType::Physical,
            critical: crit > 0,
        };

        let outcome = match combatants.get_mut(defender.index()) {
            Some(target) => self.take_damage(target, hit),
            None => DamageOutcome::Dodged,
        };

        if let Some(attacker) = combatants.get_mut(attacker.index()) {
            let regen = attacker.regen_willpower;
            self.turn_end(attacker, regen);
        }
        outcome
    }

    /// Casts `spell` from `caster` onto `targets`, then ends the caster's turn.
    ///
    /// The only failure is a willpower shortfall, checked before anything is
    /// touched. Once willpower is spent the cast runs to completion.
    pub fn magic_attack(
        &mut self,
        combatants: &mut [Combatant],
        caster: CombatantId,
        spell: &Spell,
        targets: &[CombatantId],
    ) -> Result<(), ActionError> {
        let source = combatants
            .get_mut(caster.index())
            .ok_or(ActionError::UnknownCombatant(caster))?;

        let cost = effective_cost(spell.cost, source.emotion.has_fear(), self.config);
        if source.willpower.current < cost {
            return Err(ActionError::InsufficientWillpower {
                caster,
                spell: spell.name.clone(),
                cost,
                available: source.willpower.current,
            });
        }

        source.willpower.deplete(cost);
        self.events.push(BattleEvent::WillpowerSpent {
            caster,
            amount: cost,
        });
        if spell.effect_type != EffectType::Emotion {
            self.add_emotion_points(source, spell.emotion, spell.emotion_points);
        }
        let (resolve, fortune) = (source.stats.resolve, source.stats.fortune);

        match spell.effect_type {
            EffectType::Heal => {
                self.heal(combatants, spell.base_amount, targets);
            }
            EffectType::Buff | EffectType::Debuff => {
                for target in targets {
                    if let Some(target) = combatants.get_mut(target.index()) {
                        self.apply_timed_effect(target, spell);
                    }
                }
            }
            EffectType::Emotion => {
                for target in targets {
                    if let Some(target) = combatants.get_mut(target.index()) {
                        self.add_emotion_points(target, spell.emotion, spell.emotion_points);
                        self.check_emotion(target);
                    }
                }
            }
            EffectType::Fire | EffectType::Ice | EffectType::Curse | EffectType::Poison => {
                let damage_type = spell
                    .effect_type
                    .damage_type()
                    .unwrap_or(DamageType::Physical);
                for target in targets {
                    let crit = self.crit(fortune);
                    let hit = Hit {
                        amount: spell
                            .base_amount
                            .saturating_add(resolve)
                            .saturating_add(crit),
                        damage_type,
                        critical: crit > 0,
                    };
                    if let Some(target) = combatants.get_mut(target.index()) {
                        self.take_damage(target, hit);
                    }
                }
            }
        }

        if let Some(source) = combatants.get_mut(caster.index()) {
            let regen = source.regen_willpower;
            self.turn_end(source, regen);
        }
        Ok(())
    }

    /// Calms the combatant down (unless Fear or Disgust holds) and ends the
    /// turn with bonus willpower.
    pub fn rest(&mut self, combatant: &mut Combatant) {
        if !combatant.emotion.blocks_rest() {
            self.change_emotion(combatant, Emotion::None);
        }
        let gain = combatant
            .regen_willpower
            .saturating_add(self.config.rest_willpower_bonus);
        self.turn_end(combatant, gain);
    }

    /// Expires effects, regenerates willpower, checks emotion thresholds, and
    /// hands the turn back.
    pub fn turn_end(&mut self, combatant: &mut Combatant, willpower_gain: u32) {
        for (expired, restored) in combatant.expire_effects() {
            self.events.push(BattleEvent::EffectExpired {
                target: combatant.id,
                kind: expired.kind,
                spell: expired.source,
                restored,
            });
        }

        let gained = combatant.willpower.restore(willpower_gain);
        if gained > 0 {
            self.events.push(BattleEvent::WillpowerRestored {
                combatant: combatant.id,
                amount: gained,
            });
        }

        self.check_emotion(combatant);
        combatant.is_my_turn = false;
        self.events.push(BattleEvent::TurnEnded {
            combatant: combatant.id,
        });
    }

    /// Health reached zero: calm down, pin health at zero, and leave the fight.
    pub fn death(&mut self, combatant: &mut Combatant) {
        if !combatant.alive {
            return;
        }
        self.change_emotion(combatant, Emotion::None);
        combatant.health.current = 0;
        combatant.alive = false;
        combatant.is_my_turn = false;
        self.events.push(BattleEvent::Died {
            combatant: combatant.id,
        });
    }

    // ========================================================================
    // Emotion and status helpers
    // ========================================================================

    pub fn add_emotion_points(&mut self, combatant: &mut Combatant, emotion: Emotion, amount: u32) {
        if emotion == Emotion::None || amount == 0 {
            return;
        }
        combatant.emotion.add_points(emotion, amount);
        self.events.push(BattleEvent::EmotionPointsGained {
            combatant: combatant.id,
            emotion,
            amount,
            total: combatant.emotion.points(emotion),
        });
    }

    /// Transitions into the first emotion whose counter reached the threshold.
    pub fn check_emotion(&mut self, combatant: &mut Combatant) {
        if let Some(next) = combatant
            .emotion
            .check_threshold(self.config.emotion_threshold)
        {
            self.change_emotion(combatant, next);
        }
    }

    fn change_emotion(&mut self, combatant: &mut Combatant, next: Emotion) {
        if let Some(change) = combatant.change_emotion(next, self.config.emotion_stat_shift) {
            self.events.push(BattleEvent::EmotionChanged {
                combatant: combatant.id,
                from: change.from,
                to: change.to,
            });
        }
    }

    fn apply_timed_effect(&mut self, target: &mut Combatant, spell: &Spell) {
        let (kind, suppressed, applied) = match spell.effect_type {
            EffectType::Debuff => {
                let applied = target.add_debuff(&spell.name, &spell.stat_delta, spell.turn_count);
                (EffectKind::Debuff, false, applied)
            }
            _ => {
                let modifier = BuffModifier {
                    bonus: if target.emotion.has_happiness() {
                        self.config.happiness_buff_bonus as i32
                    } else {
                        0
                    },
                    suppressed: target.emotion.has_disgust(),
                };
                let applied =
                    target.add_buff(&spell.name, &spell.stat_delta, spell.turn_count, modifier);
                (EffectKind::Buff, modifier.suppressed, applied)
            }
        };
        self.events.push(BattleEvent::EffectApplied {
            target: target.id,
            kind,
            spell: spell.name.clone(),
            applied,
            turns: spell.turn_count,
            suppressed,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantSpec, Side};
    use crate::env::ScriptedRng;
    use crate::spell::TargetCardinality;
    use crate::stats::{CoreStats, StatDelta};

    // Percentile rolls that neither crit (>= 10) nor dodge (< 95).
    const PLAIN: u32 = 50;
    const CRIT: u32 = 0;
    const DODGE: u32 = 99;

    fn combatant(id: u32, side: Side, stats: CoreStats) -> Combatant {
        let spec = CombatantSpec {
            name: format!("c{id}"),
            max_health: 30,
            max_willpower: 20,
            regen_willpower: 2,
            stats,
            weakness: None,
            spells: Vec::new(),
        };
        Combatant::from_spec(CombatantId(id), side, &spec)
    }

    fn spell(name: &str, effect_type: EffectType, base: u32, cost: u32) -> Spell {
        Spell {
            name: name.to_string(),
            effect_type,
            target: TargetCardinality::Single,
            emotion: Emotion::Anger,
            description: String::new(),
            base_amount: base,
            turn_count: 1,
            cost,
            emotion_points: 15,
            stat_delta: StatDelta::ZERO,
        }
    }

    #[test]
    fn physical_attack_subtracts_fortitude() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::new([PLAIN, PLAIN]);
        let mut combatants = vec![
            combatant(0, Side::Ally, CoreStats::new(0, 4, 0, 0, 0)),
            combatant(1, Side::Enemy, CoreStats::new(0, 0, 0, 2, 0)),
        ];

        let mut resolver = ActionResolver::new(&config, &mut rng);
        let outcome = resolver.physical_attack(&mut combatants, CombatantId(0), CombatantId(1));

        assert_eq!(
            outcome,
            DamageOutcome::Landed {
                amount: 6,
                killed: false
            }
        );
        assert_eq!(combatants[1].health.current, 24);
        assert!(resolver.events().contains(&BattleEvent::TurnEnded {
            combatant: CombatantId(0)
        }));
    }

    #[test]
    fn dodge_negates_any_amount() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::new([DODGE]);
        let mut defender = combatant(1, Side::Enemy, CoreStats::default());
        let mut resolver = ActionResolver::new(&config, &mut rng);

        let outcome = resolver.take_damage(
            &mut defender,
            Hit {
                amount: 999,
                damage_type: DamageType::Fire,
                critical: false,
            },
        );
        assert_eq!(outcome, DamageOutcome::Dodged);
        assert_eq!(defender.health.current, 30);
        assert!(defender.alive);
        assert_eq!(
            resolver.into_events(),
            vec![BattleEvent::Missed {
                target: CombatantId(1)
            }]
        );
    }

    #[test]
    fn lethal_damage_kills_and_clears_emotion() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::new([PLAIN]);
        let mut defender = combatant(1, Side::Enemy, CoreStats::new(0, 6, 6, 6, 6));
        defender.change_emotion(Emotion::Happiness, 5);
        let mut resolver = ActionResolver::new(&config, &mut rng);

        let outcome = resolver.take_damage(
            &mut defender,
            Hit {
                amount: 40,
                damage_type: DamageType::Ice,
                critical: false,
            },
        );

        assert_eq!(
            outcome,
            DamageOutcome::Landed {
                amount: 40,
                killed: true
            }
        );
        assert!(!defender.alive);
        assert_eq!(defender.health.current, 0);
        assert_eq!(defender.current_emotion(), Emotion::None);
        assert_eq!(defender.stats.strength, 6);
    }

    #[test]
    fn heal_is_blocked_by_disgust() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::constant(PLAIN);
        let mut combatants = vec![combatant(0, Side::Ally, CoreStats::default())];
        combatants[0].health.current = 10;
        let target = &mut combatants[0];
        target.change_emotion(Emotion::Disgust, 5);

        let mut resolver = ActionResolver::new(&config, &mut rng);
        let outcomes = resolver.heal(&mut combatants, 4, &[CombatantId(0)]);
        assert_eq!(outcomes, vec![HealOutcome::Blocked]);
        assert_eq!(combatants[0].health.current, 10);
    }

    #[test]
    fn heal_clamps_to_maximum() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::new([CRIT]);
        let mut combatants = vec![combatant(0, Side::Ally, CoreStats::default())];
        combatants[0].health.current = 28;

        let mut resolver = ActionResolver::new(&config, &mut rng);
        let outcomes = resolver.heal(&mut combatants, 4, &[CombatantId(0)]);
        assert_eq!(
            outcomes,
            vec![HealOutcome::Healed {
                healed: 2,
                rolled: 7
            }]
        );
        assert_eq!(combatants[0].health.current, 30);
    }

    #[test]
    fn short_willpower_mutates_nothing() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::constant(PLAIN);
        let mut combatants = vec![
            combatant(0, Side::Ally, CoreStats::default()),
            combatant(1, Side::Enemy, CoreStats::default()),
        ];
        combatants[0].willpower.current = 3;
        let before = combatants.clone();

        let mut resolver = ActionResolver::new(&config, &mut rng);
        let err = resolver
            .magic_attack(
                &mut combatants,
                CombatantId(0),
                &spell("Fire", EffectType::Fire, 3, 4),
                &[CombatantId(1)],
            )
            .unwrap_err();

        assert!(matches!(err, ActionError::InsufficientWillpower { cost: 4, available: 3, .. }));
        assert_eq!(combatants, before);
        assert!(resolver.events().is_empty());
    }

    #[test]
    fn elemental_spell_adds_resolve_and_grants_caster_points() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::new([PLAIN, PLAIN]);
        let mut combatants = vec![
            combatant(0, Side::Ally, CoreStats::new(0, 0, 2, 0, 0)),
            combatant(1, Side::Enemy, CoreStats::new(0, 0, 0, 9, 0)),
        ];

        let mut resolver = ActionResolver::new(&config, &mut rng);
        resolver
            .magic_attack(
                &mut combatants,
                CombatantId(0),
                &spell("Fire", EffectType::Fire, 3, 4),
                &[CombatantId(1)],
            )
            .unwrap();

        // Fortitude does not reduce spell damage.
        assert_eq!(combatants[1].health.current, 25);
        assert_eq!(combatants[0].willpower.current, 18);
        assert_eq!(combatants[0].emotion.points(Emotion::Anger), 15);
    }

    #[test]
    fn emotion_spell_fills_target_not_caster() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::constant(PLAIN);
        let mut combatants = vec![
            combatant(0, Side::Ally, CoreStats::default()),
            combatant(1, Side::Enemy, CoreStats::new(0, 5, 5, 5, 5)),
        ];
        let mut taunt = spell("Taunt", EffectType::Emotion, 0, 1);
        taunt.emotion_points = 50;

        for _ in 0..2 {
            combatants[0].is_my_turn = true;
            let mut resolver = ActionResolver::new(&config, &mut rng);
            resolver
                .magic_attack(&mut combatants, CombatantId(0), &taunt, &[CombatantId(1)])
                .unwrap();
        }

        assert_eq!(combatants[0].emotion.points(Emotion::Anger), 0);
        assert_eq!(combatants[1].current_emotion(), Emotion::Anger);
        assert_eq!(combatants[1].stats.strength, 10);
    }

    #[test]
    fn buff_and_debuff_record_effects() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::constant(PLAIN);
        let mut combatants = vec![
            combatant(0, Side::Ally, CoreStats::new(0, 1, 0, 0, 0)),
            combatant(1, Side::Enemy, CoreStats::new(0, 1, 0, 0, 0)),
        ];
        let mut strengthen = spell("Strengthen", EffectType::Buff, 0, 4);
        strengthen.stat_delta = StatDelta::new(0, 4, 0, 0, 0);
        strengthen.turn_count = 3;
        let mut debilitate = spell("Debilitate", EffectType::Debuff, 0, 2);
        debilitate.stat_delta = StatDelta::new(0, 2, 0, 0, 0);
        debilitate.turn_count = 4;

        let mut resolver = ActionResolver::new(&config, &mut rng);
        resolver
            .magic_attack(&mut combatants, CombatantId(0), &strengthen, &[CombatantId(0)])
            .unwrap();
        resolver
            .magic_attack(&mut combatants, CombatantId(0), &debilitate, &[CombatantId(1)])
            .unwrap();

        assert_eq!(combatants[0].stats.strength, 5);
        assert_eq!(combatants[1].stats.strength, 0);
        assert!(resolver.events().iter().any(|e| matches!(
            e,
            BattleEvent::EffectApplied {
                kind: EffectKind::Debuff,
                applied,
                ..
            } if *applied == StatDelta::new(0, -1, 0, 0, 0)
        )));
    }

    #[test]
    fn rest_calms_unless_afraid() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::constant(PLAIN);
        let mut calm = combatant(0, Side::Ally, CoreStats::new(0, 5, 5, 5, 5));
        calm.willpower.current = 0;
        calm.change_emotion(Emotion::Anger, 5);
        let mut afraid = combatant(1, Side::Ally, CoreStats::default());
        afraid.change_emotion(Emotion::Fear, 5);

        let mut resolver = ActionResolver::new(&config, &mut rng);
        resolver.rest(&mut calm);
        resolver.rest(&mut afraid);

        assert_eq!(calm.current_emotion(), Emotion::None);
        assert_eq!(calm.stats, CoreStats::new(0, 5, 5, 5, 5));
        assert_eq!(calm.willpower.current, 5);
        assert_eq!(afraid.current_emotion(), Emotion::Fear);
    }

    #[test]
    fn turn_end_expires_effects_and_checks_threshold() {
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::constant(PLAIN);
        let mut c = combatant(0, Side::Ally, CoreStats::new(0, 5, 5, 5, 5));
        c.is_my_turn = true;
        c.willpower.current = 19;
        c.add_debuff("Misfortune", &StatDelta::new(0, 0, 0, 0, 2), 1);
        c.emotion.add_points(Emotion::Sadness, 100);

        let mut resolver = ActionResolver::new(&config, &mut rng);
        resolver.turn_end(&mut c, 2);

        assert!(c.effects.is_empty());
        assert_eq!(c.willpower.current, 20);
        assert_eq!(c.current_emotion(), Emotion::Sadness);
        assert_eq!(c.stats.fortune, 10);
        assert!(!c.is_my_turn);
    }
}
