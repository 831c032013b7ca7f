use game_core::{
    ActionError, ActionResolver, BattleAction, BattleConfig, BattleEvent, BattleSession,
    Combatant, CombatantId, CombatantSpec, CoreStats, DamageType, EffectType, Emotion,
    ResourceMeter, RosterSpec, ScriptedRng, Side, Spell, SpellTable, StatDelta, TargetCardinality,
};

// Percentile rolls that neither crit (>= 10) nor dodge (< 95).
const PLAIN: u32 = 50;
const CRIT: u32 = 0;
const DODGE: u32 = 99;

fn spell(
    name: &str,
    effect_type: EffectType,
    target: TargetCardinality,
    emotion: Emotion,
    base_amount: u32,
    cost: u32,
    emotion_points: u32,
) -> Spell {
    Spell {
        name: name.to_string(),
        effect_type,
        target,
        emotion,
        description: String::new(),
        base_amount,
        turn_count: 1,
        cost,
        emotion_points,
        stat_delta: StatDelta::ZERO,
    }
}

fn spells() -> SpellTable {
    SpellTable::new(vec![
        spell("Fire", EffectType::Fire, TargetCardinality::Single, Emotion::Anger, 3, 4, 15),
        spell("Soulfire", EffectType::Fire, TargetCardinality::Multiple, Emotion::Anger, 2, 5, 20),
        spell("Heal", EffectType::Heal, TargetCardinality::Single, Emotion::Happiness, 4, 4, 20),
        spell("Despair", EffectType::Emotion, TargetCardinality::Single, Emotion::Fear, 0, 1, 50),
    ])
    .expect("valid table")
}

fn unit(name: &str, stats: CoreStats, willpower: u32, known: &[&str]) -> CombatantSpec {
    CombatantSpec {
        name: name.to_string(),
        max_health: 30,
        max_willpower: willpower,
        regen_willpower: 0,
        stats,
        weakness: None,
        spells: known.iter().map(|s| s.to_string()).collect(),
    }
}

fn start(roster: RosterSpec, rolls: impl IntoIterator<Item = u32>) -> BattleSession {
    BattleSession::new(&roster, spells(), BattleConfig::default())
        .expect("valid roster")
        .with_rng(ScriptedRng::new(rolls).with_fallback(PLAIN))
}

fn turn(session: &mut BattleSession) -> CombatantId {
    session.begin_turn().expect("someone is alive").actor
}

#[test]
fn physical_attack_deals_strength_plus_base_minus_fortitude() {
    let roster = RosterSpec {
        allies: vec![unit("Ada", CoreStats::new(0, 4, 0, 0, 0), 10, &[])],
        enemies: vec![unit("Goon", CoreStats::new(0, 0, 0, 2, 0), 10, &[])],
    };
    let mut session = start(roster, [PLAIN, PLAIN]);
    let ada = turn(&mut session);
    let goon = CombatantId(1);

    let outcome = session.execute(ada, BattleAction::attack(goon)).unwrap();

    assert_eq!(session.combatant(goon).unwrap().health.current, 24);
    assert!(outcome.events.contains(&BattleEvent::Damaged {
        target: goon,
        amount: 6,
        damage_type: DamageType::Physical,
        critical: false,
        remaining: 24,
    }));
    assert_eq!(outcome.events.last(), Some(&BattleEvent::TurnEnded { combatant: ada }));
}

#[test]
fn happy_target_gets_bonus_and_crit_healing() {
    let config = BattleConfig::default();
    let table = spells();
    let heal = table.get("heal").unwrap();

    let caster = unit("Ada", CoreStats::default(), 10, &["Heal"]);
    let patient = unit("Bo", CoreStats::new(0, 6, 0, 0, 0), 10, &[]);
    let mut combatants = vec![
        Combatant::from_spec(CombatantId(0), Side::Ally, &caster),
        Combatant::from_spec(CombatantId(1), Side::Ally, &patient),
    ];
    {
        let bo = &mut combatants[1];
        bo.health = ResourceMeter::new(10, 30);
        bo.change_emotion(Emotion::Happiness, 5);
        assert_eq!(bo.health, ResourceMeter::new(5, 25));
    }

    let mut rng = ScriptedRng::new([CRIT]);
    let mut resolver = ActionResolver::new(&config, &mut rng);
    resolver
        .magic_attack(&mut combatants, CombatantId(0), heal, &[CombatantId(1)])
        .unwrap();
    let events = resolver.into_events();

    assert!(events.contains(&BattleEvent::Healed {
        target: CombatantId(1),
        amount: 10,
        critical: true,
    }));
    assert_eq!(combatants[1].health.current, 15);
}

#[test]
fn healing_is_clamped_to_maximum() {
    let config = BattleConfig::default();
    let table = spells();
    let mut combatants = vec![Combatant::from_spec(
        CombatantId(0),
        Side::Ally,
        &unit("Ada", CoreStats::default(), 10, &["Heal"]),
    )];
    combatants[0].health.current = 28;

    let mut rng = ScriptedRng::new([CRIT]);
    let mut resolver = ActionResolver::new(&config, &mut rng);
    resolver
        .magic_attack(
            &mut combatants,
            CombatantId(0),
            table.get("Heal").unwrap(),
            &[CombatantId(0)],
        )
        .unwrap();

    assert_eq!(combatants[0].health.current, 30);
}

#[test]
fn fear_surcharge_makes_a_spell_unaffordable_without_side_effects() {
    let roster = RosterSpec {
        allies: vec![unit("Ada", CoreStats::default(), 5, &["Fire"])],
        enemies: vec![unit("Goon", CoreStats::default(), 10, &["Despair"])],
    };
    let mut session = start(roster, []);
    let ada = CombatantId(0);

    // Two Despair casts push Ada's Fear counter to the threshold.
    for _ in 0..2 {
        let actor = turn(&mut session);
        session.execute(actor, BattleAction::Rest).unwrap();
        let actor = turn(&mut session);
        session
            .execute(actor, BattleAction::cast("Despair", [ada]))
            .unwrap();
    }
    assert_eq!(session.combatant(ada).unwrap().current_emotion(), Emotion::Fear);

    assert_eq!(turn(&mut session), ada);
    let before = session.combatants().to_vec();
    let err = session
        .execute(ada, BattleAction::cast("Fire", [CombatantId(1)]))
        .unwrap_err();

    assert_eq!(
        err,
        ActionError::InsufficientWillpower {
            caster: ada,
            spell: "Fire".to_string(),
            cost: 6,
            available: 5,
        }
    );
    assert_eq!(session.combatants(), before.as_slice());
    assert_eq!(session.current(), Some(ada));
}

#[test]
fn multi_target_spell_rolls_each_target_independently() {
    let roster = RosterSpec {
        allies: vec![unit("Ada", CoreStats::new(0, 0, 2, 0, 0), 10, &["Soulfire"])],
        enemies: vec![
            unit("Goon", CoreStats::new(0, 0, 0, 3, 0), 10, &[]),
            unit("Thug", CoreStats::default(), 10, &[]),
            unit("Hood", CoreStats::default(), 10, &[]),
        ],
    };
    // Per target: crit roll with the caster's fortune, then the dodge roll.
    let mut session = start(roster, [CRIT, PLAIN, PLAIN, PLAIN, PLAIN, DODGE]);
    let ada = turn(&mut session);
    let targets = [CombatantId(1), CombatantId(2), CombatantId(3)];

    let outcome = session
        .execute(ada, BattleAction::cast("Soulfire", targets))
        .unwrap();

    let damage: Vec<(CombatantId, u32, bool)> = outcome
        .events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::Damaged {
                target,
                amount,
                critical,
                ..
            } => Some((*target, *amount, *critical)),
            _ => None,
        })
        .collect();
    // Fortitude only mitigates physical damage.
    assert_eq!(
        damage,
        vec![(CombatantId(1), 7, true), (CombatantId(2), 4, false)]
    );
    assert!(outcome.events.contains(&BattleEvent::Missed { target: CombatantId(3) }));
    assert_eq!(session.combatant(CombatantId(3)).unwrap().health.current, 30);
    assert_eq!(session.combatant(ada).unwrap().willpower.current, 5);
}

#[test]
fn dead_combatants_leave_the_turn_order() {
    let mut doomed = unit("Glass", CoreStats::default(), 10, &[]);
    doomed.max_health = 3;
    let roster = RosterSpec {
        allies: vec![unit("Ada", CoreStats::new(0, 4, 0, 0, 0), 10, &[])],
        enemies: vec![doomed, unit("Goon", CoreStats::default(), 10, &[])],
    };
    let mut session = start(roster, []);
    let glass = CombatantId(1);

    let ada = turn(&mut session);
    let outcome = session.execute(ada, BattleAction::attack(glass)).unwrap();
    assert!(outcome.events.contains(&BattleEvent::Died { combatant: glass }));

    let dead = session.combatant(glass).unwrap();
    assert!(!dead.alive);
    assert_eq!(dead.health.current, 0);

    // Glass was queued this round but is skipped.
    assert_eq!(turn(&mut session), CombatantId(2));
    session.execute(CombatantId(2), BattleAction::Rest).unwrap();

    let next = session.begin_turn().unwrap();
    assert!(next.new_round);
    assert_eq!(next.round, 2);
    assert_eq!(session.scheduler().pending().collect::<Vec<_>>(), vec![CombatantId(2)]);

    let err = session
        .execute(next.actor, BattleAction::attack(glass))
        .unwrap_err();
    assert_eq!(err, ActionError::InvalidTarget(glass));
}

#[test]
fn wiping_out_a_side_decides_the_winner() {
    let mut doomed = unit("Glass", CoreStats::default(), 10, &[]);
    doomed.max_health = 1;
    let roster = RosterSpec {
        allies: vec![unit("Ada", CoreStats::default(), 10, &[])],
        enemies: vec![doomed],
    };
    let mut session = start(roster, []);
    assert_eq!(session.winner(), None);

    let ada = turn(&mut session);
    session.execute(ada, BattleAction::attack(CombatantId(1))).unwrap();

    assert!(session.is_side_defeated(Side::Enemy));
    assert_eq!(session.winner(), Some(Side::Ally));
}

#[test]
fn only_the_active_combatant_may_act() {
    let roster = RosterSpec {
        allies: vec![unit("Ada", CoreStats::default(), 10, &[])],
        enemies: vec![unit("Goon", CoreStats::default(), 10, &[])],
    };
    let mut session = start(roster, []);
    let goon = CombatantId(1);

    assert_eq!(
        session.execute(goon, BattleAction::Rest),
        Err(ActionError::NotActive { actor: goon })
    );

    let ada = turn(&mut session);
    // Asking again mid-turn hands back the same turn.
    assert_eq!(turn(&mut session), ada);
    assert_eq!(
        session.execute(goon, BattleAction::Rest),
        Err(ActionError::NotActive { actor: goon })
    );
}

#[test]
fn malformed_casts_are_rejected() {
    let roster = RosterSpec {
        allies: vec![unit("Ada", CoreStats::default(), 10, &["Fire", "Heal"])],
        enemies: vec![
            unit("Goon", CoreStats::default(), 10, &[]),
            unit("Thug", CoreStats::default(), 10, &[]),
        ],
    };
    let mut session = start(roster, []);
    let ada = turn(&mut session);

    assert_eq!(
        session.execute(ada, BattleAction::cast("Blizzard", [CombatantId(1)])),
        Err(ActionError::UnknownSpell("Blizzard".to_string()))
    );
    assert_eq!(
        session.execute(ada, BattleAction::cast("Soulfire", [CombatantId(1)])),
        Err(ActionError::SpellNotKnown {
            caster: ada,
            spell: "Soulfire".to_string(),
        })
    );
    assert_eq!(
        session.execute(ada, BattleAction::cast("Fire", [])),
        Err(ActionError::NoTargets {
            spell: "Fire".to_string(),
        })
    );
    assert_eq!(
        session.execute(ada, BattleAction::cast("Fire", [CombatantId(1), CombatantId(2)])),
        Err(ActionError::TooManyTargets {
            spell: "Fire".to_string(),
            count: 2,
        })
    );
    assert_eq!(
        session.execute(ada, BattleAction::cast("fire", [CombatantId(9)])),
        Err(ActionError::InvalidTarget(CombatantId(9)))
    );

    // Spell names are matched case-insensitively.
    assert!(session
        .execute(ada, BattleAction::cast("fire", [CombatantId(1)]))
        .is_ok());
}
