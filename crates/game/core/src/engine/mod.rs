//! Battle session: the single owner of every combatant.
//!
//! [`BattleSession`] holds the combatant arena, the spell catalog, tuning, the
//! roll source, and the turn scheduler. Everything else borrows from it. A
//! battle advances strictly one turn at a time:
//!
//! ```text
//! begin_turn() ─► (decision) ─► execute(actor, action) ─► begin_turn() ─► ...
//!                     ▲                │
//!                     └── ActionError ─┘   (nothing changed, same actor again)
//! ```

pub mod policy;
mod turns;

pub use policy::{SpellPick, determine_action};
pub use turns::{ScheduledTurn, TurnScheduler};

use std::collections::HashSet;

use crate::action::{ActionError, ActionOutcome, BattleAction};
use crate::combat::{ActionResolver, effective_cost};
use crate::combatant::{Combatant, CombatantId, RosterError, RosterSpec, Side};
use crate::config::BattleConfig;
use crate::env::{BattleRng, PcgRng};
use crate::spell::{Spell, SpellTable, TargetCardinality};

/// RNG stream used by the session's own rolls.
const SESSION_STREAM: u32 = 0;

pub struct BattleSession {
    combatants: Vec<Combatant>,
    spells: SpellTable,
    config: BattleConfig,
    rng: Box<dyn BattleRng>,
    scheduler: TurnScheduler,
    current: Option<CombatantId>,
}

impl BattleSession {
    /// Builds a battle from roster data. Allies take the first ids, enemies
    /// the rest, each side in roster order.
    pub fn new(
        roster: &RosterSpec,
        spells: SpellTable,
        config: BattleConfig,
    ) -> Result<Self, RosterError> {
        validate_roster(roster, &spells)?;

        let sides = roster
            .allies
            .iter()
            .map(|spec| (Side::Ally, spec))
            .chain(roster.enemies.iter().map(|spec| (Side::Enemy, spec)));
        let combatants = sides
            .enumerate()
            .map(|(i, (side, spec))| Combatant::from_spec(CombatantId(i as u32), side, spec))
            .collect();

        let rng = Box::new(PcgRng::for_stream(config.seed, SESSION_STREAM));
        Ok(Self {
            combatants,
            spells,
            config,
            rng,
            scheduler: TurnScheduler::new(),
            current: None,
        })
    }

    /// Replaces the roll source, e.g. with a scripted one.
    pub fn with_rng(mut self, rng: impl BattleRng + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // ===== queries =====

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<&Combatant> {
        self.combatants
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Combatant> + '_ {
        self.combatants
            .iter()
            .filter(move |c| c.alive && c.side == side)
    }

    pub fn spells(&self) -> &SpellTable {
        &self.spells
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    /// Combatant whose turn is in progress, if any.
    pub fn current(&self) -> Option<CombatantId> {
        self.current
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    /// True once every combatant on `side` is dead.
    pub fn is_side_defeated(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    /// The surviving side once the other has been wiped out.
    pub fn winner(&self) -> Option<Side> {
        match (
            self.is_side_defeated(Side::Ally),
            self.is_side_defeated(Side::Enemy),
        ) {
            (false, true) => Some(Side::Ally),
            (true, false) => Some(Side::Enemy),
            _ => None,
        }
    }

    /// Willpower `caster` would pay for `spell` right now.
    pub fn spell_cost(&self, caster: CombatantId, spell: &Spell) -> Option<u32> {
        self.combatant(caster)
            .map(|c| effective_cost(spell.cost, c.emotion.has_fear(), &self.config))
    }

    // ===== turn flow =====

    /// Hands the turn to the next living combatant.
    ///
    /// While a turn is in progress this returns that same turn again.
    pub fn begin_turn(&mut self) -> Option<ScheduledTurn> {
        if let Some(actor) = self.current
            && self.combatant(actor).is_some_and(|c| c.alive)
        {
            return Some(ScheduledTurn {
                actor,
                round: self.scheduler.round(),
                new_round: false,
            });
        }

        let turn = self.scheduler.next(&self.combatants)?;
        if let Some(actor) = self.combatants.get_mut(turn.actor.index()) {
            actor.is_my_turn = true;
        }
        self.current = Some(turn.actor);
        Some(turn)
    }

    /// Checks an action without changing anything.
    pub fn validate(&self, actor: CombatantId, action: &BattleAction) -> Result<(), ActionError> {
        if self.current != Some(actor) {
            return Err(ActionError::NotActive { actor });
        }
        let me = self
            .combatant(actor)
            .ok_or(ActionError::UnknownCombatant(actor))?;
        if !me.alive {
            return Err(ActionError::NotActive { actor });
        }

        match action {
            BattleAction::Rest => Ok(()),
            BattleAction::Attack { target } => self.require_living(*target),
            BattleAction::Cast { spell, targets } => {
                let spell = self.lookup_spell(me, spell)?;
                if targets.is_empty() {
                    return Err(ActionError::NoTargets {
                        spell: spell.name.clone(),
                    });
                }
                if spell.target == TargetCardinality::Single && targets.len() > 1 {
                    return Err(ActionError::TooManyTargets {
                        spell: spell.name.clone(),
                        count: targets.len(),
                    });
                }
                let mut seen = HashSet::new();
                for target in targets {
                    self.require_living(*target)?;
                    if !seen.insert(*target) {
                        return Err(ActionError::InvalidTarget(*target));
                    }
                }
                let cost = effective_cost(spell.cost, me.emotion.has_fear(), &self.config);
                if me.willpower.current < cost {
                    return Err(ActionError::InsufficientWillpower {
                        caster: actor,
                        spell: spell.name.clone(),
                        cost,
                        available: me.willpower.current,
                    });
                }
                Ok(())
            }
        }
    }

    /// Resolves the current actor's action and ends its turn.
    ///
    /// On error nothing changed and the same actor still holds the turn.
    pub fn execute(
        &mut self,
        actor: CombatantId,
        action: BattleAction,
    ) -> Result<ActionOutcome, ActionError> {
        self.validate(actor, &action)?;

        let mut resolver = ActionResolver::new(&self.config, self.rng.as_mut());
        match &action {
            BattleAction::Attack { target } => {
                resolver.physical_attack(&mut self.combatants, actor, *target);
            }
            BattleAction::Cast { spell, targets } => {
                let spell = self
                    .spells
                    .get(spell)
                    .ok_or_else(|| ActionError::UnknownSpell(spell.clone()))?;
                resolver.magic_attack(&mut self.combatants, actor, spell, targets)?;
            }
            BattleAction::Rest => {
                if let Some(me) = self.combatants.get_mut(actor.index()) {
                    resolver.rest(me);
                }
            }
        }

        let events = resolver.into_events();
        self.current = None;
        Ok(ActionOutcome {
            actor,
            action,
            events,
        })
    }

    fn require_living(&self, target: CombatantId) -> Result<(), ActionError> {
        match self.combatant(target) {
            Some(c) if c.alive => Ok(()),
            _ => Err(ActionError::InvalidTarget(target)),
        }
    }

    fn lookup_spell(&self, caster: &Combatant, name: &str) -> Result<&Spell, ActionError> {
        let spell = self
            .spells
            .get(name)
            .ok_or_else(|| ActionError::UnknownSpell(name.to_string()))?;
        if !caster.knows_spell(&spell.name) {
            return Err(ActionError::SpellNotKnown {
                caster: caster.id,
                spell: spell.name.clone(),
            });
        }
        Ok(spell)
    }
}

impl core::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleSession")
            .field("combatants", &self.combatants)
            .field("round", &self.scheduler.round())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

fn validate_roster(roster: &RosterSpec, spells: &SpellTable) -> Result<(), RosterError> {
    if roster.allies.is_empty() {
        return Err(RosterError::EmptySide(Side::Ally));
    }
    if roster.enemies.is_empty() {
        return Err(RosterError::EmptySide(Side::Enemy));
    }

    let mut names = HashSet::new();
    for spec in roster.allies.iter().chain(&roster.enemies) {
        if spec.max_health == 0 {
            return Err(RosterError::ZeroHealth(spec.name.clone()));
        }
        if !names.insert(spec.name.to_ascii_lowercase()) {
            return Err(RosterError::DuplicateName(spec.name.clone()));
        }
        if let Some(unknown) = spec.spells.iter().find(|s| !spells.contains(s)) {
            return Err(RosterError::UnknownSpell {
                combatant: spec.name.clone(),
                spell: unknown.clone(),
            });
        }
    }
    Ok(())
}
