//! High-level battle orchestrator.
//!
//! The runtime owns the [`BattleSession`], asks providers for decisions,
//! drives the presentation sink around each resolution, and republishes what
//! happened on the [`EventBus`]. It exposes a builder-based API for clients.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use game_content::{RosterLoader, SpellLoader};
use game_core::{
    ActionOutcome, BattleAction, BattleConfig, BattleEvent, BattleSession, CombatantId, Emotion,
    RosterSpec, ScheduledTurn, Side, SpellTable,
};

use crate::api::{ActionProvider, ProviderKind, ProviderRegistry, Result, RuntimeError};
use crate::events::{BattleOutcome, BattleResult, CombatEvent, Event, EventBus, Topic, TurnEvent};
use crate::presentation::{
    EffectRequest, NullPresentation, NumberPopup, PopupKind, PresentationSink, VisualEffect,
    join_all,
};

/// Runtime configuration shared across the orchestrator and its collaborators.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    /// Decisions asked for per turn before the actor is made to rest.
    pub max_decision_attempts: u32,
    /// Stop with a stalemate after this many rounds.
    pub max_rounds: Option<u32>,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;
    pub const DEFAULT_MAX_DECISION_ATTEMPTS: u32 = 3;

    pub fn with_battle(mut self, battle: BattleConfig) -> Self {
        self.battle = battle;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn with_max_decision_attempts(mut self, attempts: u32) -> Self {
        self.max_decision_attempts = attempts.max(1);
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
            max_decision_attempts: Self::DEFAULT_MAX_DECISION_ATTEMPTS,
            max_rounds: None,
        }
    }
}

/// What a single [`BattleRuntime::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// One turn was played and the battle goes on.
    Continued {
        turn: ScheduledTurn,
        outcome: ActionOutcome,
    },
    /// The battle is over; further steps return the same result.
    Finished(BattleResult),
}

/// Main runtime that drives one battle turn by turn.
pub struct BattleRuntime {
    session: BattleSession,
    config: RuntimeConfig,
    providers: ProviderRegistry,
    presentation: Arc<dyn PresentationSink>,
    event_bus: EventBus,
    turns: u32,
    result: Option<BattleResult>,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Get a handle to the event bus; clones share the same channels.
    pub fn event_bus(&self) -> EventBus {
        self.event_bus.clone()
    }

    /// Subscribe to one topic of battle events
    pub async fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic).await
    }

    /// Turns resolved so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// The final result, once the battle is over.
    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    /// Set the provider for every ally without an override
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.providers.register(ProviderKind::Player, provider);
    }

    /// Set the provider for every enemy without an override
    pub fn set_enemy_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.providers.register(ProviderKind::Enemy, provider);
    }

    /// Plays one turn: decide, animate, resolve, report.
    ///
    /// Requires a provider for the actor's side (or an override) to be set.
    pub async fn step(&mut self) -> Result<StepOutcome> {
        if let Some(result) = self.check_finished() {
            return Ok(StepOutcome::Finished(result));
        }

        let turn = self
            .session
            .begin_turn()
            .ok_or(RuntimeError::NoLivingCombatants)?;
        if turn.new_round {
            info!(target: "runtime::battle", round = turn.round, "round started");
            if self.config.max_rounds.is_some_and(|max| turn.round > max) {
                let result = self.finish(BattleOutcome::Stalemate, turn.round - 1);
                return Ok(StepOutcome::Finished(result));
            }
        }
        self.event_bus.publish(Event::Turn(TurnEvent::Started {
            actor: turn.actor,
            round: turn.round,
            new_round: turn.new_round,
        }));
        debug!(target: "runtime::battle", actor = %turn.actor, round = turn.round, "turn started");

        let action = self.decide(turn.actor).await?;
        self.presentation
            .announce_action(&self.session, turn.actor, &action);
        self.play_lead_in(turn.actor, &action).await;

        let outcome = match self.session.execute(turn.actor, action) {
            Ok(outcome) => outcome,
            Err(err) => {
                // Validated in `decide` and nothing has changed since.
                warn!(target: "runtime::battle", actor = %turn.actor, error = %err, "resolution refused, resting");
                self.session.execute(turn.actor, BattleAction::Rest)?
            }
        };
        self.turns += 1;
        info!(
            target: "runtime::battle",
            actor = %turn.actor,
            action = %outcome.action,
            events = outcome.events.len(),
            "action resolved"
        );

        self.present_events(&outcome.events);
        self.event_bus.publish(Event::Combat(CombatEvent::Resolved {
            actor: outcome.actor,
            action: outcome.action.clone(),
            events: outcome.events.clone(),
        }));

        if let Some(result) = self.check_finished() {
            return Ok(StepOutcome::Finished(result));
        }
        Ok(StepOutcome::Continued { turn, outcome })
    }

    /// Run the battle loop until one side is wiped out or the round limit hits.
    pub async fn run(&mut self) -> Result<BattleResult> {
        loop {
            if let StepOutcome::Finished(result) = self.step().await? {
                return Ok(result);
            }
        }
    }

    /// Asks the actor's provider until it picks something the battle accepts.
    async fn decide(&self, actor: CombatantId) -> Result<BattleAction> {
        let side = self
            .session
            .combatant(actor)
            .map(|c| c.side)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let provider = self.providers.get_for(actor, side)?;

        for attempt in 1..=self.config.max_decision_attempts {
            let action = provider.provide_action(actor, &self.session).await?;
            match self.session.validate(actor, &action) {
                Ok(()) => return Ok(action),
                Err(err) => {
                    warn!(
                        target: "runtime::battle",
                        %actor,
                        %action,
                        attempt,
                        error = %err,
                        "action rejected"
                    );
                    provider.on_rejected(actor, &err);
                    self.event_bus.publish(Event::Turn(TurnEvent::Rejected {
                        actor,
                        action,
                        error: err.to_string(),
                        attempt,
                    }));
                }
            }
        }

        warn!(target: "runtime::battle", %actor, "out of decision attempts, resting");
        self.event_bus
            .publish(Event::Turn(TurnEvent::ForcedRest { actor }));
        Ok(BattleAction::Rest)
    }

    /// Plays one effect per target and waits for all of them to finish.
    async fn play_lead_in(&self, actor: CombatantId, action: &BattleAction) {
        let spell = match action {
            BattleAction::Cast { spell, .. } => self.session.spells().get(spell),
            _ => None,
        };
        let completions: Vec<_> = EffectRequest::for_action(action, actor, spell)
            .into_iter()
            .map(|request| self.presentation.play_effect(request))
            .collect();

        let dropped = join_all(completions).await;
        if dropped > 0 {
            debug!(target: "runtime::battle", dropped, "effects finished without signalling");
        }
    }

    /// Maps resolved events onto popups and looping emotion effects.
    fn present_events(&self, events: &[BattleEvent]) {
        let sink = &self.presentation;
        for event in events {
            match event {
                BattleEvent::Damaged {
                    target,
                    amount,
                    critical,
                    ..
                } => sink.show_popup(NumberPopup {
                    target: *target,
                    value: i64::from(*amount),
                    kind: PopupKind::Damage {
                        critical: *critical,
                    },
                }),
                BattleEvent::Missed { target } => {
                    // Fire-and-forget; resolution is already done.
                    let _ = sink.play_effect(EffectRequest::new(VisualEffect::Miss, *target));
                }
                BattleEvent::Healed {
                    target,
                    amount,
                    critical,
                } => sink.show_popup(NumberPopup {
                    target: *target,
                    value: i64::from(*amount),
                    kind: PopupKind::Heal {
                        critical: *critical,
                    },
                }),
                BattleEvent::WillpowerSpent { caster, amount } => sink.show_popup(NumberPopup {
                    target: *caster,
                    value: -i64::from(*amount),
                    kind: PopupKind::Willpower,
                }),
                BattleEvent::WillpowerRestored { combatant, amount } => {
                    sink.show_popup(NumberPopup {
                        target: *combatant,
                        value: i64::from(*amount),
                        kind: PopupKind::Willpower,
                    })
                }
                BattleEvent::EmotionChanged {
                    combatant,
                    from,
                    to,
                } => {
                    if *from != Emotion::None {
                        sink.stop_looping(*combatant);
                    }
                    if *to != Emotion::None {
                        sink.play_looping(*to, *combatant);
                    }
                }
                BattleEvent::HealBlocked { .. }
                | BattleEvent::EffectApplied { .. }
                | BattleEvent::EffectExpired { .. }
                | BattleEvent::EmotionPointsGained { .. }
                | BattleEvent::Died { .. }
                | BattleEvent::TurnEnded { .. } => {}
            }
        }
    }

    fn check_finished(&mut self) -> Option<BattleResult> {
        if let Some(result) = &self.result {
            return Some(result.clone());
        }
        let winner = self.session.winner()?;
        Some(self.finish(BattleOutcome::Victory(winner), self.session.round()))
    }

    fn finish(&mut self, outcome: BattleOutcome, rounds: u32) -> BattleResult {
        let survivors = [Side::Ally, Side::Enemy]
            .into_iter()
            .flat_map(|side| self.session.living(side).map(|c| c.id))
            .collect();
        let result = BattleResult {
            outcome,
            rounds,
            turns: self.turns,
            survivors,
        };
        info!(target: "runtime::battle", ?outcome, rounds, turns = self.turns, "battle over");
        self.event_bus
            .publish(Event::Turn(TurnEvent::Ended(result.clone())));
        self.result = Some(result.clone());
        result
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    session: Option<BattleSession>,
    roster: Option<RosterSpec>,
    spells: Option<SpellTable>,
    providers: ProviderRegistry,
    presentation: Option<Arc<dyn PresentationSink>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session: None,
            roster: None,
            spells: None,
            providers: ProviderRegistry::new(),
            presentation: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already built session. Takes precedence over roster and spells.
    pub fn session(mut self, session: BattleSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Combatants for a new session (defaults to the embedded encounter)
    pub fn roster(mut self, roster: RosterSpec) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Spell catalog for a new session (defaults to the embedded catalog)
    pub fn spells(mut self, spells: SpellTable) -> Self {
        self.spells = Some(spells);
        self
    }

    /// Set the provider for allies
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.providers.register(ProviderKind::Player, provider);
        self
    }

    /// Set the provider for enemies
    pub fn enemy_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.providers.register(ProviderKind::Enemy, provider);
        self
    }

    /// Bind one combatant to its own provider, whatever its side.
    pub fn combatant_provider(
        mut self,
        combatant: CombatantId,
        provider: impl ActionProvider + 'static,
    ) -> Self {
        self.providers.bind(combatant, provider);
        self
    }

    /// Set the presentation sink (defaults to [`NullPresentation`])
    pub fn presentation(mut self, sink: impl PresentationSink + 'static) -> Self {
        self.presentation = Some(Arc::new(sink));
        self
    }

    /// Share a presentation sink the caller keeps a handle to.
    pub fn shared_presentation(mut self, sink: Arc<dyn PresentationSink>) -> Self {
        self.presentation = Some(sink);
        self
    }

    pub fn build(self) -> Result<BattleRuntime> {
        let session = match self.session {
            Some(session) => session,
            None => {
                let spells = match self.spells {
                    Some(spells) => spells,
                    None => SpellLoader::load_embedded()?,
                };
                let roster = match self.roster {
                    Some(roster) => roster,
                    None => RosterLoader::load_embedded()?,
                };
                BattleSession::new(&roster, spells, self.config.battle.clone())?
            }
        };

        info!(
            target: "runtime::battle",
            combatants = session.combatants().len(),
            seed = session.config().seed,
            "battle runtime initialized"
        );

        Ok(BattleRuntime {
            session,
            event_bus: EventBus::with_capacity(self.config.event_buffer_size),
            config: self.config,
            providers: self.providers,
            presentation: self
                .presentation
                .unwrap_or_else(|| Arc::new(NullPresentation)),
            turns: 0,
            result: None,
        })
    }
}
