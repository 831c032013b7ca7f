//! Typed-command input for allied turns.
//!
//! This module owns the text-to-action mapping so the rest of the client can
//! stay agnostic of command syntax. Targets are the numbers printed in the
//! status table, or combatant names.

use async_trait::async_trait;
use crossterm::style::Stylize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use game_core::{ActionError, BattleAction, BattleSession, CombatantId};
use runtime::{ActionProvider, RuntimeError};

use crate::presentation::{combatant_name, spell_menu, status_lines};

pub const HELP: &str = "\
commands:
  attack <target>                 physical attack
  cast <spell> [on <t1,t2,...>]   cast a known spell; targets default sensibly
  rest                            recover willpower and calm down
  status                          show the battlefield
  help                            show this help
  quit                            abandon the battle
targets are numbers from the status table or names";

/// High-level outcome of parsing one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the decoded action to the runtime.
    Act(BattleAction),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type a command, or `help`")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("{0} needs a target")]
    MissingTarget(&'static str),

    #[error("no combatant `{0}`")]
    UnknownTarget(String),

    #[error("cast what?")]
    MissingSpell,
}

/// Parses one line typed on `actor`'s turn.
pub fn parse_command(
    line: &str,
    session: &BattleSession,
    actor: CombatantId,
) -> Result<Command, ParseError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        "a" | "attack" => {
            if rest.is_empty() {
                return Err(ParseError::MissingTarget("attack"));
            }
            Ok(Command::Act(BattleAction::attack(resolve_target(session, rest)?)))
        }
        "c" | "cast" => parse_cast(rest, session, actor).map(Command::Act),
        "r" | "rest" => Ok(Command::Act(BattleAction::Rest)),
        "s" | "status" => Ok(Command::Status),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_cast(
    rest: &str,
    session: &BattleSession,
    actor: CombatantId,
) -> Result<BattleAction, ParseError> {
    let (spell, targets) = match rest.rsplit_once(" on ") {
        Some((spell, targets)) => (spell.trim(), Some(targets.trim())),
        None => (rest, None),
    };
    if spell.is_empty() {
        return Err(ParseError::MissingSpell);
    }
    let spell = canonical_spell(session, actor, spell);

    let targets = match targets {
        Some(list) if !list.is_empty() => list
            .split(',')
            .map(|t| resolve_target(session, t.trim()))
            .collect::<Result<Vec<_>, _>>()?,
        _ => default_targets(session, actor, &spell),
    };
    Ok(BattleAction::cast(spell, targets))
}

/// The spell's catalog name when the actor knows it under any casing.
/// Unknown names pass through so the battle can refuse them.
fn canonical_spell(session: &BattleSession, actor: CombatantId, typed: &str) -> String {
    session
        .combatant(actor)
        .and_then(|me| {
            me.known_spells
                .iter()
                .find(|known| known.eq_ignore_ascii_case(typed))
        })
        .cloned()
        .unwrap_or_else(|| typed.to_string())
}

/// Supportive spells land on the caster (or the whole party); hostile
/// multi-target spells hit every living opponent. Hostile single-target
/// spells need an explicit target, so none is guessed.
fn default_targets(session: &BattleSession, actor: CombatantId, spell: &str) -> Vec<CombatantId> {
    let (Some(me), Some(spell)) = (session.combatant(actor), session.spells().get(spell)) else {
        return Vec::new();
    };
    match (spell.effect_type.is_supportive(), spell.is_multi_target()) {
        (true, false) => vec![actor],
        (true, true) => session.living(me.side).map(|c| c.id).collect(),
        (false, true) => session.living(me.side.opponent()).map(|c| c.id).collect(),
        (false, false) => Vec::new(),
    }
}

fn resolve_target(session: &BattleSession, token: &str) -> Result<CombatantId, ParseError> {
    if let Ok(number) = token.parse::<u32>() {
        return number
            .checked_sub(1)
            .map(CombatantId)
            .filter(|id| session.combatant(*id).is_some())
            .ok_or_else(|| ParseError::UnknownTarget(token.to_string()));
    }
    session
        .find(token)
        .map(|c| c.id)
        .ok_or_else(|| ParseError::UnknownTarget(token.to_string()))
}

/// Action provider that reads allied decisions from a line-based reader.
pub struct TerminalActionProvider<R> {
    /// Input lines (wrapped in Mutex for interior mutability)
    lines: Mutex<Lines<R>>,
}

impl TerminalActionProvider<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> TerminalActionProvider<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }
}

fn print_status(session: &BattleSession) {
    println!();
    for line in status_lines(session) {
        println!("{line}");
    }
}

#[async_trait]
impl<R> ActionProvider for TerminalActionProvider<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn provide_action(
        &self,
        actor: CombatantId,
        session: &BattleSession,
    ) -> runtime::Result<BattleAction> {
        let mut lines = self.lines.lock().await;

        print_status(session);
        let menu = spell_menu(session, actor);
        if !menu.is_empty() {
            println!("Spells");
            for line in menu {
                println!("{line}");
            }
        }

        loop {
            println!("{}", format!("{}'s move:", combatant_name(session, actor)).bold());
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Err(RuntimeError::ActionProviderChannelClosed),
                Err(e) => {
                    tracing::warn!("Failed to read input: {}", e);
                    return Err(RuntimeError::ActionProviderChannelClosed);
                }
            };

            match parse_command(&line, session, actor) {
                Ok(Command::Act(action)) => {
                    tracing::debug!(target: "client::input", %actor, %action, "player chose");
                    return Ok(action);
                }
                Ok(Command::Status) => print_status(session),
                Ok(Command::Help) => println!("{HELP}"),
                Ok(Command::Quit) => {
                    tracing::info!("Player abandoned the battle");
                    return Err(RuntimeError::ActionProviderChannelClosed);
                }
                Err(e) => println!("{}", e.to_string().yellow()),
            }
        }
    }

    fn on_rejected(&self, _actor: CombatantId, error: &ActionError) {
        println!("{}", format!("Can't do that: {error}").red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        BattleConfig, CombatantSpec, CoreStats, EffectType, Emotion, RosterSpec, Spell,
        SpellTable, StatDelta, TargetCardinality,
    };

    fn spell(name: &str, effect_type: EffectType, target: TargetCardinality) -> Spell {
        Spell {
            name: name.to_string(),
            effect_type,
            target,
            emotion: Emotion::Anger,
            description: String::new(),
            base_amount: 3,
            turn_count: 1,
            cost: 2,
            emotion_points: 10,
            stat_delta: StatDelta::ZERO,
        }
    }

    fn unit(name: &str, spells: &[&str]) -> CombatantSpec {
        CombatantSpec {
            name: name.to_string(),
            max_health: 20,
            max_willpower: 10,
            regen_willpower: 0,
            stats: CoreStats::default(),
            weakness: None,
            spells: spells.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Vance (#1) and Mae (#2) against Vinnie (#3) and Sal (#4).
    fn session() -> BattleSession {
        let spells = SpellTable::new(vec![
            spell("Fire", EffectType::Fire, TargetCardinality::Single),
            spell("Fireball", EffectType::Fire, TargetCardinality::Multiple),
            spell("Heal", EffectType::Heal, TargetCardinality::Single),
            spell("Strong Heal", EffectType::Heal, TargetCardinality::Multiple),
        ])
        .unwrap();
        let roster = RosterSpec {
            allies: vec![
                unit("Vance", &["Fire", "Fireball", "Heal", "Strong Heal"]),
                unit("Mae", &[]),
            ],
            enemies: vec![unit("Vinnie", &[]), unit("Sal Moretti", &[])],
        };
        BattleSession::new(&roster, spells, BattleConfig::default()).unwrap()
    }

    const VANCE: CombatantId = CombatantId(0);

    fn act(line: &str) -> BattleAction {
        match parse_command(line, &session(), VANCE) {
            Ok(Command::Act(action)) => action,
            other => panic!("`{line}` parsed as {other:?}"),
        }
    }

    #[test]
    fn attacks_take_numbers_or_names() {
        assert_eq!(act("attack 3"), BattleAction::attack(CombatantId(2)));
        assert_eq!(act("a sal moretti"), BattleAction::attack(CombatantId(3)));
    }

    #[test]
    fn spell_names_may_contain_spaces_and_any_casing() {
        assert_eq!(
            act("cast strong heal on 1, 2"),
            BattleAction::cast("Strong Heal", [CombatantId(0), CombatantId(1)])
        );
        assert_eq!(act("cast FIRE on vinnie"), BattleAction::cast("Fire", [CombatantId(2)]));
    }

    #[test]
    fn omitted_targets_follow_the_spell() {
        assert_eq!(act("cast heal"), BattleAction::cast("Heal", [VANCE]));
        assert_eq!(
            act("cast fireball"),
            BattleAction::cast("Fireball", [CombatantId(2), CombatantId(3)])
        );
        assert_eq!(act("cast fire"), BattleAction::cast("Fire", Vec::<CombatantId>::new()));
    }

    #[test]
    fn unknown_spells_pass_through_for_the_battle_to_refuse() {
        assert_eq!(act("cast Hex on 3"), BattleAction::cast("Hex", [CombatantId(2)]));
    }

    #[test]
    fn bad_input_is_explained() {
        let session = session();
        let parse = |line| parse_command(line, &session, VANCE);

        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("attack"), Err(ParseError::MissingTarget("attack")));
        assert_eq!(parse("attack 9"), Err(ParseError::UnknownTarget("9".into())));
        assert_eq!(parse("attack 0"), Err(ParseError::UnknownTarget("0".into())));
        assert_eq!(parse("dance"), Err(ParseError::UnknownCommand("dance".into())));
        assert_eq!(parse("cast"), Err(ParseError::MissingSpell));
        assert_eq!(parse("rest"), Ok(Command::Act(BattleAction::Rest)));
        assert_eq!(parse("Q"), Ok(Command::Quit));
    }

    #[tokio::test]
    async fn provider_skips_chatter_until_an_action() {
        let mut session = session();
        session.begin_turn().unwrap();
        let input: &[u8] = b"help\nflee\nattack 4\n";
        let provider = TerminalActionProvider::new(input);

        let action = provider.provide_action(VANCE, &session).await.unwrap();
        assert_eq!(action, BattleAction::attack(CombatantId(3)));

        let err = provider.provide_action(VANCE, &session).await.unwrap_err();
        assert!(matches!(err, RuntimeError::ActionProviderChannelClosed));
    }
}
