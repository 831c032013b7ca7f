//! Terminal client assembling content, runtime, and terminal I/O.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ game-content (spell catalog, roster, tuning)
//!   ├─→ BattleRuntime (turn loop, providers, event bus)
//!   │     ├─→ allies:  TerminalActionProvider (stdin) or the scripted policy
//!   │     ├─→ enemies: ScriptedPolicyProvider
//!   │     └─→ TerminalPresentation (styled stdout)
//!   └─→ Transcript (optional JSON-lines event log)
//! ```

pub mod config;
pub mod input;
pub mod logging;
pub mod presentation;
pub mod transcript;

pub use config::CliConfig;
pub use input::TerminalActionProvider;
pub use presentation::TerminalPresentation;
pub use transcript::Transcript;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::style::Stylize;
use game_content::{ConfigLoader, RosterLoader, SpellLoader};
use game_core::{BattleConfig, BattleSession, Side};
use runtime::{
    ActionProvider, BattleOutcome, BattleResult, BattleRuntime, RuntimeConfig, RuntimeError,
    ScriptedPolicyProvider,
};

/// Policy stream for allies in auto mode, apart from the enemies' stream.
pub const ALLY_POLICY_STREAM: u32 = 2;

/// Top-level client container.
pub struct Client {
    config: CliConfig,
    runtime: BattleRuntime,
}

impl Client {
    /// Builds the battle described by `config`, with allies read from stdin
    /// unless auto mode is on.
    pub fn new(config: CliConfig) -> Result<Self> {
        let battle = battle_config(&config)?;
        if config.auto {
            let allies = ScriptedPolicyProvider::with_stream(battle.seed, ALLY_POLICY_STREAM);
            Self::assemble(config, battle, allies)
        } else {
            Self::assemble(config, battle, TerminalActionProvider::stdin())
        }
    }

    /// Builds the battle with a caller-supplied decision source for allies.
    pub fn with_player(config: CliConfig, allies: impl ActionProvider + 'static) -> Result<Self> {
        let battle = battle_config(&config)?;
        Self::assemble(config, battle, allies)
    }

    fn assemble(
        config: CliConfig,
        battle: BattleConfig,
        allies: impl ActionProvider + 'static,
    ) -> Result<Self> {
        let session = load_session(&config, battle.clone())?;
        let presentation =
            TerminalPresentation::new(&session, Duration::from_millis(config.effect_delay_ms));

        let mut runtime_config = RuntimeConfig::default().with_battle(battle.clone());
        if let Some(max_rounds) = config.max_rounds {
            runtime_config = runtime_config.with_max_rounds(max_rounds);
        }

        let runtime = BattleRuntime::builder()
            .config(runtime_config)
            .session(session)
            .player_provider(allies)
            .enemy_provider(ScriptedPolicyProvider::new(battle.seed))
            .presentation(presentation)
            .build()?;

        Ok(Self { config, runtime })
    }

    pub fn runtime(&self) -> &BattleRuntime {
        &self.runtime
    }

    /// Plays the battle to the end. Returns `None` when the player quit.
    pub async fn run(self) -> Result<Option<BattleResult>> {
        let Self {
            config,
            mut runtime,
        } = self;

        let transcript = match &config.transcript_path {
            Some(path) => Some(Transcript::start(&runtime.event_bus(), path).await?),
            None => None,
        };

        let seed = runtime.session().config().seed;
        println!("{}", "Murder in Chicago".bold());
        println!("{}", format!("battle seed {seed} (type `help` for commands)").dark_grey());
        tracing::info!("Battle started: seed={}", seed);

        let result = match runtime.run().await {
            Ok(result) => {
                print_result(runtime.session(), &result);
                Some(result)
            }
            Err(RuntimeError::ActionProviderChannelClosed) => {
                println!("{}", "Battle abandoned.".dark_grey());
                None
            }
            Err(e) => return Err(e.into()),
        };

        // Dropping the runtime closes the event bus, so an unfinished
        // transcript stops too.
        drop(runtime);
        if let Some(task) = transcript {
            task.await??;
        }

        Ok(result)
    }
}

/// Tuning from `CHICAGO_CONFIG` (or defaults) with the seed resolved:
/// `CHICAGO_SEED`, else the tuning file's seed, else the clock.
pub fn battle_config(config: &CliConfig) -> Result<BattleConfig> {
    battle_config_with_clock(config, clock_seed)
}

fn battle_config_with_clock(config: &CliConfig, clock: impl FnOnce() -> u64) -> Result<BattleConfig> {
    let (battle, file_seed) = match &config.config_path {
        Some(path) => {
            let tuning = ConfigLoader::load_tuning(path)?;
            (tuning.config, tuning.seed)
        }
        None => (BattleConfig::default(), None),
    };
    let seed = config.seed.or(file_seed).unwrap_or_else(clock);
    Ok(battle.with_seed(seed))
}

/// The embedded spell catalog plus the configured (or embedded) roster.
pub fn load_session(config: &CliConfig, battle: BattleConfig) -> Result<BattleSession> {
    let spells = SpellLoader::load_embedded()?;
    let roster = match &config.roster_path {
        Some(path) => RosterLoader::load(path)?,
        None => RosterLoader::load_embedded()?,
    };
    RosterLoader::check_spells(&roster, &spells)?;
    Ok(BattleSession::new(&roster, spells, battle)?)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn print_result(session: &BattleSession, result: &BattleResult) {
    let headline = match result.outcome {
        BattleOutcome::Victory(Side::Ally) => "The detective's party prevails.".green().bold(),
        BattleOutcome::Victory(Side::Enemy) => "The crew wins. The case goes cold.".red().bold(),
        BattleOutcome::Stalemate => "Nobody falls. The standoff ends.".yellow().bold(),
    };
    println!();
    println!("{headline}");

    let survivors: Vec<String> = result
        .survivors
        .iter()
        .map(|id| presentation::combatant_name(session, *id))
        .collect();
    println!(
        "{} rounds, {} turns. Standing: {}",
        result.rounds,
        result.turns,
        survivors.join(", ")
    );
}
