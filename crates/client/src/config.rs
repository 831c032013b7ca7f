//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to assemble a battle and the terminal around it.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Roster RON file; the embedded encounter when unset.
    pub roster_path: Option<PathBuf>,
    /// Battle tuning TOML; the built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    /// Allies also play themselves with the scripted policy.
    pub auto: bool,
    pub max_rounds: Option<u32>,
    pub log_stderr: bool,
    /// JSON-lines log of every battle event.
    pub transcript_path: Option<PathBuf>,
    /// Pause after each visual effect, in milliseconds.
    pub effect_delay_ms: u64,
}

impl CliConfig {
    pub const DEFAULT_EFFECT_DELAY_MS: u64 = 250;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CHICAGO_ROSTER` - Path to a roster RON file
    /// - `CHICAGO_CONFIG` - Path to a battle tuning TOML file
    /// - `CHICAGO_SEED` - Battle seed (default: the tuning file's seed, else the clock)
    /// - `CHICAGO_AUTO` - Let the scripted policy play the allies too (default: false)
    /// - `CHICAGO_MAX_ROUNDS` - Declare a stalemate after this many rounds
    /// - `CHICAGO_LOG_STDERR` - Log to stderr instead of the session log file
    /// - `CHICAGO_TRANSCRIPT` - Write every battle event as JSON lines to this path
    /// - `CHICAGO_EFFECT_DELAY_MS` - Pause after each effect (default: 250)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.roster_path = lookup("CHICAGO_ROSTER").map(PathBuf::from);
        config.config_path = lookup("CHICAGO_CONFIG").map(PathBuf::from);
        config.transcript_path = lookup("CHICAGO_TRANSCRIPT").map(PathBuf::from);

        config.seed = parse(&lookup, "CHICAGO_SEED");
        config.max_rounds = parse::<u32>(&lookup, "CHICAGO_MAX_ROUNDS").map(|r| r.max(1));
        if let Some(delay) = parse(&lookup, "CHICAGO_EFFECT_DELAY_MS") {
            config.effect_delay_ms = delay;
        }

        config.auto = flag(&lookup, "CHICAGO_AUTO");
        config.log_stderr = flag(&lookup, "CHICAGO_LOG_STDERR");

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            config_path: None,
            seed: None,
            auto: false,
            max_rounds: None,
            log_stderr: false,
            transcript_path: None,
            effect_delay_ms: Self::DEFAULT_EFFECT_DELAY_MS,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Accepts `1`, `true`, `yes`, `on`, or a bare set variable as true.
fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    match lookup(key) {
        Some(value) => {
            let value = value.trim().to_ascii_lowercase();
            value.is_empty() || matches!(value.as_str(), "1" | "true" | "yes" | "on")
        }
        None => false,
    }
}
