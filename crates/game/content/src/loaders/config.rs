//! Battle tuning loader.

use std::path::Path;

use game_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Tuning read from a file, with the seed the file pinned, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub config: BattleConfig,
    /// `Some` only when the file has a `seed` key; `config.seed` holds the
    /// default otherwise.
    pub seed: Option<u64>,
}

#[derive(serde::Deserialize)]
struct SeedKey {
    seed: Option<u64>,
}

/// Loader for battle tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BattleConfig
    ///
    /// # Returns
    ///
    /// Returns a BattleConfig. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Like [`ConfigLoader::load`], but also reports whether the file set the seed.
    pub fn load_tuning(path: &Path) -> LoadResult<Tuning> {
        let content = read_file(path)?;
        Self::parse_tuning(&content)
    }

    /// Load the tuning file shipped with the game.
    pub fn load_embedded() -> LoadResult<BattleConfig> {
        Self::parse(include_str!("../../data/battle.toml"))
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.policy_spell_below < config.policy_attack_below {
            anyhow::bail!(
                "policy_spell_below ({}) must not be below policy_attack_below ({})",
                config.policy_spell_below,
                config.policy_attack_below
            );
        }

        Ok(config)
    }

    pub fn parse_tuning(content: &str) -> LoadResult<Tuning> {
        let config = Self::parse(content)?;
        let SeedKey { seed } = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(Tuning { config, seed })
    }
}
