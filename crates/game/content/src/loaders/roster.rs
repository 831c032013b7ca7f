//! Encounter roster loader.

use std::path::Path;

use anyhow::Context;
use game_core::{RosterSpec, SpellTable};

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// The default encounter shipped with the game.
    pub fn load_embedded() -> LoadResult<RosterSpec> {
        Self::parse(include_str!("../../data/roster.ron")).context("embedded roster")
    }

    /// Load a roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<RosterSpec> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("roster {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<RosterSpec> {
        let roster: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Ok(roster)
    }

    /// Checks that every spell a combatant knows exists in `spells`.
    ///
    /// The battle session runs the same check; this one reports every
    /// problem at once instead of stopping at the first.
    pub fn check_spells(roster: &RosterSpec, spells: &SpellTable) -> LoadResult<()> {
        let missing: Vec<String> = roster
            .allies
            .iter()
            .chain(&roster.enemies)
            .flat_map(move |spec| {
                spec.spells
                    .iter()
                    .filter(move |name| !spells.contains(name))
                    .map(move |name| format!("{}: {}", spec.name, name))
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("roster references unknown spells: {}", missing.join(", "))
        }
    }
}
