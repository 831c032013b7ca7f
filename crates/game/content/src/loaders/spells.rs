//! Spell catalog loader.

use std::path::Path;

use anyhow::Context;
use game_core::{Spell, SpellTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<Spell>,
}

/// Loader for the spell catalog from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load the catalog shipped with the game.
    pub fn load_embedded() -> LoadResult<SpellTable> {
        let content = include_str!("../../data/spells.ron");
        Self::parse(content).context("embedded spell catalog")
    }

    /// Load a spell catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a SpellCatalog
    ///
    /// # Returns
    ///
    /// Returns a validated SpellTable.
    pub fn load(path: &Path) -> LoadResult<SpellTable> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("spell catalog {}", path.display()))
    }

    /// Parse catalog text and validate it.
    pub fn parse(content: &str) -> LoadResult<SpellTable> {
        let catalog: SpellCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;
        let table = SpellTable::new(catalog.spells)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EffectType, Emotion, Stat, TargetCardinality};

    #[test]
    fn embedded_catalog_has_every_spell() {
        let table = SpellLoader::load_embedded().unwrap();
        assert_eq!(table.len(), 34);

        let count = |effect| table.of_type(effect).count();
        assert_eq!(count(EffectType::Fire), 3);
        assert_eq!(count(EffectType::Ice), 3);
        assert_eq!(count(EffectType::Curse), 3);
        assert_eq!(count(EffectType::Poison), 3);
        assert_eq!(count(EffectType::Heal), 3);
        assert_eq!(count(EffectType::Buff), 7);
        assert_eq!(count(EffectType::Debuff), 7);
        assert_eq!(count(EffectType::Emotion), 5);
    }

    #[test]
    fn embedded_rows_match_the_catalog() {
        let table = SpellLoader::load_embedded().unwrap();

        let soulfire = table.get("soulfire").unwrap();
        assert_eq!(soulfire.target, TargetCardinality::Multiple);
        assert_eq!(soulfire.emotion, Emotion::Anger);
        assert_eq!(
            (soulfire.base_amount, soulfire.cost, soulfire.emotion_points),
            (2, 5, 20)
        );

        let supreme = table.get("Supreme Being").unwrap();
        assert_eq!(supreme.turn_count, 3);
        assert_eq!(supreme.stat_delta.get(Stat::Vitality), 0);
        for stat in [Stat::Strength, Stat::Resolve, Stat::Fortitude, Stat::Fortune] {
            assert_eq!(supreme.stat_delta.get(stat), 2);
        }

        let despair = table.get("Despair").unwrap();
        assert_eq!(despair.emotion, Emotion::Fear);
        assert_eq!((despair.cost, despair.emotion_points), (1, 50));
        assert!(!despair.description.is_empty());
    }

    #[test]
    fn invalid_catalogs_are_rejected() {
        let duplicate = r#"(spells: [
            (name: "Fire", effect_type: Fire, target: Single, emotion: Anger, base_amount: 3, turn_count: 1, cost: 4, emotion_points: 15),
            (name: "fire", effect_type: Fire, target: Single, emotion: Anger, base_amount: 3, turn_count: 1, cost: 4, emotion_points: 15),
        ])"#;
        let err = SpellLoader::parse(duplicate).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");

        assert!(SpellLoader::parse("(spells: [(name: \"Fire\")])").is_err());
    }
}
