use std::collections::HashMap;

use super::{EffectType, Spell};
use crate::emotion::Emotion;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while validating a spell catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpellTableError {
    #[error("spell catalog is empty")]
    Empty,

    #[error("spell with an empty name")]
    EmptyName,

    #[error("spell `{0}` is defined more than once")]
    DuplicateSpell(String),

    #[error("spell `{0}` is not a buff or debuff but carries a stat delta")]
    UnexpectedStatDelta(String),

    #[error("spell `{0}` has a negative stat magnitude")]
    NegativeStatDelta(String),

    #[error("timed spell `{0}` must last at least one turn")]
    ZeroDuration(String),

    #[error("emotion spell `{0}` does not name an emotion")]
    MissingEmotion(String),
}

impl GameError for SpellTableError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "spell_table_empty",
            Self::EmptyName => "spell_table_empty_name",
            Self::DuplicateSpell(_) => "spell_table_duplicate",
            Self::UnexpectedStatDelta(_) => "spell_table_unexpected_delta",
            Self::NegativeStatDelta(_) => "spell_table_negative_delta",
            Self::ZeroDuration(_) => "spell_table_zero_duration",
            Self::MissingEmotion(_) => "spell_table_missing_emotion",
        }
    }
}

/// Read-only registry of spells, validated at load time.
///
/// Lookup is case-insensitive; iteration follows catalog order.
#[derive(Clone, Debug)]
pub struct SpellTable {
    spells: Vec<Spell>,
    index: HashMap<String, usize>,
}

impl SpellTable {
    pub fn new(spells: Vec<Spell>) -> Result<Self, SpellTableError> {
        if spells.is_empty() {
            return Err(SpellTableError::Empty);
        }

        let mut index = HashMap::with_capacity(spells.len());
        for (position, spell) in spells.iter().enumerate() {
            validate(spell)?;
            if index.insert(key(&spell.name), position).is_some() {
                return Err(SpellTableError::DuplicateSpell(spell.name.clone()));
            }
        }

        Ok(Self { spells, index })
    }

    pub fn get(&self, name: &str) -> Option<&Spell> {
        self.index.get(&key(name)).map(|&i| &self.spells[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.iter()
    }

    pub fn of_type(&self, effect: EffectType) -> impl Iterator<Item = &Spell> {
        self.spells.iter().filter(move |s| s.effect_type == effect)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

fn key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn validate(spell: &Spell) -> Result<(), SpellTableError> {
    if spell.name.trim().is_empty() {
        return Err(SpellTableError::EmptyName);
    }
    if spell.effect_type.is_timed() {
        if spell.turn_count == 0 {
            return Err(SpellTableError::ZeroDuration(spell.name.clone()));
        }
        if spell.stat_delta.0.iter().any(|v| *v < 0) {
            return Err(SpellTableError::NegativeStatDelta(spell.name.clone()));
        }
    } else if !spell.stat_delta.is_zero() {
        return Err(SpellTableError::UnexpectedStatDelta(spell.name.clone()));
    }
    if spell.effect_type == EffectType::Emotion && spell.emotion == Emotion::None {
        return Err(SpellTableError::MissingEmotion(spell.name.clone()));
    }
    Ok(())
}
