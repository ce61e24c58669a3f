//! Character directory: kinds, levels, availability and quest bookkeeping.
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::constants::DEFAULT_PROMOTION_CHANCE;

/// Lookups and bookkeeping the quest engine needs from a character directory.
pub trait CharacterDirectory {
    fn is_available(&self, name: &str) -> bool;

    /// # Errors
    ///
    /// Returns [`RosterError::UnknownCharacter`] for names not in the directory.
    fn kind(&self, name: &str) -> Result<CharacterKind, RosterError>;

    /// # Errors
    ///
    /// Returns [`RosterError::UnknownCharacter`] for names not in the directory.
    fn level(&self, name: &str) -> Result<Level, RosterError>;

    /// Record a quest outcome for one participant.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::UnknownCharacter`] for names not in the directory.
    fn complete_quest(&mut self, name: &str, success: bool) -> Result<(), RosterError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("character not found: {0}")]
    UnknownCharacter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Elf,
    Dwarf,
    Human,
    Hobbit,
    Wizard,
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Elf => "Elf",
            Self::Dwarf => "Dwarf",
            Self::Human => "Human",
            Self::Hobbit => "Hobbit",
            Self::Wizard => "Wizard",
        };
        f.write_str(label)
    }
}

/// Experience level, ordered from least to most seasoned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Level {
    #[default]
    Novice,
    Experienced,
    Veteran,
    Legendary,
}

impl Level {
    /// Next level up; Legendary is the ceiling.
    #[must_use]
    pub const fn promoted(self) -> Self {
        match self {
            Self::Novice => Self::Experienced,
            Self::Experienced => Self::Veteran,
            Self::Veteran | Self::Legendary => Self::Legendary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub kind: CharacterKind,
    pub level: Level,
    pub available: bool,
    pub successful_quests: u32,
    pub failed_quests: u32,
}

impl Character {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CharacterKind, level: Level) -> Self {
        Self {
            name: name.into(),
            kind,
            level,
            available: true,
            successful_quests: 0,
            failed_quests: 0,
        }
    }
}

/// In-memory character directory.
///
/// Successful quests promote a participant with a fixed probability drawn
/// from the roster's own seeded stream.
#[derive(Debug, Clone)]
pub struct Roster {
    characters: BTreeMap<String, Character>,
    promotion_chance: f64,
    rng: ChaCha20Rng,
}

impl Default for Roster {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Roster {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            characters: BTreeMap::new(),
            promotion_chance: DEFAULT_PROMOTION_CHANCE,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Override the promotion probability, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_promotion_chance(mut self, chance: f64) -> Self {
        self.promotion_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Insert or replace a character; new entries start available.
    pub fn add_character(&mut self, name: &str, kind: CharacterKind, level: Level) {
        self.characters
            .insert(name.to_string(), Character::new(name, kind, level));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.get(name)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Character, RosterError> {
        self.characters
            .get_mut(name)
            .ok_or_else(|| RosterError::UnknownCharacter(name.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`RosterError::UnknownCharacter`] for names not in the roster.
    pub fn set_availability(&mut self, name: &str, available: bool) -> Result<(), RosterError> {
        self.get_mut(name)?.available = available;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`RosterError::UnknownCharacter`] for names not in the roster.
    pub fn promote(&mut self, name: &str) -> Result<Level, RosterError> {
        let character = self.get_mut(name)?;
        character.level = character.level.promoted();
        Ok(character.level)
    }
}

impl CharacterDirectory for Roster {
    fn is_available(&self, name: &str) -> bool {
        self.characters.get(name).is_some_and(|c| c.available)
    }

    fn kind(&self, name: &str) -> Result<CharacterKind, RosterError> {
        self.characters
            .get(name)
            .map(|c| c.kind)
            .ok_or_else(|| RosterError::UnknownCharacter(name.to_string()))
    }

    fn level(&self, name: &str) -> Result<Level, RosterError> {
        self.characters
            .get(name)
            .map(|c| c.level)
            .ok_or_else(|| RosterError::UnknownCharacter(name.to_string()))
    }

    fn complete_quest(&mut self, name: &str, success: bool) -> Result<(), RosterError> {
        let promote = success && self.rng.r#gen::<f64>() < self.promotion_chance;
        let character = self.get_mut(name)?;
        if promote {
            character.level = character.level.promoted();
            info!("{} promoted to {:?}", character.name, character.level);
        }
        if success {
            character.successful_quests = character.successful_quests.saturating_add(1);
        } else {
            character.failed_quests = character.failed_quests.saturating_add(1);
        }
        Ok(())
    }
}
