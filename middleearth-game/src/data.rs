//! Scenario and world configuration loaded from JSON.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_PROMOTION_CHANCE;
use crate::inventory::Inventory;
use crate::item::{Item, ItemOrigin, ItemTags};
use crate::ledger::Weather;
use crate::roster::{CharacterKind, Level, Roster};

const DEFAULT_SCENARIO: &str = include_str!("../data/scenario.json");
const DEFAULT_WORLD: &str = include_str!("../data/world.json");

/// Errors raised while loading scenario or world configuration.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("starting gold must not be negative (got {0})")]
    NegativeGold(i64),
    #[error("weather pool is empty")]
    EmptyWeatherPool,
    #[error("character {0} is listed more than once")]
    DuplicateCharacter(String),
}

/// A starting character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSeed {
    pub name: String,
    pub kind: CharacterKind,
    #[serde(default)]
    pub level: Level,
}

/// A starting inventory stack. Without explicit tags they are inferred
/// from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSeed {
    pub name: String,
    pub quantity: u32,
    pub quality: i32,
    pub origin: ItemOrigin,
    #[serde(default)]
    pub tags: Option<ItemTags>,
}

impl ItemSeed {
    #[must_use]
    pub fn to_item(&self) -> Item {
        match self.tags {
            Some(tags) => Item::new(
                self.name.clone(),
                self.quantity,
                self.quality,
                self.origin,
                tags,
            ),
            None => Item::seeded(&self.name, self.quantity, self.quality, self.origin),
        }
    }
}

/// Starting characters and items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScenarioData {
    #[serde(default)]
    pub characters: Vec<CharacterSeed>,
    #[serde(default)]
    pub items: Vec<ItemSeed>,
}

impl ScenarioData {
    /// Create an empty scenario (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a scenario from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a character is listed twice.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// # Errors
    ///
    /// Returns [`DataError::DuplicateCharacter`] for repeated names.
    pub fn validate(&self) -> Result<(), DataError> {
        for (index, seed) in self.characters.iter().enumerate() {
            if self.characters[..index].iter().any(|c| c.name == seed.name) {
                return Err(DataError::DuplicateCharacter(seed.name.clone()));
            }
        }
        Ok(())
    }

    /// The embedded starting fellowship and item set.
    #[must_use]
    pub fn default_scenario() -> Self {
        Self::from_json(DEFAULT_SCENARIO).unwrap_or_default()
    }

    #[must_use]
    pub fn character_names(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.name.clone()).collect()
    }

    /// Build a roster seeded with `seed`, drawing promotions at `promotion_chance`.
    #[must_use]
    pub fn build_roster(&self, seed: u64, promotion_chance: f64) -> Roster {
        let mut roster = Roster::with_seed(seed).with_promotion_chance(promotion_chance);
        for character in &self.characters {
            roster.add_character(&character.name, character.kind, character.level);
        }
        roster
    }

    #[must_use]
    pub fn build_inventory(&self) -> Inventory {
        let mut inventory = Inventory::new();
        for seed in &self.items {
            inventory.add(seed.to_item());
        }
        inventory
    }
}

/// Tunables for the day loop and the economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "WorldConfig::default_starting_gold")]
    pub starting_gold: i64,
    /// Daily probability that war breaks out or peace returns.
    #[serde(default = "WorldConfig::default_war_toggle_chance")]
    pub war_toggle_chance: f64,
    #[serde(default = "WorldConfig::default_weather_pool")]
    pub weather_pool: Vec<Weather>,
    #[serde(default = "WorldConfig::default_promotion_chance")]
    pub promotion_chance: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            starting_gold: Self::default_starting_gold(),
            war_toggle_chance: Self::default_war_toggle_chance(),
            weather_pool: Self::default_weather_pool(),
            promotion_chance: Self::default_promotion_chance(),
        }
    }
}

impl WorldConfig {
    const fn default_starting_gold() -> i64 {
        100
    }

    const fn default_war_toggle_chance() -> f64 {
        0.1
    }

    fn default_weather_pool() -> Vec<Weather> {
        Weather::ALL.to_vec()
    }

    const fn default_promotion_chance() -> f64 {
        DEFAULT_PROMOTION_CHANCE
    }

    /// Load world configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or if validation fails.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns a [`DataError`] when any field is out of bounds.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.starting_gold < 0 {
            return Err(DataError::NegativeGold(self.starting_gold));
        }
        check_probability("war_toggle_chance", self.war_toggle_chance)?;
        check_probability("promotion_chance", self.promotion_chance)?;
        if self.weather_pool.is_empty() {
            return Err(DataError::EmptyWeatherPool);
        }
        Ok(())
    }

    /// Get embedded default configuration
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(DEFAULT_WORLD).unwrap_or_default()
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), DataError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DataError::RangeViolation {
            field,
            min: 0.0,
            max: 1.0,
            value,
        })
    }
}
