//! Quest ledger: recorded outcomes, current weather, and aggregate reports.
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::quest::{QuestKind, QuestResult};

/// What the quest engine needs from the world ledger.
pub trait QuestLedger {
    fn save_result(&mut self, result: QuestResult);

    fn current_weather(&self) -> Weather;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Rainy,
    Stormy,
    Foggy,
}

impl Weather {
    pub const ALL: [Self; 4] = [Self::Clear, Self::Rainy, Self::Stormy, Self::Foggy];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Rainy => "Rainy",
            Self::Stormy => "Stormy",
            Self::Foggy => "Foggy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid weather condition: {0}")]
pub struct WeatherParseError(pub String);

impl FromStr for Weather {
    type Err = WeatherParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|weather| weather.key() == s)
            .ok_or_else(|| WeatherParseError(s.to_string()))
    }
}

/// Attempts and successes for one quest kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestKindTally {
    pub quest: QuestKind,
    pub attempts: usize,
    pub successes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_rewards: i64,
    pub by_kind: Vec<QuestKindTally>,
}

/// In-memory ledger of every quest attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    results: Vec<QuestResult>,
    /// Result indices per participant, leader and companions alike.
    by_character: BTreeMap<String, Vec<usize>>,
    weather: Weather,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    /// Set the weather from its name, leaving the ledger unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherParseError`] for names outside Clear/Rainy/Stormy/Foggy.
    pub fn set_weather_named(&mut self, name: &str) -> Result<(), WeatherParseError> {
        self.weather = name.parse()?;
        Ok(())
    }

    #[must_use]
    pub fn results(&self) -> &[QuestResult] {
        &self.results
    }

    #[must_use]
    pub fn quests_by_character(&self, name: &str) -> Vec<&QuestResult> {
        self.by_character
            .get(name)
            .map(|indices| indices.iter().map(|&i| &self.results[i]).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn quests_by_kind(&self, quest: QuestKind) -> Vec<&QuestResult> {
        self.results.iter().filter(|r| r.quest() == quest).collect()
    }

    #[must_use]
    pub fn successful_quests(&self) -> Vec<&QuestResult> {
        self.results.iter().filter(|r| r.success()).collect()
    }

    #[must_use]
    pub fn failed_quests(&self) -> Vec<&QuestResult> {
        self.results.iter().filter(|r| !r.success()).collect()
    }

    #[must_use]
    pub fn total_rewards(&self) -> i64 {
        self.results
            .iter()
            .filter(|r| r.success())
            .map(QuestResult::reward)
            .sum()
    }

    #[must_use]
    pub fn report(&self) -> QuestReport {
        let by_kind = QuestKind::ALL
            .into_iter()
            .map(|quest| {
                let of_kind = self.quests_by_kind(quest);
                QuestKindTally {
                    quest,
                    attempts: of_kind.len(),
                    successes: of_kind.iter().filter(|r| r.success()).count(),
                }
            })
            .collect();
        let successful = self.successful_quests().len();
        QuestReport {
            total: self.results.len(),
            successful,
            failed: self.results.len() - successful,
            total_rewards: self.total_rewards(),
            by_kind,
        }
    }
}

impl QuestLedger for Ledger {
    fn save_result(&mut self, result: QuestResult) {
        let index = self.results.len();
        let participants =
            std::iter::once(result.character()).chain(result.companions().iter().map(String::as_str));
        for name in participants {
            self.by_character
                .entry(name.to_string())
                .or_default()
                .push(index);
        }
        debug!(
            "recorded {} by {} (success: {})",
            result.quest(),
            result.character(),
            result.success()
        );
        self.results.push(result);
    }

    fn current_weather(&self) -> Weather {
        self.weather
    }
}
