//! Quest kinds, results, and the fixed bonus and reward tables.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    REWARD_DEFEAT_ORCS, REWARD_DESTROY_RING, REWARD_DIPLOMATIC_MISSION, REWARD_ESCORT_HOBBIT,
    REWARD_FIND_ARTIFACT,
};
use crate::roster::CharacterKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestKind {
    DestroyRing,
    DefeatOrcs,
    EscortHobbit,
    FindArtifact,
    DiplomaticMission,
}

impl QuestKind {
    pub const ALL: [Self; 5] = [
        Self::DestroyRing,
        Self::DefeatOrcs,
        Self::EscortHobbit,
        Self::FindArtifact,
        Self::DiplomaticMission,
    ];

    /// Reward paid out for a successful quest before bonuses and sharing.
    #[must_use]
    pub const fn base_reward(self) -> i64 {
        match self {
            Self::DestroyRing => REWARD_DESTROY_RING,
            Self::DefeatOrcs => REWARD_DEFEAT_ORCS,
            Self::EscortHobbit => REWARD_ESCORT_HOBBIT,
            Self::FindArtifact => REWARD_FIND_ARTIFACT,
            Self::DiplomaticMission => REWARD_DIPLOMATIC_MISSION,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DestroyRing => "DestroyRing",
            Self::DefeatOrcs => "DefeatOrcs",
            Self::EscortHobbit => "EscortHobbit",
            Self::FindArtifact => "FindArtifact",
            Self::DiplomaticMission => "DiplomaticMission",
        }
    }
}

impl fmt::Display for QuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Leader-kind multiplier for a quest, applied to both odds and reward.
#[must_use]
pub const fn type_bonus(kind: CharacterKind, quest: QuestKind) -> f64 {
    use CharacterKind::{Dwarf, Elf, Hobbit, Human, Wizard};
    use QuestKind::{DefeatOrcs, DestroyRing, DiplomaticMission, EscortHobbit, FindArtifact};
    match (kind, quest) {
        (Elf, DestroyRing) => 1.1,
        (Elf, DefeatOrcs) => 1.2,
        (Elf, EscortHobbit) => 1.3,
        (Elf, FindArtifact) => 1.5,
        (Elf, DiplomaticMission) => 1.4,
        (Dwarf, DefeatOrcs) => 1.4,
        (Dwarf, FindArtifact) => 1.6,
        (Dwarf, DiplomaticMission) => 0.8,
        (Human, DefeatOrcs) => 1.3,
        (Human, EscortHobbit) => 1.2,
        (Human, FindArtifact) => 1.1,
        (Human, DiplomaticMission) => 1.5,
        (Hobbit, DestroyRing) => 1.5,
        (Hobbit, DefeatOrcs) => 0.7,
        (Hobbit, DiplomaticMission) => 1.1,
        (Wizard, DestroyRing | EscortHobbit) => 1.3,
        (Wizard, DefeatOrcs) => 1.4,
        (Wizard, FindArtifact) => 1.6,
        (Wizard, DiplomaticMission) => 1.7,
        (Dwarf, DestroyRing | EscortHobbit)
        | (Human, DestroyRing)
        | (Hobbit, EscortHobbit | FindArtifact) => 1.0,
    }
}

/// An inventory item the leader wants to carry, by name and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub quantity: u32,
}

impl ItemRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Outcome of a single quest attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestResult {
    character: String,
    quest: QuestKind,
    success: bool,
    reward: i64,
    companions: Vec<String>,
}

impl QuestResult {
    #[must_use]
    pub fn new(
        character: impl Into<String>,
        quest: QuestKind,
        success: bool,
        reward: i64,
        companions: Vec<String>,
    ) -> Self {
        Self {
            character: character.into(),
            quest,
            success,
            reward: if success { reward } else { 0 },
            companions,
        }
    }

    #[must_use]
    pub fn character(&self) -> &str {
        &self.character
    }

    #[must_use]
    pub const fn quest(&self) -> QuestKind {
        self.quest
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn reward(&self) -> i64 {
        self.reward
    }

    #[must_use]
    pub fn companions(&self) -> &[String] {
        &self.companions
    }
}
