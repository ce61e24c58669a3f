//! Middle-earth Quest Engine
//!
//! Platform-agnostic rules for resolving quests in Middle-earth.
//! [`QuestEngine`] validates and settles single attempts against injected
//! collaborators, and [`World`] drives them through a seeded day loop.
//! This crate has no I/O beyond parsing embedded JSON data.

pub mod constants;
pub mod data;
pub mod engine;
pub mod inventory;
pub mod item;
pub mod ledger;
pub mod numbers;
pub mod odds;
pub mod party;
pub mod quest;
pub mod rng;
pub mod roster;
pub mod world;

// Re-export commonly used types
pub use data::{CharacterSeed, DataError, ItemSeed, ScenarioData, WorldConfig};
pub use engine::{CarriedItem, QuestEngine, QuestError, QuestPlan, quest_reward};
pub use inventory::{
    Inventory, InventoryError, InventoryReader, InventoryWriter, ItemSort, SaleReceipt,
};
pub use item::{Item, ItemOrigin, ItemTags, Weekday, WeekdayParseError};
pub use ledger::{Ledger, QuestKindTally, QuestLedger, QuestReport, Weather, WeatherParseError};
pub use odds::{QuestContext, QuestOdds, quest_odds};
pub use party::{Party, PartyMember};
pub use quest::{ItemRequest, QuestKind, QuestResult, type_bonus};
pub use rng::{CountingRng, RngBundle};
pub use roster::{Character, CharacterDirectory, CharacterKind, Level, Roster, RosterError};
pub use world::{
    DayReport, Purchase, RingStatus, World, WorldEngine, WorldError, WorldSnapshot,
};
