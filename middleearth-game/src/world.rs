//! The day loop around the quest engine, with purses for every character.
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::data::{ScenarioData, WorldConfig};
use crate::engine::{QuestEngine, QuestError};
use crate::inventory::{Inventory, InventoryError, ItemSort};
use crate::item::{Item, Weekday};
use crate::ledger::{Ledger, QuestLedger, QuestReport, Weather};
use crate::numbers::i64_to_f64;
use crate::quest::{ItemRequest, QuestKind, QuestResult};
use crate::rng::RngBundle;
use crate::roster::Roster;

pub type WorldEngine = QuestEngine<Roster, Inventory, Ledger>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error(transparent)]
    Quest(#[from] QuestError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("{0} has no purse")]
    UnknownPurse(String),
    #[error("{name} cannot afford {needed} gold (has {available})")]
    InsufficientGold {
        name: String,
        needed: i64,
        available: i64,
    },
}

/// What changed at the start of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u32,
    pub weather: Weather,
    pub wartime: bool,
    pub war_toggled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingStatus {
    Destroyed,
    InInventory,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub day: Weekday,
    pub price: i64,
}

/// Point-in-time view of the world, suitable for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub day: u32,
    pub weather: Weather,
    pub wartime: bool,
    pub ring: RingStatus,
    pub inventory_value: i64,
    /// Most expensive first, rings included.
    pub items: Vec<Item>,
    pub quests: QuestReport,
    pub gold: BTreeMap<String, i64>,
}

#[derive(Debug, Clone)]
pub struct World {
    engine: WorldEngine,
    gold: BTreeMap<String, i64>,
    ring_destroyed: bool,
    config: WorldConfig,
    rng: RngBundle,
    day: u32,
}

impl World {
    /// The embedded scenario and configuration, seeded with `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(
            &ScenarioData::default_scenario(),
            WorldConfig::default_config(),
            seed,
        )
    }

    /// Every scenario character starts with the configured purse.
    #[must_use]
    pub fn new(scenario: &ScenarioData, config: WorldConfig, seed: u64) -> Self {
        let rng = RngBundle::from_user_seed(seed);
        let roster = scenario.build_roster(rng.stream_seed(b"roster"), config.promotion_chance);
        let engine = QuestEngine::new(roster, scenario.build_inventory(), Ledger::new());
        let gold = scenario
            .character_names()
            .into_iter()
            .map(|name| (name, config.starting_gold))
            .collect();
        Self {
            engine,
            gold,
            ring_destroyed: false,
            config,
            rng,
            day: 0,
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &WorldEngine {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut WorldEngine {
        &mut self.engine
    }

    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[must_use]
    pub const fn rng(&self) -> &RngBundle {
        &self.rng
    }

    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub const fn ring_destroyed(&self) -> bool {
        self.ring_destroyed
    }

    #[must_use]
    pub fn gold(&self, name: &str) -> Option<i64> {
        self.gold.get(name).copied()
    }

    #[must_use]
    pub const fn purses(&self) -> &BTreeMap<String, i64> {
        &self.gold
    }

    /// Advance one day. Items age first, then the weather is drawn and war may toggle.
    pub fn process_day(&mut self) -> DayReport {
        self.day = self.day.saturating_add(1);
        self.engine.inventory_mut().tick_all();

        let pool = &self.config.weather_pool;
        let weather = if pool.is_empty() {
            Weather::default()
        } else {
            pool[self.rng.weather().gen_range(0..pool.len())]
        };
        self.engine.ledger_mut().set_weather(weather);

        let war_toggled = self.rng.war().r#gen::<f64>() < self.config.war_toggle_chance;
        if war_toggled {
            let wartime = !self.engine.inventory().wartime();
            self.engine.inventory_mut().set_wartime(wartime);
        }

        DayReport {
            day: self.day,
            weather,
            wartime: self.engine.inventory().wartime(),
            war_toggled,
        }
    }

    /// Attempt a quest and share any reward equally across the party.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Quest`] when the attempt fails validation.
    pub fn attempt_quest<S: AsRef<str>>(
        &mut self,
        leader: &str,
        quest: QuestKind,
        companions: &[S],
        items: &[ItemRequest],
    ) -> Result<QuestResult, WorldError> {
        let result = self
            .engine
            .start_quest(leader, quest, companions, items, self.rng.quest())
            .inspect_err(|err| warn!("quest rejected: {err}"))?;

        if result.success() {
            let members = companions.len() + 1;
            let share = result.reward() / i64::try_from(members).unwrap_or(i64::MAX);
            let names = std::iter::once(leader).chain(companions.iter().map(|c| c.as_ref()));
            for name in names {
                *self.gold.entry(name.to_string()).or_insert(0) += share;
            }
            if quest == QuestKind::DestroyRing {
                self.ring_destroyed = true;
                info!("The One Ring has been destroyed");
            }
        }
        Ok(result)
    }

    /// Buy one unit of `item` on a random weekday.
    ///
    /// # Errors
    ///
    /// Fails when the buyer has no purse or cannot afford the item, or when
    /// the item is not in stock. Nothing changes on error.
    pub fn buy_item(
        &mut self,
        buyer: &str,
        item: &str,
        haggling: bool,
    ) -> Result<Purchase, WorldError> {
        let available = self.purse(buyer)?;
        let day = Weekday::ALL[self.rng.market().gen_range(0..Weekday::ALL.len())];
        let price = self
            .engine
            .inventory()
            .find(item)
            .map(|held| held.final_price(haggling, day))
            .ok_or_else(|| InventoryError::NotInStock {
                name: item.to_string(),
                requested: 1,
            })?;
        if available < price {
            warn!("{buyer} cannot afford {item} ({price} gold)");
            return Err(WorldError::InsufficientGold {
                name: buyer.to_string(),
                needed: price,
                available,
            });
        }
        self.credit(buyer, -price);
        self.engine.inventory_mut().remove(item, 1);
        info!("{buyer} bought {item} for {price} gold on {}", day.key());
        Ok(Purchase { day, price })
    }

    /// The receiver pays `gold` to the giver for one unit of `item`.
    ///
    /// # Errors
    ///
    /// Fails when either purse is unknown or the receiver is short of gold,
    /// and when the item is not in stock. Nothing changes on error.
    pub fn trade_item(
        &mut self,
        giver: &str,
        receiver: &str,
        item: &str,
        gold: u32,
    ) -> Result<(), WorldError> {
        self.purse(giver)?;
        let available = self.purse(receiver)?;
        let gold = i64::from(gold);
        if available < gold {
            return Err(WorldError::InsufficientGold {
                name: receiver.to_string(),
                needed: gold,
                available,
            });
        }
        if self.engine.inventory().find(item).is_none() {
            return Err(InventoryError::NotInStock {
                name: item.to_string(),
                requested: 1,
            }
            .into());
        }
        self.credit(giver, gold);
        self.credit(receiver, -gold);
        self.engine.inventory_mut().remove(item, 1);
        info!("{giver} gave {item} to {receiver} for {gold} gold");
        Ok(())
    }

    #[must_use]
    pub fn ring_status(&self) -> RingStatus {
        if self.ring_destroyed {
            RingStatus::Destroyed
        } else if self.engine.inventory().has_ring() {
            RingStatus::InInventory
        } else {
            RingStatus::Missing
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        let inventory = self.engine.inventory();
        WorldSnapshot {
            day: self.day,
            weather: self.engine.ledger().current_weather(),
            wartime: inventory.wartime(),
            ring: self.ring_status(),
            inventory_value: inventory.total_value(),
            items: inventory
                .items_sorted(ItemSort::Price, true)
                .into_iter()
                .cloned()
                .collect(),
            quests: self.engine.ledger().report(),
            gold: self.gold.clone(),
        }
    }

    /// Mean gold per purse.
    #[must_use]
    pub fn average_gold(&self) -> f64 {
        if self.gold.is_empty() {
            return 0.0;
        }
        let total: i64 = self.gold.values().sum();
        let purses = i64::try_from(self.gold.len()).unwrap_or(i64::MAX);
        i64_to_f64(total) / i64_to_f64(purses)
    }

    fn purse(&self, name: &str) -> Result<i64, WorldError> {
        self.gold(name)
            .ok_or_else(|| WorldError::UnknownPurse(name.to_string()))
    }

    fn credit(&mut self, name: &str, amount: i64) {
        if let Some(purse) = self.gold.get_mut(name) {
            *purse = purse.saturating_add(amount);
        }
    }
}
