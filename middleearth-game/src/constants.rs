//! Fixed tuning values for pricing, item ageing, and quest resolution.

// Success probability
pub(crate) const BASE_SUCCESS_CHANCE: f64 = 0.50;
pub(crate) const SUCCESS_CHANCE_MIN: f64 = 0.10;
pub(crate) const SUCCESS_CHANCE_MAX: f64 = 0.95;
pub(crate) const COMPANION_CHANCE_STEP: f64 = 0.05;

pub(crate) const LEVEL_NOVICE_ADJUST: f64 = -0.20;
pub(crate) const LEVEL_EXPERIENCED_ADJUST: f64 = 0.10;
pub(crate) const LEVEL_VETERAN_ADJUST: f64 = 0.20;
pub(crate) const LEVEL_LEGENDARY_ADJUST: f64 = 0.30;

pub(crate) const QUEST_DESTROY_RING_ADJUST: f64 = -0.30;
pub(crate) const QUEST_DEFEAT_ORCS_ADJUST: f64 = 0.10;
pub(crate) const QUEST_FIND_ARTIFACT_ADJUST: f64 = -0.10;

pub(crate) const ITEM_RING_BONUS: f64 = 0.15;
pub(crate) const ITEM_MITHRIL_BONUS: f64 = 0.10;
pub(crate) const ITEM_GOOD_BONUS: f64 = 0.05;
pub(crate) const ITEM_CURSED_PENALTY: f64 = -0.15;

pub(crate) const ELF_DWARF_BONUS: f64 = 0.05;
pub(crate) const HOBBIT_WIZARD_BONUS: f64 = 0.10;

pub(crate) const WEATHER_STORMY_ADJUST: f64 = -0.10;
pub(crate) const WEATHER_CLEAR_ADJUST: f64 = 0.05;

pub(crate) const WARTIME_DEFEAT_ORCS_ADJUST: f64 = -0.10;
pub(crate) const WARTIME_DIPLOMACY_ADJUST: f64 = -0.20;

// Settlement
pub(crate) const REWARD_DESTROY_RING: i64 = 10_000;
pub(crate) const REWARD_DEFEAT_ORCS: i64 = 500;
pub(crate) const REWARD_ESCORT_HOBBIT: i64 = 300;
pub(crate) const REWARD_FIND_ARTIFACT: i64 = 800;
pub(crate) const REWARD_DIPLOMATIC_MISSION: i64 = 400;
pub(crate) const REWARD_ROUNDING_STEP: i64 = 10;
pub(crate) const ITEM_WEAR_CHANCE: f64 = 0.20;

// Item pricing
pub(crate) const GOOD_QUALITY_THRESHOLD: i32 = 80;
pub(crate) const FINE_QUALITY_THRESHOLD: i32 = 65;
pub(crate) const CURSED_PRICE_DIVISOR: i64 = 3;
pub(crate) const ONE_RING_MAGIC_POWER: u32 = 100;

pub(crate) const HAGGLE_MULT: f64 = 0.9;
pub(crate) const WEEKEND_MULT: f64 = 1.1;
pub(crate) const CURSED_MONDAY_MULT: f64 = 0.5;
pub(crate) const MITHRIL_LATE_WEEK_MULT: f64 = 1.15;
pub(crate) const GOOD_WEDNESDAY_MULT: f64 = 0.95;

pub(crate) const GOOD_PRICE_RATE: f64 = 1.1;
pub(crate) const MITHRIL_PRICE_RATE: f64 = 1.2;

pub(crate) const WARTIME_GONDOR_MULT: f64 = 1.5;
pub(crate) const WARTIME_ROHAN_MULT: f64 = 1.3;
pub(crate) const WARTIME_MORDOR_MULT: f64 = 0.5;

// Item ageing
pub(crate) const GOOD_QUALITY_CAP: i32 = 50;
pub(crate) const MITHRIL_QUALITY_CAP: i32 = 90;
pub(crate) const RING_QUALITY_FLOOR: i32 = 80;
pub(crate) const CURSED_DECAY: i32 = 2;
pub(crate) const MORDOR_DECAY: i32 = 2;

// Character progression
pub(crate) const DEFAULT_PROMOTION_CHANCE: f64 = 0.25;
