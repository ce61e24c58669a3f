//! Success probability for a quest attempt.
//!
//! Two passes, each clamped to the same band:
//!
//! 1. Base chance from leader level, quest kind, companion count and carried items.
//! 2. Modifiers: leader-kind multiplier, party combinations, weather and war.
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_SUCCESS_CHANCE, ELF_DWARF_BONUS, HOBBIT_WIZARD_BONUS, ITEM_CURSED_PENALTY,
    ITEM_GOOD_BONUS, ITEM_MITHRIL_BONUS, ITEM_RING_BONUS, LEVEL_EXPERIENCED_ADJUST,
    LEVEL_LEGENDARY_ADJUST, LEVEL_NOVICE_ADJUST, LEVEL_VETERAN_ADJUST, QUEST_DEFEAT_ORCS_ADJUST,
    QUEST_DESTROY_RING_ADJUST, QUEST_FIND_ARTIFACT_ADJUST, SUCCESS_CHANCE_MAX, SUCCESS_CHANCE_MIN,
    WARTIME_DEFEAT_ORCS_ADJUST, WARTIME_DIPLOMACY_ADJUST, WEATHER_CLEAR_ADJUST,
    WEATHER_STORMY_ADJUST,
};
use crate::item::Item;
use crate::ledger::Weather;
use crate::party::Party;
use crate::quest::{QuestKind, type_bonus};
use crate::roster::{CharacterKind, Level};

/// Everything the odds depend on, gathered during validation.
#[derive(Debug, Clone, Copy)]
pub struct QuestContext<'a> {
    pub quest: QuestKind,
    pub leader_level: Level,
    pub party: &'a Party,
    pub items: &'a [Item],
    pub weather: Weather,
    pub wartime: bool,
}

/// Probability after each pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuestOdds {
    pub base: f64,
    pub modified: f64,
}

#[must_use]
pub fn clamp_chance(chance: f64) -> f64 {
    chance.clamp(SUCCESS_CHANCE_MIN, SUCCESS_CHANCE_MAX)
}

#[must_use]
pub const fn level_adjustment(level: Level) -> f64 {
    match level {
        Level::Novice => LEVEL_NOVICE_ADJUST,
        Level::Experienced => LEVEL_EXPERIENCED_ADJUST,
        Level::Veteran => LEVEL_VETERAN_ADJUST,
        Level::Legendary => LEVEL_LEGENDARY_ADJUST,
    }
}

#[must_use]
pub const fn quest_adjustment(quest: QuestKind) -> f64 {
    match quest {
        QuestKind::DestroyRing => QUEST_DESTROY_RING_ADJUST,
        QuestKind::DefeatOrcs => QUEST_DEFEAT_ORCS_ADJUST,
        QuestKind::FindArtifact => QUEST_FIND_ARTIFACT_ADJUST,
        QuestKind::EscortHobbit | QuestKind::DiplomaticMission => 0.0,
    }
}

/// Additive bonus of one carried item; an item may earn several.
#[must_use]
pub fn item_adjustment(item: &Item) -> f64 {
    let mut adjust = 0.0;
    if item.is_ring() {
        adjust += ITEM_RING_BONUS;
    }
    if item.is_mithril() {
        adjust += ITEM_MITHRIL_BONUS;
    }
    if item.is_good() {
        adjust += ITEM_GOOD_BONUS;
    }
    if item.is_cursed() {
        adjust += ITEM_CURSED_PENALTY;
    }
    adjust
}

#[must_use]
pub const fn weather_adjustment(weather: Weather) -> f64 {
    match weather {
        Weather::Stormy => WEATHER_STORMY_ADJUST,
        Weather::Clear => WEATHER_CLEAR_ADJUST,
        Weather::Rainy | Weather::Foggy => 0.0,
    }
}

#[must_use]
pub const fn wartime_adjustment(quest: QuestKind, wartime: bool) -> f64 {
    if !wartime {
        return 0.0;
    }
    match quest {
        QuestKind::DefeatOrcs => WARTIME_DEFEAT_ORCS_ADJUST,
        QuestKind::DiplomaticMission => WARTIME_DIPLOMACY_ADJUST,
        QuestKind::DestroyRing | QuestKind::EscortHobbit | QuestKind::FindArtifact => 0.0,
    }
}

/// First pass: clamped base chance.
#[must_use]
pub fn base_chance(ctx: &QuestContext<'_>) -> f64 {
    let mut chance = BASE_SUCCESS_CHANCE;
    chance += level_adjustment(ctx.leader_level);
    chance += quest_adjustment(ctx.quest);
    chance += ctx.party.base_chance();
    chance += ctx.items.iter().map(item_adjustment).sum::<f64>();
    clamp_chance(chance)
}

/// Second pass over an already clamped base chance.
#[must_use]
pub fn apply_modifiers(base: f64, ctx: &QuestContext<'_>) -> f64 {
    let mut chance = base * type_bonus(ctx.party.leader().kind, ctx.quest);
    if ctx
        .party
        .contains_kind_combination(CharacterKind::Elf, CharacterKind::Dwarf)
    {
        chance += ELF_DWARF_BONUS;
    }
    if ctx
        .party
        .contains_kind_combination(CharacterKind::Hobbit, CharacterKind::Wizard)
    {
        chance += HOBBIT_WIZARD_BONUS;
    }
    chance += weather_adjustment(ctx.weather);
    chance += wartime_adjustment(ctx.quest, ctx.wartime);
    clamp_chance(chance)
}

/// Both passes.
#[must_use]
pub fn quest_odds(ctx: &QuestContext<'_>) -> QuestOdds {
    let base = base_chance(ctx);
    QuestOdds {
        base,
        modified: apply_modifiers(base, ctx),
    }
}
