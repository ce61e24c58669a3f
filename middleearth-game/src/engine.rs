//! Quest resolution: validate, score, draw, settle.
use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::constants::{
    GOOD_PRICE_RATE, ITEM_WEAR_CHANCE, MITHRIL_PRICE_RATE, REWARD_ROUNDING_STEP,
};
use crate::inventory::{InventoryReader, InventoryWriter};
use crate::item::Item;
use crate::ledger::QuestLedger;
use crate::numbers::{i64_to_f64, round_to_step};
use crate::odds::{QuestContext, QuestOdds, quest_odds};
use crate::party::Party;
use crate::quest::{ItemRequest, QuestKind, QuestResult, type_bonus};
use crate::roster::{CharacterDirectory, CharacterKind, Level, RosterError};

/// Precondition failures raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestError {
    #[error("Character {0} is not available for quests.")]
    CharacterUnavailable(String),
    #[error("Companion {0} is not available for quests.")]
    CompanionUnavailable(String),
    #[error("{0} appears more than once in the party.")]
    DuplicateMember(String),
    #[error("Item {name} is not available in sufficient quantity ({requested} requested).")]
    ItemUnavailable { name: String, requested: u32 },
    #[error("Cannot start {0} quest without a ring!")]
    NoRing(QuestKind),
    #[error("Inexperienced Hobbits cannot lead diplomatic missions ({0} is a Novice).")]
    InexperiencedHobbit(String),
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// A carried item resolved against the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct CarriedItem {
    pub item: Item,
    pub quantity: u32,
}

/// A validated quest attempt with its odds.
///
/// Only [`QuestEngine::plan`] builds one. It is a read-only preview: settling
/// always goes through [`QuestEngine::start_quest`], which validates again.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestPlan {
    quest: QuestKind,
    party: Party,
    leader_level: Level,
    items: Vec<CarriedItem>,
    odds: QuestOdds,
}

impl QuestPlan {
    #[must_use]
    pub const fn quest(&self) -> QuestKind {
        self.quest
    }

    #[must_use]
    pub const fn party(&self) -> &Party {
        &self.party
    }

    #[must_use]
    pub const fn leader_level(&self) -> Level {
        self.leader_level
    }

    #[must_use]
    pub fn leader_kind(&self) -> CharacterKind {
        self.party.leader().kind
    }

    #[must_use]
    pub fn items(&self) -> &[CarriedItem] {
        &self.items
    }

    #[must_use]
    pub const fn odds(&self) -> &QuestOdds {
        &self.odds
    }
}

/// Reward for a successful quest.
///
/// The leader-kind bonus is applied to the base reward, the total is split
/// across the party, and each carried item multiplies in its good rate then
/// its mithril rate. The result is rounded to the nearest ten.
#[must_use]
pub fn quest_reward(
    quest: QuestKind,
    leader_kind: CharacterKind,
    party_size: usize,
    items: &[Item],
) -> i64 {
    let shares = i64::try_from(party_size.max(1)).unwrap_or(i64::MAX);
    let mut reward = i64_to_f64(quest.base_reward()) * type_bonus(leader_kind, quest);
    reward /= i64_to_f64(shares);
    for item in items {
        if item.is_good() {
            reward *= GOOD_PRICE_RATE;
        }
        if item.is_mithril() {
            reward *= MITHRIL_PRICE_RATE;
        }
    }
    round_to_step(reward, REWARD_ROUNDING_STEP)
}

/// Resolves quest attempts against injected collaborators.
#[derive(Debug, Clone)]
pub struct QuestEngine<C, I, L> {
    characters: C,
    inventory: I,
    ledger: L,
}

impl<C, I, L> QuestEngine<C, I, L>
where
    C: CharacterDirectory,
    I: InventoryReader + InventoryWriter,
    L: QuestLedger,
{
    pub const fn new(characters: C, inventory: I, ledger: L) -> Self {
        Self {
            characters,
            inventory,
            ledger,
        }
    }

    pub const fn characters(&self) -> &C {
        &self.characters
    }

    pub const fn characters_mut(&mut self) -> &mut C {
        &mut self.characters
    }

    pub const fn inventory(&self) -> &I {
        &self.inventory
    }

    pub const fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    pub const fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Consume the engine, returning its collaborators.
    pub fn into_parts(self) -> (C, I, L) {
        (self.characters, self.inventory, self.ledger)
    }

    /// Validate an attempt and compute its odds without side effects.
    ///
    /// Checks run in order: party availability, carried items, then the
    /// quest-specific rules.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition as a [`QuestError`].
    pub fn plan<S: AsRef<str>>(
        &self,
        leader: &str,
        quest: QuestKind,
        companions: &[S],
        items: &[ItemRequest],
    ) -> Result<QuestPlan, QuestError> {
        let party = Party::assemble(&self.characters, leader, companions)?;
        let carried = self.resolve_items(items)?;

        if quest == QuestKind::DestroyRing && !carried.iter().any(|c| c.item.is_ring()) {
            return Err(QuestError::NoRing(quest));
        }
        let leader_level = self.characters.level(leader)?;
        if quest == QuestKind::DiplomaticMission
            && party.leader().kind == CharacterKind::Hobbit
            && leader_level == Level::Novice
        {
            return Err(QuestError::InexperiencedHobbit(leader.to_string()));
        }

        let held: Vec<Item> = carried.iter().map(|c| c.item.clone()).collect();
        let odds = quest_odds(&QuestContext {
            quest,
            leader_level,
            party: &party,
            items: &held,
            weather: self.ledger.current_weather(),
            wartime: self.inventory.is_wartime(),
        });
        debug!(
            "{quest} led by {leader}: base {:.3}, modified {:.3}",
            odds.base, odds.modified
        );

        Ok(QuestPlan {
            quest,
            party,
            leader_level,
            items: carried,
            odds,
        })
    }

    /// Attempt a quest: validate, draw the outcome from `rng`, then settle.
    ///
    /// Settlement records the outcome for each member and consumes carried
    /// items before the result is appended to the ledger.
    ///
    /// # Errors
    ///
    /// Returns a [`QuestError`] when validation fails; nothing is mutated in
    /// that case.
    pub fn start_quest<S: AsRef<str>>(
        &mut self,
        leader: &str,
        quest: QuestKind,
        companions: &[S],
        items: &[ItemRequest],
        rng: &mut impl Rng,
    ) -> Result<QuestResult, QuestError> {
        let plan = self.plan(leader, quest, companions, items)?;
        self.settle(&plan, rng)
    }

    /// Draw and settle a plan built by [`Self::plan`] in the same call.
    fn settle(
        &mut self,
        plan: &QuestPlan,
        rng: &mut impl Rng,
    ) -> Result<QuestResult, QuestError> {
        let success = rng.r#gen::<f64>() < plan.odds.modified;

        let reward = if success {
            let held: Vec<Item> = plan.items.iter().map(|c| c.item.clone()).collect();
            quest_reward(plan.quest, plan.leader_kind(), plan.party.size(), &held)
        } else {
            0
        };

        plan.party.complete_quest(&mut self.characters, success)?;
        self.consume_items(plan, rng);

        let result = QuestResult::new(
            plan.party.leader().name.clone(),
            plan.quest,
            success,
            reward,
            plan.party.companion_names(),
        );
        info!(
            "{} {} {} (reward {reward})",
            result.character(),
            if success { "completed" } else { "failed" },
            plan.quest
        );
        self.ledger.save_result(result.clone());
        Ok(result)
    }

    fn resolve_items(&self, requests: &[ItemRequest]) -> Result<Vec<CarriedItem>, QuestError> {
        let held = self.inventory.all_items();
        requests
            .iter()
            .map(|request| {
                held.iter()
                    .find(|item| item.name() == request.name && item.quantity() >= request.quantity)
                    .map(|item| CarriedItem {
                        item: item.clone(),
                        quantity: request.quantity,
                    })
                    .ok_or_else(|| QuestError::ItemUnavailable {
                        name: request.name.clone(),
                        requested: request.quantity,
                    })
            })
            .collect()
    }

    /// Rings are spent on a ring-destroying quest; anything else wears out at
    /// a fixed chance whatever the outcome.
    fn consume_items(&mut self, plan: &QuestPlan, rng: &mut impl Rng) {
        for carried in &plan.items {
            let spent = plan.quest == QuestKind::DestroyRing && carried.item.is_ring();
            if spent || rng.r#gen::<f64>() < ITEM_WEAR_CHANCE {
                debug!("{} x {} consumed", carried.quantity, carried.item.name());
                self.inventory
                    .remove_item(carried.item.name(), carried.quantity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use crate::item::{ItemOrigin, ItemTags};
    use crate::ledger::Ledger;
    use crate::roster::Roster;
    use rand::rngs::mock::StepRng;

    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn engine() -> QuestEngine<Roster, Inventory, Ledger> {
        let mut roster = Roster::with_seed(11).with_promotion_chance(0.0);
        roster.add_character("Aragorn", CharacterKind::Human, Level::Veteran);
        roster.add_character("Boromir", CharacterKind::Human, Level::Experienced);
        roster.add_character("Frodo", CharacterKind::Hobbit, Level::Experienced);
        roster.add_character("Sam", CharacterKind::Hobbit, Level::Novice);
        let mut inventory = Inventory::new();
        inventory.add(Item::seeded("The One Ring", 1, 100, ItemOrigin::Mordor));
        inventory.add(Item::seeded("Pipe Weed", 20, 30, ItemOrigin::Shire));
        QuestEngine::new(roster, inventory, Ledger::new())
    }

    #[test]
    fn reward_matches_worked_example() {
        assert_eq!(quest_reward(QuestKind::DefeatOrcs, CharacterKind::Human, 2, &[]), 330);
    }

    #[test]
    fn reward_applies_item_rates_in_sequence() {
        let items = [
            Item::seeded("Gondorian Sword", 1, 85, ItemOrigin::Gondor),
            Item::seeded("Mithril Shirt", 1, 90, ItemOrigin::Moria),
        ];
        // 800 * 1.6 / 1 * 1.1 * 1.2 = 1689.6
        assert_eq!(quest_reward(QuestKind::FindArtifact, CharacterKind::Dwarf, 1, &items), 1_690);
    }

    #[test]
    fn plan_has_no_side_effects() {
        let engine = engine();
        let plan = engine
            .plan("Frodo", QuestKind::DestroyRing, &["Sam"], &[ItemRequest::new("The One Ring", 1)])
            .unwrap();
        assert_eq!(plan.items().len(), 1);
        assert_eq!(plan.leader_level(), Level::Experienced);
        assert!(engine.ledger().results().is_empty());
        assert!(engine.inventory().has_ring());
    }

    #[test]
    fn forced_success_pays_and_spends_the_ring() {
        let mut engine = engine();
        let result = engine
            .start_quest(
                "Frodo",
                QuestKind::DestroyRing,
                &["Sam"],
                &[ItemRequest::new("The One Ring", 1)],
                &mut always(),
            )
            .unwrap();
        assert!(result.success());
        // 10000 * 1.5 / 2
        assert_eq!(result.reward(), 7_500);
        assert_eq!(result.companions(), ["Sam".to_string()]);
        assert!(!engine.inventory().has_ring());
        assert_eq!(engine.characters().get("Sam").unwrap().successful_quests, 1);
        assert_eq!(engine.ledger().results().len(), 1);
    }

    #[test]
    fn forced_failure_keeps_items_and_pays_nothing() {
        let mut engine = engine();
        let result = engine
            .start_quest(
                "Aragorn",
                QuestKind::EscortHobbit,
                &["Frodo"],
                &[ItemRequest::new("Pipe Weed", 5)],
                &mut never(),
            )
            .unwrap();
        assert!(!result.success());
        assert_eq!(result.reward(), 0);
        assert_eq!(engine.inventory().find("Pipe Weed").unwrap().quantity(), 20);
        assert_eq!(engine.characters().get("Aragorn").unwrap().failed_quests, 1);
    }

    #[test]
    fn worn_items_lose_the_requested_units() {
        let mut engine = engine();
        let mut rng = always();
        engine
            .start_quest(
                "Aragorn",
                QuestKind::EscortHobbit,
                &["Frodo"],
                &[ItemRequest::new("Pipe Weed", 5)],
                &mut rng,
            )
            .unwrap();
        assert_eq!(engine.inventory().find("Pipe Weed").unwrap().quantity(), 15);
    }

    #[test]
    fn destroy_ring_without_ring_fails_before_mutation() {
        let mut engine = engine();
        let err = engine
            .start_quest(
                "Frodo",
                QuestKind::DestroyRing,
                &["Sam"],
                &[ItemRequest::new("Pipe Weed", 1)],
                &mut always(),
            )
            .unwrap_err();
        assert_eq!(err, QuestError::NoRing(QuestKind::DestroyRing));
        assert!(err.to_string().contains("without a ring"));
        assert!(engine.ledger().results().is_empty());
        assert_eq!(engine.characters().get("Frodo").unwrap().failed_quests, 0);
    }

    #[test]
    fn novice_hobbit_cannot_lead_diplomacy() {
        let engine = engine();
        let err = engine
            .plan::<&str>("Sam", QuestKind::DiplomaticMission, &[], &[])
            .unwrap_err();
        assert_eq!(err, QuestError::InexperiencedHobbit("Sam".into()));
        assert!(engine.plan::<&str>("Frodo", QuestKind::DiplomaticMission, &[], &[]).is_ok());
    }

    #[test]
    fn short_inventory_is_rejected() {
        let engine = engine();
        let err = engine
            .plan::<&str>("Aragorn", QuestKind::DefeatOrcs, &[], &[ItemRequest::new("Pipe Weed", 21)])
            .unwrap_err();
        assert_eq!(
            err,
            QuestError::ItemUnavailable {
                name: "Pipe Weed".into(),
                requested: 21
            }
        );
    }

    #[test]
    fn unavailable_party_fails_first() {
        let mut engine = engine();
        engine.characters_mut().set_availability("Sam", false).unwrap();
        let err = engine
            .plan("Frodo", QuestKind::DestroyRing, &["Sam"], &[ItemRequest::new("Missing", 1)])
            .unwrap_err();
        assert_eq!(err, QuestError::CompanionUnavailable("Sam".into()));
    }

    #[test]
    fn good_mithril_items_apply_both_reward_rates() {
        let shirt = Item::new(
            "Mithril Shirt",
            1,
            85,
            ItemOrigin::Gondor,
            ItemTags::NONE.with_mithril(),
        );
        assert!(shirt.is_good() && shirt.is_mithril());
        // 800 * 1.6 * 1.1 * 1.2 = 1689.6
        assert_eq!(quest_reward(QuestKind::FindArtifact, CharacterKind::Dwarf, 1, &[shirt]), 1_690);
    }

    #[test]
    fn stale_plans_are_validated_again_when_started() {
        let mut engine = engine();
        let request = [ItemRequest::new("The One Ring", 1)];
        let preview = engine.plan("Frodo", QuestKind::DestroyRing, &["Sam"], &request).unwrap();
        assert!(preview.odds().modified > 0.0);

        engine.inventory_mut().remove("The One Ring", 1);
        let err = engine
            .start_quest("Frodo", QuestKind::DestroyRing, &["Sam"], &request, &mut always())
            .unwrap_err();
        assert_eq!(
            err,
            QuestError::ItemUnavailable {
                name: "The One Ring".into(),
                requested: 1
            }
        );
        assert!(engine.ledger().results().is_empty());
    }
}
