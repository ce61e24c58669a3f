//! Inventory store: stacks of items, ageing, wartime pricing and sales.
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::item::{Item, ItemOrigin, Weekday};

/// Read access the quest engine needs from an inventory.
pub trait InventoryReader {
    /// Snapshot of every held stack.
    fn all_items(&self) -> Vec<Item>;

    fn is_wartime(&self) -> bool;
}

/// Write access the quest engine needs on an inventory.
pub trait InventoryWriter {
    fn remove_item(&mut self, name: &str, quantity: u32);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("no stack of {name} holds {requested} units")]
    NotInStock { name: String, requested: u32 },
    #[error("cannot sell {name}: items from Mordor may not be sold during wartime")]
    IllegalSale { name: String },
}

/// Ordering applied by [`Inventory::items_sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSort {
    Name,
    /// Most expensive first.
    Price,
    Origin,
    /// Insertion order.
    Unsorted,
}

/// Completed sale returned by [`Inventory::sell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub unit_price: i64,
    pub quantity: u32,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    /// Cumulative takings per item name.
    sales: BTreeMap<String, i64>,
    wartime: bool,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging it into an existing stack with the same
    /// name, origin and quality.
    pub fn add(&mut self, mut item: Item) {
        if item.quantity() == 0 {
            debug!("ignoring empty stack of {}", item.name());
            return;
        }
        if let Some(stack) = self.items.iter_mut().find(|held| held.same_stack(&item)) {
            stack.add_quantity(item.quantity());
            return;
        }
        item.apply_wartime_scale(self.wartime);
        self.items.push(item);
    }

    /// Remove `quantity` units from the first stack named `name`, dropping the
    /// stack once it is empty. Unknown names are ignored.
    pub fn remove(&mut self, name: &str, quantity: u32) {
        let Some(index) = self.items.iter().position(|item| item.name() == name) else {
            return;
        };
        if self.items[index].take_quantity(quantity) == 0 {
            self.items.remove(index);
        }
    }

    /// Sell from the first stack named `name` holding at least `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotInStock`] when no stack is large enough and
    /// [`InventoryError::IllegalSale`] for Mordor goods during wartime. The
    /// inventory is unchanged on error.
    pub fn sell(
        &mut self,
        name: &str,
        quantity: u32,
        haggling: bool,
        day: Weekday,
    ) -> Result<SaleReceipt, InventoryError> {
        let index = self
            .items
            .iter()
            .position(|item| item.name() == name && item.quantity() >= quantity)
            .ok_or_else(|| InventoryError::NotInStock {
                name: name.to_string(),
                requested: quantity,
            })?;
        if self.wartime && self.items[index].origin() == ItemOrigin::Mordor {
            return Err(InventoryError::IllegalSale {
                name: name.to_string(),
            });
        }

        let unit_price = self.items[index].final_price(haggling, day);
        let total = unit_price.saturating_mul(i64::from(quantity));
        *self.sales.entry(name.to_string()).or_insert(0) += total;
        if self.items[index].take_quantity(quantity) == 0 {
            self.items.remove(index);
        }
        debug!("sold {quantity} x {name} at {unit_price} on {}", day.key());
        Ok(SaleReceipt {
            unit_price,
            quantity,
            total,
        })
    }

    /// Age every item by one tick, discarding unprotected items worn to nothing.
    pub fn tick_all(&mut self) {
        for item in &mut self.items {
            item.apply_tick();
        }
        self.items
            .retain(|item| item.quality() > 0 || item.is_protected());
    }

    /// Toggle wartime and rescale every held price.
    pub fn set_wartime(&mut self, wartime: bool) {
        if self.wartime != wartime {
            info!("{}", if wartime { "war has broken out" } else { "peace has returned" });
        }
        self.wartime = wartime;
        for item in &mut self.items {
            item.apply_wartime_scale(wartime);
        }
    }

    #[must_use]
    pub const fn wartime(&self) -> bool {
        self.wartime
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ price × quantity over every stack.
    #[must_use]
    pub fn total_value(&self) -> i64 {
        self.items.iter().map(Item::value).sum()
    }

    #[must_use]
    pub fn value_by_origin(&self, origin: ItemOrigin) -> i64 {
        self.items
            .iter()
            .filter(|item| item.origin() == origin)
            .map(Item::value)
            .sum()
    }

    #[must_use]
    pub fn items_from_origin(&self, origin: ItemOrigin) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.origin() == origin)
            .collect()
    }

    #[must_use]
    pub fn has_ring(&self) -> bool {
        self.items.iter().any(Item::is_ring)
    }

    /// Cumulative takings recorded for `name`.
    #[must_use]
    pub fn sales_for(&self, name: &str) -> i64 {
        self.sales.get(name).copied().unwrap_or(0)
    }

    /// Listing of held items in the requested order.
    #[must_use]
    pub fn items_sorted(&self, sort: ItemSort, include_rings: bool) -> Vec<&Item> {
        let mut listing: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| include_rings || !item.is_ring())
            .collect();
        match sort {
            ItemSort::Name => listing.sort_by(|a, b| a.name().cmp(b.name())),
            ItemSort::Price => listing.sort_by(|a, b| b.price().cmp(&a.price())),
            ItemSort::Origin => listing.sort_by(|a, b| a.origin().key().cmp(b.origin().key())),
            ItemSort::Unsorted => {}
        }
        listing
    }
}

impl InventoryReader for Inventory {
    fn all_items(&self) -> Vec<Item> {
        self.items.clone()
    }

    fn is_wartime(&self) -> bool {
        self.wartime
    }
}

impl InventoryWriter for Inventory {
    fn remove_item(&mut self, name: &str, quantity: u32) {
        self.remove(name, quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemTags;

    fn sword(quantity: u32) -> Item {
        Item::seeded("Sword", quantity, 50, ItemOrigin::Gondor)
    }

    #[test]
    fn add_merges_identical_stacks() {
        let mut inventory = Inventory::new();
        inventory.add(sword(1));
        inventory.add(sword(2));
        inventory.add(Item::seeded("Sword", 1, 60, ItemOrigin::Gondor));
        assert_eq!(inventory.items().len(), 2);
        assert_eq!(inventory.items()[0].quantity(), 3);
    }

    #[test]
    fn empty_stacks_are_not_added() {
        let mut inventory = Inventory::new();
        inventory.add(sword(0));
        assert!(inventory.is_empty());
    }

    #[test]
    fn remove_drops_exhausted_stack() {
        let mut inventory = Inventory::new();
        inventory.add(sword(2));
        inventory.remove("Sword", 2);
        assert!(inventory.find("Sword").is_none());
    }

    #[test]
    fn remove_unknown_name_is_a_no_op() {
        let mut inventory = Inventory::new();
        inventory.add(sword(2));
        inventory.remove("Axe", 1);
        assert_eq!(inventory.items().len(), 1);
    }

    #[test]
    fn sell_records_takings_and_decrements() {
        let mut inventory = Inventory::new();
        inventory.add(sword(2));
        let receipt = inventory.sell("Sword", 1, false, Weekday::Monday).unwrap();
        assert_eq!(receipt.unit_price, 25);
        assert_eq!(inventory.find("Sword").unwrap().quantity(), 1);
        assert_eq!(inventory.sales_for("Sword"), 25);
        inventory.sell("Sword", 1, false, Weekday::Saturday).unwrap();
        assert_eq!(inventory.sales_for("Sword"), 52);
        assert!(inventory.is_empty());
    }

    #[test]
    fn sell_rejects_short_stock() {
        let mut inventory = Inventory::new();
        inventory.add(sword(1));
        let err = inventory.sell("Sword", 2, false, Weekday::Monday).unwrap_err();
        assert!(matches!(err, InventoryError::NotInStock { requested: 2, .. }));
    }

    #[test]
    fn wartime_mordor_sale_fails_before_mutating() {
        let mut inventory = Inventory::new();
        inventory.add(Item::seeded("Orc Shield", 1, 30, ItemOrigin::Mordor));
        inventory.set_wartime(true);
        let before = inventory.clone();
        let err = inventory.sell("Orc Shield", 1, false, Weekday::Monday).unwrap_err();
        assert!(err.to_string().contains("Mordor during wartime"));
        assert_eq!(inventory, before);
    }

    #[test]
    fn tick_all_removes_only_unprotected_worn_items() {
        let mut inventory = Inventory::new();
        inventory.add(Item::seeded("Stale Bread", 1, 1, ItemOrigin::Shire));
        inventory.add(Item::new("Mithril Coat", 1, 0, ItemOrigin::Moria, ItemTags::NONE.with_mithril()));
        inventory.tick_all();
        assert!(inventory.find("Stale Bread").is_none());
        assert!(inventory.find("Mithril Coat").is_some());
    }

    #[test]
    fn tick_all_on_empty_inventory_is_a_no_op() {
        let mut inventory = Inventory::new();
        inventory.tick_all();
        assert!(inventory.is_empty());
    }

    #[test]
    fn wartime_rescales_by_origin_and_back() {
        let mut inventory = Inventory::new();
        inventory.add(Item::seeded("Gondorian Sword", 1, 85, ItemOrigin::Gondor));
        inventory.add(Item::seeded("Orc Blade", 2, 40, ItemOrigin::Mordor));
        let peace_total = inventory.total_value();
        inventory.set_wartime(true);
        assert_eq!(inventory.value_by_origin(ItemOrigin::Gondor), 255);
        assert_eq!(inventory.value_by_origin(ItemOrigin::Mordor), 20);
        inventory.set_wartime(false);
        assert_eq!(inventory.total_value(), peace_total);
    }

    #[test]
    fn items_added_during_war_are_scaled() {
        let mut inventory = Inventory::new();
        inventory.set_wartime(true);
        inventory.add(Item::seeded("Gondorian Sword", 1, 85, ItemOrigin::Gondor));
        assert_eq!(inventory.find("Gondorian Sword").unwrap().price(), 255);
    }

    #[test]
    fn sorted_listing_can_hide_rings() {
        let mut inventory = Inventory::new();
        inventory.add(Item::seeded("The One Ring", 1, 100, ItemOrigin::Mordor));
        inventory.add(Item::seeded("Elven Bow", 1, 88, ItemOrigin::Lothlorien));
        inventory.add(Item::seeded("Pipe Weed", 1, 30, ItemOrigin::Shire));
        let names: Vec<&str> = inventory
            .items_sorted(ItemSort::Price, false)
            .into_iter()
            .map(Item::name)
            .collect();
        assert_eq!(names, ["Elven Bow", "Pipe Weed"]);
        assert!(inventory.has_ring());
    }
}
