//! Item model: pricing, quality ageing, and wartime price scaling.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    CURSED_DECAY, CURSED_MONDAY_MULT, CURSED_PRICE_DIVISOR, FINE_QUALITY_THRESHOLD, GOOD_QUALITY_CAP,
    GOOD_QUALITY_THRESHOLD, GOOD_WEDNESDAY_MULT, HAGGLE_MULT, MITHRIL_LATE_WEEK_MULT,
    MITHRIL_QUALITY_CAP, MORDOR_DECAY, ONE_RING_MAGIC_POWER, RING_QUALITY_FLOOR,
    WARTIME_GONDOR_MULT, WARTIME_MORDOR_MULT, WARTIME_ROHAN_MULT, WEEKEND_MULT,
};
use crate::numbers::scale_truncated;

/// Region an item was forged or gathered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemOrigin {
    Shire,
    Gondor,
    Rohan,
    Mordor,
    Moria,
    Lothlorien,
    Isengard,
    Erebor,
}

impl ItemOrigin {
    pub const ALL: [Self; 8] = [
        Self::Shire,
        Self::Gondor,
        Self::Rohan,
        Self::Mordor,
        Self::Moria,
        Self::Lothlorien,
        Self::Isengard,
        Self::Erebor,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Shire => "Shire",
            Self::Gondor => "Gondor",
            Self::Rohan => "Rohan",
            Self::Mordor => "Mordor",
            Self::Moria => "Moria",
            Self::Lothlorien => "Lothlorien",
            Self::Isengard => "Isengard",
            Self::Erebor => "Erebor",
        }
    }
}

impl fmt::Display for ItemOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Behavioural tags carried by an item.
///
/// Tags are supplied explicitly at construction. Only default data seeding
/// derives them from the item name (see [`ItemTags::infer`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ItemTags {
    #[serde(default)]
    pub ring: bool,
    /// Age-invariant quality and a decaying magic-power counter.
    #[serde(default)]
    pub magic: bool,
    #[serde(default)]
    pub mithril: bool,
    #[serde(default)]
    pub cursed: bool,
}

impl ItemTags {
    pub const NONE: Self = Self {
        ring: false,
        magic: false,
        mithril: false,
        cursed: false,
    };

    #[must_use]
    pub const fn with_ring(mut self) -> Self {
        self.ring = true;
        self
    }

    #[must_use]
    pub const fn with_magic(mut self) -> Self {
        self.magic = true;
        self
    }

    #[must_use]
    pub const fn with_mithril(mut self) -> Self {
        self.mithril = true;
        self
    }

    #[must_use]
    pub const fn with_cursed(mut self) -> Self {
        self.cursed = true;
        self
    }

    /// Derive tags from an item name, as the legacy item catalogue did.
    ///
    /// A ring is any Mordor item whose name contains "Ring"; it is also magic
    /// when the name contains "One". "Mithril" marks mithril and a lowercase
    /// "cursed" marks a cursed item; a capitalised "Cursed" does not.
    #[must_use]
    pub fn infer(name: &str, origin: ItemOrigin) -> Self {
        let ring = origin == ItemOrigin::Mordor && name.contains("Ring");
        Self {
            ring,
            magic: ring && name.contains("One"),
            mithril: name.contains("Mithril"),
            cursed: name.contains("cursed"),
        }
    }
}

/// Day of the week, used by sale pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown day of week: {0}")]
pub struct WeekdayParseError(pub String);

impl FromStr for Weekday {
    type Err = WeekdayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WeekdayParseError(s.to_string()))
    }
}

/// A tradeable, usable artifact held in an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    origin: ItemOrigin,
    quantity: u32,
    quality: i32,
    /// Peacetime price fixed at construction.
    base_price: i64,
    /// Price after the current wartime scaling.
    price: i64,
    tags: ItemTags,
    good: bool,
    magic_power: u32,
}

impl Item {
    /// Build an item with explicit tags, deriving its price and "good" status.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        quality: i32,
        origin: ItemOrigin,
        tags: ItemTags,
    ) -> Self {
        let good = quality > GOOD_QUALITY_THRESHOLD && origin == ItemOrigin::Gondor;
        let mut base_price = if good {
            i64::from(quality) * 2
        } else if quality > FINE_QUALITY_THRESHOLD {
            i64::from(quality)
        } else {
            i64::from(quality) / 2
        };
        if tags.cursed {
            base_price /= CURSED_PRICE_DIVISOR;
        }
        let magic_power = if tags.magic { ONE_RING_MAGIC_POWER } else { 0 };
        Self {
            name: name.into(),
            origin,
            quantity,
            quality,
            base_price,
            price: base_price,
            tags,
            good,
            magic_power,
        }
    }

    /// Build an item whose tags are inferred from its name.
    #[must_use]
    pub fn seeded(name: &str, quantity: u32, quality: i32, origin: ItemOrigin) -> Self {
        Self::new(name, quantity, quality, origin, ItemTags::infer(name, origin))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn origin(&self) -> ItemOrigin {
        self.origin
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn quality(&self) -> i32 {
        self.quality
    }

    #[must_use]
    pub const fn price(&self) -> i64 {
        self.price
    }

    #[must_use]
    pub const fn base_price(&self) -> i64 {
        self.base_price
    }

    #[must_use]
    pub const fn tags(&self) -> ItemTags {
        self.tags
    }

    #[must_use]
    pub const fn is_ring(&self) -> bool {
        self.tags.ring
    }

    #[must_use]
    pub const fn is_magic(&self) -> bool {
        self.tags.magic
    }

    #[must_use]
    pub const fn is_mithril(&self) -> bool {
        self.tags.mithril
    }

    #[must_use]
    pub const fn is_cursed(&self) -> bool {
        self.tags.cursed
    }

    /// High-quality Gondor work.
    #[must_use]
    pub const fn is_good(&self) -> bool {
        self.good
    }

    #[must_use]
    pub const fn magic_power(&self) -> u32 {
        self.magic_power
    }

    /// Protected items survive having their quality worn down to zero.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        self.tags.magic || self.good || self.tags.mithril
    }

    /// Held value of the stack at the current price.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }

    /// Same stack identity: name, origin and quality all match.
    #[must_use]
    pub fn same_stack(&self, other: &Self) -> bool {
        self.name == other.name && self.origin == other.origin && self.quality == other.quality
    }

    /// Unit sale price after haggling and day-of-week adjustments.
    ///
    /// Each adjustment truncates before the next is applied, so the order
    /// below is significant.
    #[must_use]
    pub fn final_price(&self, haggling: bool, day: Weekday) -> i64 {
        let mut price = self.price;
        if haggling && !self.tags.ring {
            price = scale_truncated(price, HAGGLE_MULT);
        }
        if day.is_weekend() {
            price = scale_truncated(price, WEEKEND_MULT);
        }
        if self.tags.cursed && day == Weekday::Monday {
            price = scale_truncated(price, CURSED_MONDAY_MULT);
        }
        if self.tags.mithril && matches!(day, Weekday::Thursday | Weekday::Friday) {
            price = scale_truncated(price, MITHRIL_LATE_WEEK_MULT);
        }
        if self.good && day == Weekday::Wednesday {
            price = scale_truncated(price, GOOD_WEDNESDAY_MULT);
        }
        price.max(0)
    }

    /// Age the item by one world tick.
    pub fn apply_tick(&mut self) {
        if self.quality > 0 && !self.good {
            self.quality -= 1;
        }
        if self.good && self.quality < GOOD_QUALITY_CAP {
            self.quality += 1;
        }
        if self.tags.cursed {
            self.quality = (self.quality - CURSED_DECAY).max(0);
        }
        // Magic rings never age.
        if !self.tags.magic && self.tags.ring && self.quality > RING_QUALITY_FLOOR {
            self.quality -= 1;
        }
        if self.tags.mithril && self.quality < MITHRIL_QUALITY_CAP {
            self.quality += 1;
        }
        if self.origin == ItemOrigin::Mordor && !self.tags.ring {
            self.quality = (self.quality - MORDOR_DECAY).max(0);
        }
        self.magic_power = self.magic_power.saturating_sub(1);
    }

    /// Multiplier applied to the base price while war is active.
    #[must_use]
    pub const fn wartime_multiplier(&self) -> f64 {
        match self.origin {
            ItemOrigin::Gondor => WARTIME_GONDOR_MULT,
            ItemOrigin::Rohan => WARTIME_ROHAN_MULT,
            ItemOrigin::Mordor if !self.tags.ring => WARTIME_MORDOR_MULT,
            _ => 1.0,
        }
    }

    /// Recompute the current price from the base price.
    ///
    /// The base price is never touched, so ending a war restores it exactly.
    pub fn apply_wartime_scale(&mut self, wartime: bool) {
        self.price = if wartime {
            scale_truncated(self.base_price, self.wartime_multiplier())
        } else {
            self.base_price
        };
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    /// Take up to `quantity` units, returning what remains in the stack.
    pub(crate) fn take_quantity(&mut self, quantity: u32) -> u32 {
        self.quantity = self.quantity.saturating_sub(quantity);
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_derives_price_from_quality_and_origin() {
        assert_eq!(Item::seeded("Gondorian Sword", 5, 85, ItemOrigin::Gondor).price(), 170);
        assert_eq!(Item::seeded("Elven Bow", 3, 88, ItemOrigin::Lothlorien).price(), 88);
        assert_eq!(Item::seeded("Pipe Weed", 20, 30, ItemOrigin::Shire).price(), 15);
        assert_eq!(Item::seeded("Cursed Helmet", 1, 70, ItemOrigin::Mordor).price(), 70);
        assert_eq!(Item::seeded("cursed Dagger", 1, 70, ItemOrigin::Mordor).price(), 23);
    }

    #[test]
    fn curse_inference_is_case_sensitive() {
        assert!(!ItemTags::infer("Cursed Helmet", ItemOrigin::Mordor).cursed);
        assert!(ItemTags::infer("cursed Dagger", ItemOrigin::Mordor).cursed);
        let tagged = Item::new("Cursed Helmet", 1, 70, ItemOrigin::Mordor, ItemTags::NONE.with_cursed());
        assert!(tagged.is_cursed());
        assert_eq!(tagged.price(), 23);
    }

    #[test]
    fn inference_only_marks_mordor_rings() {
        let one = ItemTags::infer("The One Ring", ItemOrigin::Mordor);
        assert!(one.ring && one.magic);
        let elven = ItemTags::infer("Elven Ring", ItemOrigin::Lothlorien);
        assert_eq!(elven, ItemTags::NONE);
        assert!(ItemTags::infer("Mithril Shirt", ItemOrigin::Moria).mithril);
    }

    #[test]
    fn one_ring_gets_magic_power_that_decays() {
        let mut ring = Item::seeded("The One Ring", 1, 100, ItemOrigin::Mordor);
        assert_eq!(ring.magic_power(), 100);
        ring.apply_tick();
        assert_eq!(ring.magic_power(), 99);
        assert_eq!(ring.quality(), 99, "only the base decrement applies to the magic ring");
    }

    #[test]
    fn haggling_never_discounts_rings() {
        let ring = Item::new("Ring of Barahir", 1, 70, ItemOrigin::Mordor, ItemTags::NONE.with_ring());
        assert_eq!(ring.final_price(true, Weekday::Tuesday), ring.price());
        let blade = Item::seeded("Orc Blade", 1, 70, ItemOrigin::Mordor);
        assert_eq!(blade.final_price(true, Weekday::Tuesday), 63);
    }

    #[test]
    fn day_modifiers_apply_in_order_with_truncation() {
        let good = Item::seeded("Gondorian Sword", 1, 85, ItemOrigin::Gondor);
        // 170 -> haggle 153 -> wednesday 145
        assert_eq!(good.final_price(true, Weekday::Wednesday), 145);
        // 170 -> weekend 187
        assert_eq!(good.final_price(false, Weekday::Sunday), 187);

        let mithril = Item::seeded("Mithril Shirt", 1, 90, ItemOrigin::Moria);
        // 90 -> haggle 81 -> friday 93
        assert_eq!(mithril.final_price(true, Weekday::Friday), 93);

        let cursed = Item::seeded("cursed Dagger", 1, 70, ItemOrigin::Mordor);
        // 23 -> monday 11
        assert_eq!(cursed.final_price(false, Weekday::Monday), 11);
    }

    #[test]
    fn final_price_is_never_negative() {
        let broken = Item::seeded("Broken Shard", 1, -40, ItemOrigin::Shire);
        assert!(broken.price() < 0);
        assert_eq!(broken.final_price(false, Weekday::Saturday), 0);
    }

    #[test]
    fn tick_stacks_cursed_and_mordor_decay() {
        let mut dagger = Item::seeded("cursed Dagger", 1, 10, ItemOrigin::Mordor);
        dagger.apply_tick();
        assert_eq!(dagger.quality(), 5);

        let mut sword = Item::seeded("Sword", 1, 10, ItemOrigin::Gondor);
        sword.apply_tick();
        assert_eq!(sword.quality(), 9);
    }

    #[test]
    fn tick_floors_each_decrement_at_zero() {
        let mut dagger = Item::seeded("cursed Dagger", 1, 1, ItemOrigin::Mordor);
        dagger.apply_tick();
        assert_eq!(dagger.quality(), 0);
        dagger.apply_tick();
        assert_eq!(dagger.quality(), 0);
    }

    #[test]
    fn rings_and_mithril_drift_toward_their_thresholds() {
        let mut ring = Item::new("Ring", 1, 85, ItemOrigin::Mordor, ItemTags::NONE.with_ring());
        ring.apply_tick();
        assert_eq!(ring.quality(), 83);
        let mut low_ring = Item::new("Ring", 1, 60, ItemOrigin::Mordor, ItemTags::NONE.with_ring());
        low_ring.apply_tick();
        assert_eq!(low_ring.quality(), 59);

        let mut shirt = Item::seeded("Mithril Shirt", 1, 70, ItemOrigin::Moria);
        shirt.apply_tick();
        assert_eq!(shirt.quality(), 70);
    }

    #[test]
    fn good_items_hold_their_quality() {
        let mut sword = Item::seeded("Gondorian Sword", 1, 85, ItemOrigin::Gondor);
        for _ in 0..10 {
            sword.apply_tick();
        }
        assert_eq!(sword.quality(), 85);
        assert!(sword.is_protected());
    }

    #[test]
    fn wartime_scaling_reverses_exactly() {
        let mut rohan = Item::seeded("Horn of Rohan", 1, 77, ItemOrigin::Rohan);
        rohan.apply_wartime_scale(true);
        assert_eq!(rohan.price(), 100);
        rohan.apply_wartime_scale(false);
        assert_eq!(rohan.price(), 77);

        let mut ring = Item::seeded("The One Ring", 1, 100, ItemOrigin::Mordor);
        ring.apply_wartime_scale(true);
        assert_eq!(ring.price(), ring.base_price());
    }

    #[test]
    fn weekday_parses_case_insensitively() {
        assert_eq!("monday".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert!("Funday".parse::<Weekday>().is_err());
    }
}
