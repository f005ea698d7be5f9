use item_core::{EquipSlot, Item, StatBonuses};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The five primary attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub agility: i32,
    pub stamina: i32,
    pub intellect: i32,
    pub spirit: i32,
}

impl Attributes {
    pub const fn new(strength: i32, agility: i32, stamina: i32, intellect: i32, spirit: i32) -> Self {
        Attributes {
            strength,
            agility,
            stamina,
            intellect,
            spirit,
        }
    }

    /// Add another attribute set component-wise
    pub fn add_bonuses_from(&mut self, other: &Attributes) {
        self.strength += other.strength;
        self.agility += other.agility;
        self.stamina += other.stamina;
        self.intellect += other.intellect;
        self.spirit += other.spirit;
    }

    /// Add an item's attribute bonuses
    pub fn add_bonuses(&mut self, bonuses: &StatBonuses) {
        self.strength += bonuses.str;
        self.agility += bonuses.agi;
        self.stamina += bonuses.sta;
        self.intellect += bonuses.int;
        self.spirit += bonuses.spirit;
    }
}

/// Everything the paper doll contributes to a recalculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GearTotals {
    /// Summed attribute bonuses from every equipped item
    pub attributes: Attributes,
    /// Direct damage bonuses from equipped items other than the main-hand weapon
    pub bonus_min_dmg: i32,
    pub bonus_max_dmg: i32,
    /// Damage range of the main-hand weapon, if one is equipped
    pub weapon: Option<(i32, i32)>,
}

impl GearTotals {
    /// Sum the contributions of every equipped item
    pub fn collect(equipped: &BTreeMap<EquipSlot, Item>) -> Self {
        let mut totals = GearTotals::default();

        for (slot, item) in equipped {
            totals.attributes.add_bonuses(&item.stats);

            if *slot == EquipSlot::MainHand && item.is_weapon() {
                totals.weapon = Some((item.stats.min_dmg, item.stats.max_dmg));
            } else {
                totals.bonus_min_dmg += item.stats.min_dmg;
                totals.bonus_max_dmg += item.stats.max_dmg;
            }
        }

        totals
    }
}
