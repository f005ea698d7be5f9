use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary attributes granted by gear and used for scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Agility,
    Stamina,
    Intellect,
    Spirit,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Strength => write!(f, "Strength"),
            Attribute::Agility => write!(f, "Agility"),
            Attribute::Stamina => write!(f, "Stamina"),
            Attribute::Intellect => write!(f, "Intellect"),
            Attribute::Spirit => write!(f, "Spirit"),
        }
    }
}

/// Paper-doll equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Head,
    Shoulder,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Neck,
    Finger1,
    Finger2,
    Trinket1,
    Trinket2,
    MainHand,
    OffHand,
    Ranged,
}

impl EquipSlot {
    /// Number of equipment slots on every unit
    pub const COUNT: usize = 16;

    /// Get all equipment slots in paper-doll order
    pub fn all() -> &'static [EquipSlot] {
        &[
            EquipSlot::Head,
            EquipSlot::Shoulder,
            EquipSlot::Chest,
            EquipSlot::Wrist,
            EquipSlot::Hands,
            EquipSlot::Waist,
            EquipSlot::Legs,
            EquipSlot::Feet,
            EquipSlot::Neck,
            EquipSlot::Finger1,
            EquipSlot::Finger2,
            EquipSlot::Trinket1,
            EquipSlot::Trinket2,
            EquipSlot::MainHand,
            EquipSlot::OffHand,
            EquipSlot::Ranged,
        ]
    }

    /// Position of this slot in `all()`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipSlot::Head => "Head",
            EquipSlot::Shoulder => "Shoulder",
            EquipSlot::Chest => "Chest",
            EquipSlot::Wrist => "Wrist",
            EquipSlot::Hands => "Hands",
            EquipSlot::Waist => "Waist",
            EquipSlot::Legs => "Legs",
            EquipSlot::Feet => "Feet",
            EquipSlot::Neck => "Neck",
            EquipSlot::Finger1 => "Finger 1",
            EquipSlot::Finger2 => "Finger 2",
            EquipSlot::Trinket1 => "Trinket 1",
            EquipSlot::Trinket2 => "Trinket 2",
            EquipSlot::MainHand => "Main Hand",
            EquipSlot::OffHand => "Off Hand",
            EquipSlot::Ranged => "Ranged",
        };
        write!(f, "{}", name)
    }
}

/// Broad item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Jewelry,
    /// Bag clutter with no equipment slot
    Misc,
}

/// Item quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Tooltip/border color for this rarity
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "#ffffff",
            Rarity::Uncommon => "#1eff00",
            Rarity::Rare => "#0070dd",
            Rarity::Epic => "#a335ee",
            Rarity::Legendary => "#ff8000",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Uncommon => write!(f, "Uncommon"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Epic => write!(f, "Epic"),
            Rarity::Legendary => write!(f, "Legendary"),
        }
    }
}

/// Flat stat bonuses an item grants while equipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonuses {
    pub str: i32,
    pub agi: i32,
    pub sta: i32,
    pub int: i32,
    pub spirit: i32,
    pub min_dmg: i32,
    pub max_dmg: i32,
}

impl StatBonuses {
    /// Get the bonus for a single attribute
    pub fn attribute(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.str,
            Attribute::Agility => self.agi,
            Attribute::Stamina => self.sta,
            Attribute::Intellect => self.int,
            Attribute::Spirit => self.spirit,
        }
    }

    /// Whether the item grants direct weapon-style damage
    pub fn has_damage(&self) -> bool {
        self.min_dmg != 0 || self.max_dmg != 0
    }

    /// Non-zero bonuses as (label, value) pairs, in tooltip order
    pub fn lines(&self) -> Vec<(&'static str, i32)> {
        [
            ("Strength", self.str),
            ("Agility", self.agi),
            ("Stamina", self.sta),
            ("Intellect", self.int),
            ("Spirit", self.spirit),
        ]
        .into_iter()
        .filter(|(_, v)| *v != 0)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index_matches_order() {
        for (i, slot) in EquipSlot::all().iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
        assert_eq!(EquipSlot::all().len(), EquipSlot::COUNT);
    }

    #[test]
    fn test_slot_serde_names() {
        let text = toml::to_string(&SlotHolder { slot: EquipSlot::MainHand }).unwrap();
        assert!(text.contains("main_hand"));
    }

    #[derive(Serialize)]
    struct SlotHolder {
        slot: EquipSlot,
    }

    #[test]
    fn test_stat_lines_skip_zero() {
        let stats = StatBonuses {
            sta: 3,
            str: 2,
            ..Default::default()
        };
        let lines = stats.lines();
        assert_eq!(lines, vec![("Strength", 2), ("Stamina", 3)]);
        assert!(!stats.has_damage());
    }
}
