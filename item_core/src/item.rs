use crate::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static item definition from the item database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Database ID
    pub id: u32,
    /// Display name
    pub name: String,
    /// Item category
    pub kind: ItemKind,
    /// Slot this item equips into (None for bag-only items)
    #[serde(default)]
    pub slot: Option<EquipSlot>,
    #[serde(default)]
    pub rarity: Rarity,
    /// Icon color used by the paper doll and weapon sprite
    #[serde(default = "default_icon_color")]
    pub icon_color: String,
    #[serde(default = "default_item_level")]
    pub item_level: u32,
    #[serde(default)]
    pub stats: StatBonuses,
}

fn default_icon_color() -> String {
    "#cccccc".to_string()
}

fn default_item_level() -> u32 {
    1
}

/// A materialized item owned by exactly one unit's bag or paper doll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique instance ID
    pub uid: u64,
    /// Template this item was created from
    pub template_id: u32,
    pub name: String,
    pub kind: ItemKind,
    pub slot: Option<EquipSlot>,
    pub rarity: Rarity,
    pub icon_color: String,
    pub item_level: u32,
    pub stats: StatBonuses,
}

impl Item {
    /// Materialize a template with a fresh random uid
    pub fn from_template(template: &ItemTemplate, rng: &mut impl Rng) -> Self {
        Self::with_uid(template, rng.gen())
    }

    /// Materialize a template with an explicit uid
    pub fn with_uid(template: &ItemTemplate, uid: u64) -> Self {
        Item {
            uid,
            template_id: template.id,
            name: template.name.clone(),
            kind: template.kind,
            slot: template.slot,
            rarity: template.rarity,
            icon_color: template.icon_color.clone(),
            item_level: template.item_level,
            stats: template.stats,
        }
    }

    /// Whether this item counts as a weapon for damage calculation
    pub fn is_weapon(&self) -> bool {
        self.kind == ItemKind::Weapon
    }

    /// Short base-36 rendering of the uid
    pub fn uid_string(&self) -> String {
        to_base36(self.uid)
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.name)?;
        match self.slot {
            Some(slot) => writeln!(f, "{} ({}, ilvl {})", slot, self.rarity, self.item_level)?,
            None => writeln!(f, "({}, ilvl {})", self.rarity, self.item_level)?,
        }

        if self.is_weapon() {
            writeln!(f, "  {} - {} Damage", self.stats.min_dmg, self.stats.max_dmg)?;
        } else if self.stats.has_damage() {
            writeln!(f, "  +{} - {} Damage", self.stats.min_dmg, self.stats.max_dmg)?;
        }

        for (label, value) in self.stats.lines() {
            writeln!(f, "  +{} {}", value, label)?;
        }

        Ok(())
    }
}
