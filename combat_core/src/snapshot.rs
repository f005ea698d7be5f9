//! Read-only per-unit views for renderers and the JSON dump

use crate::types::{Buff, ResourceType, UnitId};
use crate::unit::{Unit, UnitClass};
use item_core::{EquipSlot, Item};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillSnapshot {
    pub id: u8,
    pub name: &'static str,
    pub cooldown: f64,
    pub current_cd: f64,
    pub cost: f64,
    pub color: &'static str,
}

/// Everything a view needs to draw one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub name: String,
    pub class: UnitClass,
    pub color: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub resource_type: ResourceType,
    pub resource: f64,
    pub max_resource: f64,
    pub min_dmg: i32,
    pub max_dmg: i32,
    pub buffs: Vec<Buff>,
    pub is_dead: bool,
    pub swing_timer: f64,
    pub swing_speed: f64,
    pub target: Option<UnitId>,
    pub absorb_shield: f64,
    pub skills: Vec<SkillSnapshot>,
    pub equipment: BTreeMap<EquipSlot, Item>,
    /// Bag contents by slot index; `None` for empty slots
    pub inventory: Vec<Option<Item>>,
}

impl UnitSnapshot {
    pub fn from_unit(unit: &Unit) -> Self {
        UnitSnapshot {
            id: unit.id,
            name: unit.name.clone(),
            class: unit.class,
            color: unit.color,
            x: unit.x,
            y: unit.y,
            width: unit.width,
            height: unit.height,
            hp: unit.hp,
            max_hp: unit.max_hp,
            resource_type: unit.resource_type,
            resource: unit.resource,
            max_resource: unit.max_resource,
            min_dmg: unit.min_dmg,
            max_dmg: unit.max_dmg,
            buffs: unit.buffs.clone(),
            is_dead: unit.is_dead,
            swing_timer: unit.swing_timer,
            swing_speed: unit.swing_speed,
            target: unit.target,
            absorb_shield: unit.absorb_shield,
            skills: unit
                .skills
                .iter()
                .map(|skill| SkillSnapshot {
                    id: skill.def.id,
                    name: skill.def.name,
                    cooldown: skill.def.cooldown,
                    current_cd: skill.current_cd,
                    cost: skill.def.cost,
                    color: skill.def.color,
                })
                .collect(),
            equipment: unit.equipment.slots().clone(),
            inventory: unit.inventory.slots().to_vec(),
        }
    }

    /// One-line status for console output
    pub fn summary(&self) -> String {
        let state = if self.is_dead { " [dead]" } else { "" };
        format!(
            "{} {}: {:.0}/{:.0} hp, {:.0}/{:.0} {}{}",
            self.id, self.name, self.hp, self.max_hp, self.resource, self.max_resource, self.resource_type, state
        )
    }
}

/// Serialize a set of snapshots as pretty JSON
pub fn to_json(snapshots: &[UnitSnapshot]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::ItemRegistry;

    #[test]
    fn test_snapshot_reflects_unit() {
        crate::config::ensure_constants_initialized();
        let mut unit = Unit::new(UnitClass::Priest, 10.0, 20.0);
        let template = ItemRegistry::builtin().get(201).unwrap().clone();
        unit.give_item(Item::with_uid(&template, 1)).unwrap();

        let snap = UnitSnapshot::from_unit(&unit);
        assert_eq!(snap.skills.len(), 3);
        assert_eq!(snap.skills[1].name, "Power Word: Shield");
        assert_eq!(snap.inventory.len(), crate::unit::BAG_SIZE);
        assert!(snap.inventory[0].is_some());
        assert!(snap.summary().contains("mana"));
    }

    #[test]
    fn test_json_dump() {
        crate::config::ensure_constants_initialized();
        let unit = Unit::new(UnitClass::Warrior, 0.0, 0.0);
        let json = to_json(&[UnitSnapshot::from_unit(&unit)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["class"], "warrior");
        assert_eq!(value[0]["resource_type"], "rage");
        assert_eq!(value[0]["skills"][0]["name"], "Charge");
    }
}
