//! Unit: a single combatant and its owned state

mod class;
mod gear;

pub use class::{ClassProfile, Regen, StartingResource, UnitClass};
pub use gear::{equip_from_bag, unequip, Equipment, Inventory, BAG_SIZE};

use crate::ai::AiMemory;
use crate::error::EquipError;
use crate::skill::SkillBook;
use crate::stats::{recalc_stats, Attributes};
use crate::types::{Buff, BuffKind, ResourceType, UnitId};
use item_core::{EquipSlot, Item};
use tracing::info;

/// A combatant, player-controlled or AI
#[derive(Debug, Clone)]
pub struct Unit {
    /// Arena index, assigned when the unit joins a roster
    pub id: UnitId,
    pub name: String,
    pub class: UnitClass,
    pub color: &'static str,

    // Geometry: top-left corner plus size
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,

    pub base: Attributes,
    pub current: Attributes,
    pub base_max_hp: f64,
    pub max_hp: f64,
    pub hp: f64,
    pub resource_type: ResourceType,
    pub base_max_resource: f64,
    pub max_resource: f64,
    pub resource: f64,
    pub unarmed_dmg: (i32, i32),
    pub min_dmg: i32,
    pub max_dmg: i32,

    pub target: Option<UnitId>,
    /// Ordered, at most one per kind
    pub buffs: Vec<Buff>,
    pub is_dead: bool,
    pub swing_timer: f64,
    pub swing_speed: f64,
    pub attack_range: f64,
    pub absorb_shield: f64,

    pub equipment: Equipment,
    pub inventory: Inventory,
    pub skills: SkillBook,
    pub ai: AiMemory,
}

impl Unit {
    /// Create a unit of the given class with its top-left corner at (x, y)
    pub fn new(class: UnitClass, x: f64, y: f64) -> Self {
        let profile = class.profile();
        let mut unit = Unit {
            id: UnitId(0),
            name: profile.name.to_string(),
            class,
            color: profile.color,
            x,
            y,
            width: profile.width,
            height: profile.height,
            speed: profile.speed,
            base: profile.base,
            current: profile.base,
            base_max_hp: profile.base_max_hp.unwrap_or(crate::config::constants().stats.base_max_hp),
            max_hp: 0.0,
            hp: 0.0,
            resource_type: profile.resource_type,
            base_max_resource: profile.base_max_resource,
            max_resource: 0.0,
            resource: 0.0,
            unarmed_dmg: profile.unarmed_dmg,
            min_dmg: 0,
            max_dmg: 0,
            target: None,
            buffs: Vec::new(),
            is_dead: false,
            swing_timer: profile.swing_speed,
            swing_speed: profile.swing_speed,
            attack_range: profile.attack_range,
            absorb_shield: 0.0,
            equipment: Equipment::new(),
            inventory: Inventory::new(),
            skills: SkillBook::for_class(class),
            ai: AiMemory::default(),
        };

        // Zero maxima make recalc start both pools full
        recalc_stats(&mut unit);
        if profile.starting_resource == StartingResource::Empty {
            unit.resource = 0.0;
        }
        unit
    }

    pub fn profile(&self) -> &'static ClassProfile {
        self.class.profile()
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Center-to-center distance
    pub fn distance_to(&self, other: &Unit) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (bx - ax).hypot(by - ay)
    }

    /// Distance from this unit's center to a point
    pub fn distance_to_point(&self, px: f64, py: f64) -> f64 {
        let (cx, cy) = self.center();
        (px - cx).hypot(py - cy)
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn hp_pct(&self) -> f64 {
        if self.max_hp > 0.0 {
            self.hp / self.max_hp
        } else {
            0.0
        }
    }

    /// Move speed after buffs
    pub fn effective_speed(&self) -> f64 {
        self.buffs
            .iter()
            .fold(self.speed, |speed, buff| speed * buff.kind.speed_multiplier())
    }

    /// Move by a direction vector scaled to effective speed
    pub fn step_towards(&mut self, dx: f64, dy: f64, dt: f64) {
        let len = dx.hypot(dy);
        if len <= f64::EPSILON {
            return;
        }
        let step = self.effective_speed() * dt;
        self.x += dx / len * step;
        self.y += dy / len * step;
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.iter().any(|b| b.kind == kind)
    }

    /// Apply a buff, or refresh its duration if already present
    pub fn apply_buff(&mut self, kind: BuffKind, duration: f64) {
        match self.buffs.iter_mut().find(|b| b.kind == kind) {
            Some(existing) => existing.remaining = duration,
            None => self.buffs.push(Buff::new(kind, duration)),
        }
    }

    pub fn remove_buff(&mut self, kind: BuffKind) {
        self.buffs.retain(|b| b.kind != kind);
    }

    /// Count down buff durations and drop expired ones. Returns what expired.
    pub fn tick_buffs(&mut self, dt: f64) -> Vec<BuffKind> {
        let mut expired = Vec::new();
        self.buffs.retain_mut(|buff| {
            buff.remaining -= dt;
            if buff.remaining > 0.0 {
                true
            } else {
                expired.push(buff.kind);
                false
            }
        });
        expired
    }

    /// Add (or with a negative amount, spend) resource, clamped to the pool
    pub fn add_resource(&mut self, amount: f64) {
        self.resource = (self.resource + amount).clamp(0.0, self.max_resource);
    }

    /// Apply passive regeneration or decay for `dt` seconds
    pub fn regenerate(&mut self, dt: f64) {
        match self.profile().regen {
            Regen::None => {}
            Regen::Rate { flat, per_spirit } => {
                if self.resource < self.max_resource {
                    let rate = flat + self.current.spirit as f64 * per_spirit;
                    self.add_resource(rate * dt);
                }
            }
            Regen::Decay(rate) => {
                if self.resource > 0.0 {
                    self.add_resource(-rate * dt);
                }
            }
        }
    }

    /// Count down every skill cooldown
    pub fn tick_cooldowns(&mut self, dt: f64) {
        self.skills.tick(dt);
    }

    /// Recompute derived stats from base attributes and equipment
    pub fn recalc_stats(&mut self) {
        recalc_stats(self);
    }

    /// Equip the item in a bag slot and recalculate
    pub fn equip_from_bag(&mut self, bag_index: usize) -> Result<EquipSlot, EquipError> {
        let slot = equip_from_bag(&mut self.equipment, &mut self.inventory, bag_index)?;
        self.recalc_stats();
        info!(unit = %self.name, %slot, "equipped item");
        Ok(slot)
    }

    /// Move an equipped item to the bag and recalculate
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<usize, EquipError> {
        let index = unequip(&mut self.equipment, &mut self.inventory, slot)?;
        self.recalc_stats();
        info!(unit = %self.name, %slot, "unequipped item");
        Ok(index)
    }

    /// Add an item to the bag
    pub fn give_item(&mut self, item: Item) -> Result<usize, EquipError> {
        self.inventory.add(item)
    }
}
