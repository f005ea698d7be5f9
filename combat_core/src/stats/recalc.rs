use super::{Attributes, GearTotals};
use crate::config::{constants, StatConstants};
use crate::types::ResourceType;
use crate::unit::Unit;

/// Output of a stat recalculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub current: Attributes,
    pub max_hp: f64,
    pub max_resource: f64,
    pub min_dmg: i32,
    pub max_dmg: i32,
}

/// Compute derived stats from a unit's base values and equipment
pub fn derive_stats(unit: &Unit, stat_constants: &StatConstants) -> DerivedStats {
    let gear = GearTotals::collect(unit.equipment.slots());

    // Step 1: Attributes
    let mut current = unit.base;
    current.add_bonuses_from(&gear.attributes);

    // Step 2: Pools
    let max_hp = unit.base_max_hp + current.stamina as f64 * stat_constants.hp_per_stamina;
    let max_resource = match unit.resource_type {
        ResourceType::None => 0.0,
        ResourceType::Mana => {
            unit.base_max_resource + current.intellect as f64 * stat_constants.mana_per_intellect
        }
        ResourceType::Rage | ResourceType::Energy | ResourceType::Focus => unit.base_max_resource,
    };

    // Step 3: Damage range
    let scaling = unit.class.scaling();
    let (min_dmg, max_dmg) = match gear.weapon {
        Some((weapon_min, weapon_max)) => {
            let bonus = scaling.weapon_bonus(&current, stat_constants);
            (
                weapon_min + gear.bonus_min_dmg + bonus,
                weapon_max + gear.bonus_max_dmg + bonus,
            )
        }
        None => {
            let bonus = scaling.unarmed_bonus(&current, stat_constants);
            (
                unit.unarmed_dmg.0 + gear.bonus_min_dmg + bonus,
                unit.unarmed_dmg.1 + gear.bonus_max_dmg + bonus,
            )
        }
    };

    DerivedStats {
        current,
        max_hp,
        max_resource,
        min_dmg,
        max_dmg,
    }
}

/// Recompute a unit's derived stats, keeping hp and resource at the same
/// percentage of their maximum
pub fn recalc_stats(unit: &mut Unit) {
    let hp_pct = if unit.max_hp > 0.0 {
        unit.hp / unit.max_hp
    } else {
        1.0
    };
    let resource_pct = if unit.max_resource > 0.0 {
        unit.resource / unit.max_resource
    } else {
        1.0
    };

    let derived = derive_stats(unit, &constants().stats);

    unit.current = derived.current;
    unit.max_hp = derived.max_hp.max(0.0);
    unit.max_resource = derived.max_resource.max(0.0);
    unit.min_dmg = derived.min_dmg.max(0);
    unit.max_dmg = derived.max_dmg.max(unit.min_dmg);

    unit.hp = (unit.max_hp * hp_pct).clamp(0.0, unit.max_hp);
    unit.resource = (unit.max_resource * resource_pct).clamp(0.0, unit.max_resource);
}
