//! Class variants and their fixed profiles

use crate::skill::{tables, SkillEffectTable};
use crate::stats::{Attributes, CasterScaling, DamageScalingPolicy, MeleeScaling, NoScaling};
use crate::types::ResourceType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of combatant classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    Warrior,
    Mage,
    Priest,
    Rogue,
    Hunter,
    TrainingDummy,
}

/// How full the resource pool starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartingResource {
    Empty,
    Full,
}

/// Passive resource change per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regen {
    None,
    /// Flat amount plus a per-spirit amount
    Rate { flat: f64, per_spirit: f64 },
    /// Drains toward zero
    Decay(f64),
}

/// Fixed per-class numbers used at construction and by the AI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProfile {
    pub name: &'static str,
    pub color: &'static str,
    pub width: f64,
    pub height: f64,
    pub base: Attributes,
    pub base_max_hp: Option<f64>,
    pub resource_type: ResourceType,
    pub base_max_resource: f64,
    pub starting_resource: StartingResource,
    pub regen: Regen,
    pub unarmed_dmg: (i32, i32),
    pub swing_speed: f64,
    pub attack_range: f64,
    pub speed: f64,
    /// Distance kept from the leader while not engaged
    pub follow_distance: f64,
    /// Distance band the AI tries to hold from its target
    pub optimal_range: (f64, f64),
}

const WARRIOR: ClassProfile = ClassProfile {
    name: "Warrior",
    color: "#C79C6E",
    width: 32.0,
    height: 32.0,
    base: Attributes::new(20, 10, 25, 5, 5),
    base_max_hp: None,
    resource_type: ResourceType::Rage,
    base_max_resource: 100.0,
    starting_resource: StartingResource::Empty,
    regen: Regen::Decay(1.0),
    unarmed_dmg: (5, 10),
    swing_speed: 2.0,
    attack_range: 80.0,
    speed: 200.0,
    follow_distance: 100.0,
    optimal_range: (60.0, 90.0),
};

const MAGE: ClassProfile = ClassProfile {
    name: "Mage",
    color: "#69CCF0",
    width: 32.0,
    height: 32.0,
    base: Attributes::new(5, 10, 15, 25, 15),
    base_max_hp: None,
    resource_type: ResourceType::Mana,
    base_max_resource: 1000.0,
    starting_resource: StartingResource::Full,
    regen: Regen::Rate {
        flat: 10.0,
        per_spirit: 0.5,
    },
    unarmed_dmg: (5, 10),
    swing_speed: 2.0,
    attack_range: 400.0,
    speed: 180.0,
    follow_distance: 100.0,
    optimal_range: (200.0, 350.0),
};

const PRIEST: ClassProfile = ClassProfile {
    name: "Priest",
    color: "#FFFFFF",
    width: 32.0,
    height: 32.0,
    base: Attributes::new(5, 10, 15, 20, 25),
    base_max_hp: None,
    resource_type: ResourceType::Mana,
    base_max_resource: 1200.0,
    starting_resource: StartingResource::Full,
    regen: Regen::Rate {
        flat: 15.0,
        per_spirit: 0.5,
    },
    unarmed_dmg: (5, 10),
    swing_speed: 2.0,
    attack_range: 400.0,
    speed: 180.0,
    follow_distance: 100.0,
    optimal_range: (300.0, 400.0),
};

const ROGUE: ClassProfile = ClassProfile {
    name: "Rogue",
    color: "#FFF569",
    width: 32.0,
    height: 32.0,
    base: Attributes::new(10, 25, 20, 5, 5),
    base_max_hp: None,
    resource_type: ResourceType::Energy,
    base_max_resource: 100.0,
    starting_resource: StartingResource::Full,
    regen: Regen::Rate {
        flat: 10.0,
        per_spirit: 0.0,
    },
    unarmed_dmg: (5, 10),
    swing_speed: 1.6,
    attack_range: 80.0,
    speed: 200.0,
    follow_distance: 100.0,
    optimal_range: (60.0, 80.0),
};

const HUNTER: ClassProfile = ClassProfile {
    name: "Hunter",
    color: "#ABD473",
    width: 32.0,
    height: 32.0,
    base: Attributes::new(12, 24, 20, 8, 8),
    base_max_hp: None,
    resource_type: ResourceType::Focus,
    base_max_resource: 100.0,
    starting_resource: StartingResource::Full,
    regen: Regen::Rate {
        flat: 5.0,
        per_spirit: 0.0,
    },
    unarmed_dmg: (5, 10),
    swing_speed: 2.0,
    attack_range: 150.0,
    speed: 190.0,
    follow_distance: 120.0,
    optimal_range: (80.0, 150.0),
};

const TRAINING_DUMMY: ClassProfile = ClassProfile {
    name: "Training Dummy",
    color: "#8B4513",
    width: 48.0,
    height: 64.0,
    base: Attributes::new(0, 0, 0, 0, 0),
    base_max_hp: Some(100_000.0),
    resource_type: ResourceType::None,
    base_max_resource: 0.0,
    starting_resource: StartingResource::Empty,
    regen: Regen::None,
    unarmed_dmg: (50, 80),
    swing_speed: 2.0,
    attack_range: 80.0,
    speed: 0.0,
    follow_distance: 0.0,
    optimal_range: (0.0, 80.0),
};

impl UnitClass {
    /// All player-selectable classes
    pub fn playable() -> &'static [UnitClass] {
        &[
            UnitClass::Warrior,
            UnitClass::Mage,
            UnitClass::Priest,
            UnitClass::Rogue,
            UnitClass::Hunter,
        ]
    }

    pub fn profile(&self) -> &'static ClassProfile {
        match self {
            UnitClass::Warrior => &WARRIOR,
            UnitClass::Mage => &MAGE,
            UnitClass::Priest => &PRIEST,
            UnitClass::Rogue => &ROGUE,
            UnitClass::Hunter => &HUNTER,
            UnitClass::TrainingDummy => &TRAINING_DUMMY,
        }
    }

    /// Attribute-to-damage policy
    pub fn scaling(&self) -> &'static dyn DamageScalingPolicy {
        match self {
            UnitClass::Warrior => &MeleeScaling,
            UnitClass::Mage | UnitClass::Priest => &CasterScaling,
            UnitClass::Rogue | UnitClass::Hunter | UnitClass::TrainingDummy => &NoScaling,
        }
    }

    /// Skill definitions and effects for this class
    pub fn skill_table(&self) -> &'static dyn SkillEffectTable {
        match self {
            UnitClass::Warrior => &tables::WarriorSkills,
            UnitClass::Mage => &tables::MageSkills,
            UnitClass::Priest => &tables::PriestSkills,
            UnitClass::Rogue => &tables::RogueSkills,
            UnitClass::Hunter => &tables::HunterSkills,
            UnitClass::TrainingDummy => &tables::NoSkills,
        }
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().name)
    }
}
