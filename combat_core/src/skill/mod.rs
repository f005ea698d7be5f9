//! SkillEngine: skill definitions, per-class effect tables, cast
//! validation and effect dispatch

mod cast;
mod effects;
pub mod tables;

pub use cast::{cast, validate_cast};
pub use effects::apply_effects;

use crate::types::BuffKind;
use crate::unit::UnitClass;
use serde::Serialize;
use std::collections::BTreeMap;

/// Whether a skill takes a target or always hits the caster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CastType {
    Target,
    SelfCast,
}

/// Which units a targeted skill accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Enemy,
    Friend,
    SelfOnly,
}

/// Who an effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Caster,
    Target,
}

/// One step of a skill's effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillEffect {
    /// Jump to the target, stopping short of its center
    Charge,
    /// Flat resource gain for the caster
    GainResource(f64),
    /// Next auto-attack is ready immediately
    ResetSwingTimer,
    /// Target switches its attention to the caster
    Taunt,
    ApplyBuff {
        kind: BuffKind,
        duration: f64,
        on: Recipient,
    },
    /// Instant damage to the target
    Damage(f64),
    /// Damage applied when a projectile reaches the target
    Projectile { multiplier: f64, speed: f64 },
    Heal(f64),
    /// Absorb pool of `base + per_intellect * caster intellect`
    Shield { base: f64, per_intellect: f64 },
    /// Damage (and optionally a debuff) to every live enemy near the caster
    EnemyNova {
        radius: f64,
        multiplier: f64,
        debuff: Option<(BuffKind, f64)>,
    },
    /// Heal every live party member near the caster
    PartyNova { radius: f64, amount: f64 },
}

/// Static description of a skill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillDef {
    pub id: u8,
    pub name: &'static str,
    pub cast_type: CastType,
    pub target_type: TargetType,
    pub cost: f64,
    /// 0 disables the bound
    pub range_min: f64,
    /// 0 disables the bound
    pub range_max: f64,
    pub cooldown: f64,
    pub color: &'static str,
    pub effects: &'static [SkillEffect],
}

/// Per-class skill definitions
pub trait SkillEffectTable: Send + Sync {
    fn definitions(&self) -> &'static [SkillDef];

    fn definition(&self, skill_id: u8) -> Option<&'static SkillDef> {
        self.definitions().iter().find(|def| def.id == skill_id)
    }

    fn effects(&self, skill_id: u8) -> &'static [SkillEffect] {
        self.definition(skill_id).map(|def| def.effects).unwrap_or(&[])
    }
}

/// A unit's copy of a skill with its own cooldown
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub def: &'static SkillDef,
    pub current_cd: f64,
}

impl Skill {
    pub fn new(def: &'static SkillDef) -> Self {
        Skill {
            def,
            current_cd: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.current_cd <= 0.0
    }
}

/// Skills owned by one unit, keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillBook {
    skills: BTreeMap<u8, Skill>,
}

impl SkillBook {
    pub fn for_class(class: UnitClass) -> Self {
        let skills = class
            .skill_table()
            .definitions()
            .iter()
            .map(|def| (def.id, Skill::new(def)))
            .collect();
        SkillBook { skills }
    }

    pub fn get(&self, id: u8) -> Option<&Skill> {
        self.skills.get(&id)
    }

    pub fn get_mut(&mut self, id: u8) -> Option<&mut Skill> {
        self.skills.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Whether the skill exists and is off cooldown
    pub fn is_ready(&self, id: u8) -> bool {
        self.get(id).is_some_and(Skill::is_ready)
    }

    /// Count every cooldown toward zero
    pub fn tick(&mut self, dt: f64) {
        for skill in self.skills.values_mut() {
            skill.current_cd = (skill.current_cd - dt).max(0.0);
        }
    }
}
