//! Skill definitions for every class

use super::{CastType, Recipient, SkillDef, SkillEffect, SkillEffectTable, TargetType};
use crate::types::BuffKind;

pub struct WarriorSkills;
pub struct MageSkills;
pub struct PriestSkills;
pub struct RogueSkills;
pub struct HunterSkills;
/// Classes without an action bar
pub struct NoSkills;

static WARRIOR: [SkillDef; 3] = [
    SkillDef {
        id: 1,
        name: "Charge",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 0.0,
        range_min: 0.0,
        range_max: 800.0,
        cooldown: 15.0,
        color: "#a52a2a",
        effects: &[
            SkillEffect::Charge,
            SkillEffect::GainResource(20.0),
            SkillEffect::ResetSwingTimer,
        ],
    },
    SkillDef {
        id: 2,
        name: "Taunt",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 10.0,
        range_min: 0.0,
        range_max: 200.0,
        cooldown: 8.0,
        color: "#ff4500",
        effects: &[SkillEffect::Taunt],
    },
    SkillDef {
        id: 3,
        name: "Shield Wall",
        cast_type: CastType::SelfCast,
        target_type: TargetType::SelfOnly,
        cost: 30.0,
        range_min: 0.0,
        range_max: 0.0,
        cooldown: 60.0,
        color: "#808080",
        effects: &[SkillEffect::ApplyBuff {
            kind: BuffKind::ShieldWall,
            duration: 10.0,
            on: Recipient::Caster,
        }],
    },
];

static MAGE: [SkillDef; 3] = [
    SkillDef {
        id: 1,
        name: "Fireball",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 150.0,
        range_min: 0.0,
        range_max: 400.0,
        cooldown: 2.5,
        color: "#e67e22",
        effects: &[SkillEffect::Projectile {
            multiplier: 2.5,
            speed: 500.0,
        }],
    },
    SkillDef {
        id: 2,
        name: "Fire Blast",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 100.0,
        range_min: 0.0,
        range_max: 300.0,
        cooldown: 8.0,
        color: "#ff5722",
        effects: &[SkillEffect::Damage(1.8)],
    },
    SkillDef {
        id: 3,
        name: "Frost Nova",
        cast_type: CastType::SelfCast,
        target_type: TargetType::SelfOnly,
        cost: 120.0,
        range_min: 0.0,
        range_max: 0.0,
        cooldown: 20.0,
        color: "#a0e9ff",
        effects: &[SkillEffect::EnemyNova {
            radius: 150.0,
            multiplier: 0.5,
            debuff: Some((BuffKind::Frozen, 4.0)),
        }],
    },
];

static PRIEST: [SkillDef; 3] = [
    SkillDef {
        id: 1,
        name: "Heal",
        cast_type: CastType::Target,
        target_type: TargetType::Friend,
        cost: 200.0,
        range_min: 0.0,
        range_max: 500.0,
        cooldown: 3.0,
        color: "#2ecc71",
        effects: &[SkillEffect::Heal(150.0)],
    },
    SkillDef {
        id: 2,
        name: "Power Word: Shield",
        cast_type: CastType::Target,
        target_type: TargetType::Friend,
        cost: 150.0,
        range_min: 0.0,
        range_max: 500.0,
        cooldown: 6.0,
        color: "#f1c40f",
        effects: &[
            SkillEffect::Shield {
                base: 100.0,
                per_intellect: 5.0,
            },
            SkillEffect::ApplyBuff {
                kind: BuffKind::PowerWordShield,
                duration: 15.0,
                on: Recipient::Target,
            },
        ],
    },
    SkillDef {
        id: 3,
        name: "Holy Nova",
        cast_type: CastType::SelfCast,
        target_type: TargetType::SelfOnly,
        cost: 250.0,
        range_min: 0.0,
        range_max: 0.0,
        cooldown: 10.0,
        color: "#fff3b0",
        effects: &[
            SkillEffect::PartyNova {
                radius: 200.0,
                amount: 80.0,
            },
            SkillEffect::EnemyNova {
                radius: 200.0,
                multiplier: 0.8,
                debuff: None,
            },
        ],
    },
];

static ROGUE: [SkillDef; 3] = [
    SkillDef {
        id: 1,
        name: "Sinister Strike",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 40.0,
        range_min: 0.0,
        range_max: 80.0,
        cooldown: 1.5,
        color: "#c0392b",
        effects: &[SkillEffect::Damage(1.5)],
    },
    SkillDef {
        id: 2,
        name: "Eviscerate",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 35.0,
        range_min: 0.0,
        range_max: 80.0,
        cooldown: 5.0,
        color: "#8e44ad",
        effects: &[SkillEffect::Damage(2.5)],
    },
    SkillDef {
        id: 3,
        name: "Sprint",
        cast_type: CastType::SelfCast,
        target_type: TargetType::SelfOnly,
        cost: 0.0,
        range_min: 0.0,
        range_max: 0.0,
        cooldown: 30.0,
        color: "#00FFFF",
        effects: &[SkillEffect::ApplyBuff {
            kind: BuffKind::Sprint,
            duration: 8.0,
            on: Recipient::Caster,
        }],
    },
];

static HUNTER: [SkillDef; 3] = [
    SkillDef {
        id: 1,
        name: "Arcane Shot",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 30.0,
        range_min: 0.0,
        range_max: 150.0,
        cooldown: 1.5,
        color: "#00CCFF",
        effects: &[SkillEffect::Projectile {
            multiplier: 1.6,
            speed: 700.0,
        }],
    },
    SkillDef {
        id: 2,
        name: "Steady Shot",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 0.0,
        range_min: 0.0,
        range_max: 150.0,
        cooldown: 2.0,
        color: "#AAAAAA",
        effects: &[SkillEffect::Damage(1.0), SkillEffect::GainResource(10.0)],
    },
    SkillDef {
        id: 3,
        name: "Concussive Shot",
        cast_type: CastType::Target,
        target_type: TargetType::Enemy,
        cost: 20.0,
        range_min: 0.0,
        range_max: 150.0,
        cooldown: 10.0,
        color: "#FFD700",
        effects: &[
            SkillEffect::Damage(0.5),
            SkillEffect::ApplyBuff {
                kind: BuffKind::Dazed,
                duration: 4.0,
                on: Recipient::Target,
            },
        ],
    },
];

impl SkillEffectTable for WarriorSkills {
    fn definitions(&self) -> &'static [SkillDef] {
        &WARRIOR
    }
}

impl SkillEffectTable for MageSkills {
    fn definitions(&self) -> &'static [SkillDef] {
        &MAGE
    }
}

impl SkillEffectTable for PriestSkills {
    fn definitions(&self) -> &'static [SkillDef] {
        &PRIEST
    }
}

impl SkillEffectTable for RogueSkills {
    fn definitions(&self) -> &'static [SkillDef] {
        &ROGUE
    }
}

impl SkillEffectTable for HunterSkills {
    fn definitions(&self) -> &'static [SkillDef] {
        &HUNTER
    }
}

impl SkillEffectTable for NoSkills {
    fn definitions(&self) -> &'static [SkillDef] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_one_to_three() {
        let tables: [&dyn SkillEffectTable; 5] =
            [&WarriorSkills, &MageSkills, &PriestSkills, &RogueSkills, &HunterSkills];
        for table in tables {
            let ids: Vec<u8> = table.definitions().iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_self_casts_have_no_range() {
        let tables: [&dyn SkillEffectTable; 5] =
            [&WarriorSkills, &MageSkills, &PriestSkills, &RogueSkills, &HunterSkills];
        for table in tables {
            for def in table.definitions() {
                if def.cast_type == CastType::SelfCast {
                    assert_eq!(def.target_type, TargetType::SelfOnly, "{}", def.name);
                    assert_eq!(def.range_max, 0.0, "{}", def.name);
                }
            }
        }
    }

    #[test]
    fn test_effect_lookup() {
        assert_eq!(WarriorSkills.effects(1).len(), 3);
        assert!(WarriorSkills.effects(7).is_empty());
        assert_eq!(
            HunterSkills.effects(2),
            &[SkillEffect::Damage(1.0), SkillEffect::GainResource(10.0)]
        );
    }
}
