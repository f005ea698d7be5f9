use super::Attributes;
use crate::config::StatConstants;

/// How a class turns attributes into flat auto-attack damage
pub trait DamageScalingPolicy: Send + Sync {
    /// Bonus added to both ends of the damage range while wielding a weapon
    fn weapon_bonus(&self, attributes: &Attributes, constants: &StatConstants) -> i32;

    /// Bonus added while fighting unarmed
    fn unarmed_bonus(&self, attributes: &Attributes, constants: &StatConstants) -> i32;
}

/// Floored division; a non-positive divisor contributes nothing
fn floor_div(value: i32, divisor: i32) -> i32 {
    if divisor <= 0 {
        return 0;
    }
    value.div_euclid(divisor)
}

/// Strength-based scaling for melee classes
#[derive(Debug, Clone, Copy, Default)]
pub struct MeleeScaling;

impl DamageScalingPolicy for MeleeScaling {
    fn weapon_bonus(&self, attributes: &Attributes, constants: &StatConstants) -> i32 {
        floor_div(attributes.strength, constants.weapon_strength_divisor)
    }

    fn unarmed_bonus(&self, attributes: &Attributes, constants: &StatConstants) -> i32 {
        floor_div(attributes.strength, constants.unarmed_strength_divisor)
    }
}

/// Intellect-based scaling for casters
#[derive(Debug, Clone, Copy, Default)]
pub struct CasterScaling;

impl DamageScalingPolicy for CasterScaling {
    fn weapon_bonus(&self, attributes: &Attributes, constants: &StatConstants) -> i32 {
        floor_div(attributes.intellect, constants.weapon_intellect_divisor)
    }

    fn unarmed_bonus(&self, attributes: &Attributes, constants: &StatConstants) -> i32 {
        floor_div(attributes.intellect, constants.unarmed_intellect_divisor)
    }
}

/// No attribute contribution
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScaling;

impl DamageScalingPolicy for NoScaling {
    fn weapon_bonus(&self, _: &Attributes, _: &StatConstants) -> i32 {
        0
    }

    fn unarmed_bonus(&self, _: &Attributes, _: &StatConstants) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_scaling_floors() {
        let constants = StatConstants::default();
        let attrs = Attributes::new(25, 0, 0, 0, 0);
        assert_eq!(MeleeScaling.weapon_bonus(&attrs, &constants), 12);
        assert_eq!(MeleeScaling.unarmed_bonus(&attrs, &constants), 8);
    }

    #[test]
    fn test_caster_scaling_floors() {
        let constants = StatConstants::default();
        let attrs = Attributes::new(0, 0, 0, 23, 0);
        assert_eq!(CasterScaling.weapon_bonus(&attrs, &constants), 5);
        assert_eq!(CasterScaling.unarmed_bonus(&attrs, &constants), 4);
        assert_eq!(NoScaling.weapon_bonus(&attrs, &constants), 0);
    }
}
