//! Damage resolution - apply a hit or heal to a unit

use crate::config::{constants, CombatConstants};
use crate::events::{LogKind, COLOR_ABSORB, COLOR_BLOCK, COLOR_DAMAGE, COLOR_HEAL};
use crate::types::{BuffKind, ResourceType, UnitId};
use crate::unit::Unit;
use crate::world::TickContext;
use rand::Rng;
use tracing::{debug, info};

/// Outcome of one damage application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitReport {
    /// Damage before mitigation
    pub raw: i32,
    /// Shield Wall reduced the hit
    pub blocked: bool,
    /// Amount eaten by the absorb shield
    pub absorbed: i32,
    /// Damage that reached hp
    pub damage: i32,
    /// The shield ate the whole hit; nothing else happened
    pub fully_absorbed: bool,
    pub killed: bool,
}

/// Result of running a hit through mitigation and absorption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mitigation {
    pub blocked: bool,
    /// An absorb shield was up when the hit arrived
    pub shielded: bool,
    pub absorbed: i32,
    /// Damage left for hp
    pub remaining: i32,
}

/// Roll `floor(min + r * (max - min))`, then apply the multiplier and floor again
pub fn roll_damage<R: Rng + ?Sized>(min: i32, max: i32, multiplier: f64, rng: &mut R) -> i32 {
    let span = (max - min).max(0) as f64;
    let raw = (min as f64 + rng.gen::<f64>() * span).floor();
    ((raw * multiplier).floor() as i32).max(0)
}

/// Run a hit through Shield Wall and the absorb shield. Only the shield
/// pool is mutated.
pub fn mitigate(target: &mut Unit, damage: i32, combat: &CombatConstants) -> Mitigation {
    let mut remaining = damage.max(0);

    // Step 1: Damage reduction buff
    let blocked = target.has_buff(BuffKind::ShieldWall);
    if blocked {
        remaining = (remaining as f64 * combat.shield_wall_multiplier).floor() as i32;
    }

    // Step 2: Absorption
    let mut absorbed = 0;
    let shielded = target.absorb_shield > 0.0;
    if shielded {
        if target.absorb_shield >= remaining as f64 {
            absorbed = remaining;
            target.absorb_shield -= remaining as f64;
            remaining = 0;
        } else {
            absorbed = target.absorb_shield.floor() as i32;
            remaining -= target.absorb_shield.floor() as i32;
            target.absorb_shield = 0.0;
        }
        if target.absorb_shield <= 0.0 {
            target.remove_buff(BuffKind::PowerWordShield);
        }
    }

    Mitigation {
        blocked,
        shielded,
        absorbed,
        remaining,
    }
}

/// Roll the source's damage range and apply it to the target
///
/// Returns `None` when either unit is missing or the target is already dead.
pub fn deal_damage(
    ctx: &mut TickContext<'_>,
    source: UnitId,
    target: UnitId,
    multiplier: f64,
) -> Option<HitReport> {
    let (min, max) = {
        let attacker = ctx.units.get(source)?;
        (attacker.min_dmg, attacker.max_dmg)
    };
    if !ctx.units.get(target)?.is_alive() {
        return None;
    }

    let raw = roll_damage(min, max, multiplier, &mut *ctx.rng);
    apply_damage(ctx, source, target, raw)
}

/// Apply an already-rolled hit of `raw` damage from `source` to `target`
pub fn apply_damage(
    ctx: &mut TickContext<'_>,
    source: UnitId,
    target: UnitId,
    raw: i32,
) -> Option<HitReport> {
    let combat = &constants().combat;
    let source_name = ctx.units.get(source)?.name.clone();
    let now = ctx.clock;

    let mut report = HitReport {
        raw,
        ..Default::default()
    };

    {
        let defender = ctx.units.get_mut(target)?;
        if defender.is_dead {
            return None;
        }

        let mitigation = mitigate(defender, raw, combat);
        report.blocked = mitigation.blocked;
        report.absorbed = mitigation.absorbed;
        let (tx, ty) = (defender.x, defender.y);

        if mitigation.blocked {
            ctx.events.text(tx, ty - 40.0, "Blocked", COLOR_BLOCK);
        }

        // A fully absorbed hit ends here: no hp loss, no rage, no hit line
        if mitigation.remaining == 0 && mitigation.shielded {
            report.fully_absorbed = true;
            ctx.events
                .text(tx, ty - 20.0, format!("Absorbed ({})", mitigation.absorbed), COLOR_ABSORB);
            ctx.events.log(
                now,
                LogKind::Absorb,
                format!("{} absorbs {} damage from {}", defender.name, mitigation.absorbed, source_name),
            );
            return Some(report);
        }
        if mitigation.absorbed > 0 {
            ctx.events
                .text(tx, ty - 20.0, format!("Absorbed ({})", mitigation.absorbed), COLOR_ABSORB);
        }

        // Step 3: Hp
        let damage = mitigation.remaining;
        report.damage = damage;
        defender.hp = (defender.hp - damage as f64).max(0.0);

        // Step 4: Rage from damage taken
        if defender.resource_type == ResourceType::Rage && damage > 0 && combat.rage_taken_divisor > 0 {
            defender.add_resource((damage / combat.rage_taken_divisor) as f64);
        }

        // Step 5: Death
        if defender.hp <= 0.0 {
            defender.hp = 0.0;
            defender.is_dead = true;
            report.killed = true;
        }

        let text = if mitigation.blocked {
            format!("{} (blocked)", damage)
        } else {
            damage.to_string()
        };
        ctx.events.text(tx, ty - 30.0, text, COLOR_DAMAGE);
        let kind = if mitigation.blocked {
            LogKind::Block
        } else {
            LogKind::Damage
        };
        let suffix = if mitigation.blocked { " (blocked)" } else { "" };
        ctx.events.log(
            now,
            kind,
            format!("{} hits {} for {}{}", source_name, defender.name, damage, suffix),
        );

        if report.killed {
            ctx.events
                .log(now, LogKind::Death, format!("{} has died", defender.name));
            info!(unit = %defender.name, killer = %source_name, "unit died");
        }
    }

    // Step 6: Rage for the attacker
    if let Some(attacker) = ctx.units.get_mut(source) {
        if attacker.resource_type == ResourceType::Rage {
            attacker.add_resource(combat.rage_per_hit);
        }
    }

    debug!(source = %source, target = %target, ?report, "damage applied");
    Some(report)
}

/// Heal the target, clamped to its max hp. Returns the amount restored, or
/// `None` if the target is missing or dead.
pub fn heal(ctx: &mut TickContext<'_>, source: UnitId, target: UnitId, amount: f64) -> Option<f64> {
    let source_name = ctx.units.get(source)?.name.clone();
    let now = ctx.clock;
    let patient = ctx.units.get_mut(target)?;
    if patient.is_dead {
        return None;
    }

    let before = patient.hp;
    patient.hp = (patient.hp + amount.max(0.0)).clamp(0.0, patient.max_hp);
    let restored = patient.hp - before;

    ctx.events
        .text(patient.x, patient.y - 30.0, format!("+{}", amount.floor()), COLOR_HEAL);
    ctx.events.log(
        now,
        LogKind::Heal,
        format!("{} heals {} for {}", source_name, patient.name, amount.floor()),
    );
    Some(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitClass;
    use crate::world::World;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (World, UnitId, UnitId) {
        crate::config::ensure_constants_initialized();
        let mut world = World::new(7);
        let warrior = world.add_party_member(Unit::new(UnitClass::Warrior, 0.0, 0.0));
        let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 40.0, 0.0));
        (world, warrior, dummy)
    }

    #[test]
    fn test_roll_damage_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let dmg = roll_damage(50, 80, 1.0, &mut rng);
            assert!((50..80).contains(&dmg));
        }
        assert_eq!(roll_damage(30, 30, 1.0, &mut rng), 30);
        assert_eq!(roll_damage(10, 10, 2.5, &mut rng), 25);
    }

    #[test]
    fn test_mitigate_shield_wall() {
        let (mut world, warrior, _) = setup();
        let unit = world.unit_mut(warrior).unwrap();
        unit.apply_buff(BuffKind::ShieldWall, 10.0);
        let result = mitigate(unit, 100, &CombatConstants::default());
        assert!(result.blocked);
        assert_eq!(result.remaining, 25);
    }

    #[test]
    fn test_full_absorb_short_circuits() {
        let (mut world, warrior, dummy) = setup();
        world.unit_mut(warrior).unwrap().absorb_shield = 50.0;
        let hp_before = world.unit(warrior).unwrap().hp;

        let mut ctx = world.context();
        let report = apply_damage(&mut ctx, dummy, warrior, 30).unwrap();

        assert!(report.fully_absorbed);
        let unit = world.unit(warrior).unwrap();
        assert_eq!(unit.hp, hp_before);
        assert_eq!(unit.absorb_shield, 20.0);
        assert_eq!(unit.resource, 0.0);
    }

    #[test]
    fn test_zero_damage_into_shield_is_absorbed() {
        let (mut world, warrior, dummy) = setup();
        world.unit_mut(warrior).unwrap().absorb_shield = 10.0;
        world.unit_mut(warrior).unwrap().apply_buff(BuffKind::PowerWordShield, 15.0);
        let hp_before = world.unit(warrior).unwrap().hp;

        let mut ctx = world.context();
        let report = apply_damage(&mut ctx, warrior, dummy, 0).unwrap();
        assert!(!report.fully_absorbed);

        let mut ctx = world.context();
        let report = apply_damage(&mut ctx, dummy, warrior, 0).unwrap();
        assert!(report.fully_absorbed);
        assert_eq!(report.damage, 0);

        let unit = world.unit(warrior).unwrap();
        assert_eq!(unit.hp, hp_before);
        assert_eq!(unit.absorb_shield, 10.0);
        assert!(unit.has_buff(BuffKind::PowerWordShield));
        // Only the warrior's own swing at the dummy granted rage
        assert!((unit.resource - 15.0).abs() < 1e-9);

        let kinds: Vec<LogKind> = world.events().log_entries().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![LogKind::Damage, LogKind::Absorb]);
    }

    #[test]
    fn test_partial_absorb() {
        let (mut world, warrior, dummy) = setup();
        world.unit_mut(warrior).unwrap().absorb_shield = 20.0;
        let hp_before = world.unit(warrior).unwrap().hp;

        let mut ctx = world.context();
        let report = apply_damage(&mut ctx, dummy, warrior, 50).unwrap();

        assert_eq!(report.damage, 30);
        assert_eq!(report.absorbed, 20);
        let unit = world.unit(warrior).unwrap();
        assert!((unit.hp - (hp_before - 30.0)).abs() < 1e-9);
        assert_eq!(unit.absorb_shield, 0.0);
        // 30 / 5
        assert!((unit.resource - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_attacker_gains_rage() {
        let (mut world, warrior, dummy) = setup();
        let mut ctx = world.context();
        apply_damage(&mut ctx, warrior, dummy, 10).unwrap();
        assert!((world.unit(warrior).unwrap().resource - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_lethal_hit_kills_once() {
        let (mut world, warrior, dummy) = setup();
        world.unit_mut(warrior).unwrap().hp = 5.0;

        let mut ctx = world.context();
        let report = apply_damage(&mut ctx, dummy, warrior, 20).unwrap();
        assert!(report.killed);
        assert!(apply_damage(&mut ctx, dummy, warrior, 20).is_none());

        let unit = world.unit(warrior).unwrap();
        assert_eq!(unit.hp, 0.0);
        assert!(unit.is_dead);
    }

    #[test]
    fn test_heal_clamps_and_skips_dead() {
        let (mut world, warrior, _) = setup();
        world.unit_mut(warrior).unwrap().hp = 300.0;

        let mut ctx = world.context();
        let restored = heal(&mut ctx, warrior, warrior, 150.0).unwrap();
        assert!((restored - 50.0).abs() < 1e-9);

        world.unit_mut(warrior).unwrap().is_dead = true;
        let mut ctx = world.context();
        assert!(heal(&mut ctx, warrior, warrior, 150.0).is_none());
    }
}
