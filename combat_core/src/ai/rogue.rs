//! Rogue AI
//!
//! The rogue works its way behind the target, taking the target's facing
//! to be toward whoever it is attacking (the leader if nobody).
//!
//! ## Priority Order
//! 1. Sinister Strike in melee
//! 2. Eviscerate in melee
//! 3. Sprint when far from the target

use super::movement::{follow, move_away, move_toward};
use super::{follower_plan, try_cast, FollowerPlan};
use crate::config::constants;
use crate::error::CastError;
use crate::types::UnitId;
use crate::world::TickContext;

const SINISTER_STRIKE: u8 = 1;
const EVISCERATE: u8 = 2;
const SPRINT: u8 = 3;

pub(super) fn update(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) -> Result<(), CastError> {
    let target = match follower_plan(ctx, id) {
        FollowerPlan::Idle => return Ok(()),
        FollowerPlan::Follow(leader) => {
            follow(ctx, id, leader, dt);
            return Ok(());
        }
        FollowerPlan::Engage(target) => target,
    };

    let ai = &constants().ai;
    let (Some(melee), Some(dist)) = (
        ctx.units.get(id).map(|u| u.attack_range),
        ctx.units.distance(id, target),
    ) else {
        return Ok(());
    };
    let Some(facing) = facing_point(ctx, target) else {
        return Ok(());
    };

    // Step 1: Positioning
    let behind = is_behind(ctx, id, target, facing, ai.behind_arc_degrees);
    if !behind || dist > ai.backstab_distance {
        move_behind(ctx, id, target, facing, dt);
    } else if dist < melee - 20.0 {
        if let Some(point) = ctx.units.get(target).map(|u| u.center()) {
            move_away(ctx, id, point, dt);
        }
    }

    // Step 2: Attacks
    if dist <= melee {
        if try_cast(ctx, id, SINISTER_STRIKE, Some(target))? {
            return Ok(());
        }
        if try_cast(ctx, id, EVISCERATE, Some(target))? {
            return Ok(());
        }
    }
    if dist > melee + ai.sprint_margin {
        try_cast(ctx, id, SPRINT, None)?;
    }
    Ok(())
}

/// Where the target is looking: its own live target, else the party leader
fn facing_point(ctx: &TickContext<'_>, target: UnitId) -> Option<(f64, f64)> {
    let victim = ctx.units.get(target)?;
    let watched = victim
        .target
        .filter(|&t| ctx.units.get(t).is_some_and(|u| u.is_alive()))
        .or_else(|| ctx.leader())?;
    ctx.units.get(watched).map(|u| u.center())
}

/// Whether `id` stands inside the arc behind `target`
fn is_behind(ctx: &TickContext<'_>, id: UnitId, target: UnitId, facing: (f64, f64), arc: f64) -> bool {
    let (Some(rogue), Some(victim)) = (ctx.units.get(id), ctx.units.get(target)) else {
        return false;
    };
    let (tx, ty) = victim.center();
    let (rx, ry) = rogue.center();
    let facing_angle = (facing.1 - ty).atan2(facing.0 - tx);
    let rogue_angle = (ry - ty).atan2(rx - tx);

    let mut diff = (rogue_angle - facing_angle).abs().to_degrees();
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    (arc..=180.0).contains(&diff)
}

/// Step toward the point directly behind the target
fn move_behind(ctx: &mut TickContext<'_>, id: UnitId, target: UnitId, facing: (f64, f64), dt: f64) {
    let ai = &constants().ai;
    let (Some(rogue), Some(victim)) = (ctx.units.get(id), ctx.units.get(target)) else {
        return;
    };
    let (tx, ty) = victim.center();
    let behind_angle = (facing.1 - ty).atan2(facing.0 - tx) + std::f64::consts::PI;
    let goal = (
        tx + behind_angle.cos() * ai.backstab_distance,
        ty + behind_angle.sin() * ai.backstab_distance,
    );
    if rogue.distance_to_point(goal.0, goal.1) > ai.arrival_tolerance {
        move_toward(ctx, id, goal, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuffKind;
    use crate::unit::{Unit, UnitClass};
    use crate::world::World;

    // Warrior west of the dummy, so "behind" is east of it
    fn setup(rogue_x: f64, rogue_y: f64) -> (World, UnitId, UnitId) {
        crate::config::ensure_constants_initialized();
        let mut world = World::new(12);
        let warrior = world.add_party_member(Unit::new(UnitClass::Warrior, 0.0, 16.0));
        let rogue = world.add_party_member(Unit::new(UnitClass::Rogue, rogue_x, rogue_y));
        let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 100.0, 0.0));
        world.set_target(warrior, Some(dummy)).unwrap();
        world.set_target(dummy, Some(warrior)).unwrap();
        (world, rogue, dummy)
    }

    fn step(world: &mut World, id: UnitId) {
        let mut ctx = world.context();
        update(&mut ctx, id, 0.1).unwrap();
    }

    #[test]
    fn test_behind_arc() {
        // Dummy center (124, 32), warrior center (16, 32)
        let (mut world, rogue, dummy) = setup(168.0, 16.0);
        {
            let ctx = world.context();
            let facing = facing_point(&ctx, dummy).unwrap();
            assert_eq!(facing, (16.0, 32.0));
            assert!(is_behind(&ctx, rogue, dummy, facing, 120.0));
        }

        world.unit_mut(rogue).unwrap().x = 40.0;
        let ctx = world.context();
        let facing = facing_point(&ctx, dummy).unwrap();
        assert!(!is_behind(&ctx, rogue, dummy, facing, 120.0));
    }

    #[test]
    fn test_moves_around_to_the_back() {
        let (mut world, rogue, _) = setup(40.0, 100.0);
        let before = world.unit(rogue).unwrap().x;
        step(&mut world, rogue);
        assert!(world.unit(rogue).unwrap().x > before);
    }

    #[test]
    fn test_strikes_from_behind() {
        let (mut world, rogue, dummy) = setup(168.0, 16.0);
        step(&mut world, rogue);
        assert!(!world.unit(rogue).unwrap().skills.is_ready(SINISTER_STRIKE));
        assert!(world.unit(dummy).unwrap().hp < 100_000.0);
    }

    #[test]
    fn test_eviscerate_when_strike_down() {
        let (mut world, rogue, _) = setup(168.0, 16.0);
        world.unit_mut(rogue).unwrap().skills.get_mut(SINISTER_STRIKE).unwrap().current_cd = 1.0;
        step(&mut world, rogue);
        assert!(!world.unit(rogue).unwrap().skills.is_ready(EVISCERATE));
    }

    #[test]
    fn test_sprints_when_far() {
        let (mut world, rogue, _) = setup(300.0, 200.0);
        step(&mut world, rogue);
        assert!(world.unit(rogue).unwrap().has_buff(BuffKind::Sprint));
    }
}
