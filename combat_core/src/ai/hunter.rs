//! Hunter AI
//!
//! ## Priority Order
//! 1. Arcane Shot
//! 2. Steady Shot while focus is low
//! 3. Concussive Shot

use super::movement::{follow, hold_band};
use super::{follower_plan, try_cast, FollowerPlan};
use crate::error::CastError;
use crate::types::UnitId;
use crate::world::TickContext;

const ARCANE_SHOT: u8 = 1;
const STEADY_SHOT: u8 = 2;
const CONCUSSIVE_SHOT: u8 = 3;

/// Below this focus the hunter spends turns regaining it
const LOW_FOCUS: f64 = 50.0;

pub(super) fn update(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) -> Result<(), CastError> {
    let target = match follower_plan(ctx, id) {
        FollowerPlan::Idle => return Ok(()),
        FollowerPlan::Follow(leader) => {
            follow(ctx, id, leader, dt);
            return Ok(());
        }
        FollowerPlan::Engage(target) => target,
    };

    let Some(band) = ctx.units.get(id).map(|u| u.profile().optimal_range) else {
        return Ok(());
    };
    hold_band(ctx, id, target, band, dt);

    if try_cast(ctx, id, ARCANE_SHOT, Some(target))? {
        return Ok(());
    }
    let low_focus = ctx.units.get(id).is_some_and(|u| u.resource < LOW_FOCUS);
    if low_focus && try_cast(ctx, id, STEADY_SHOT, Some(target))? {
        return Ok(());
    }
    try_cast(ctx, id, CONCUSSIVE_SHOT, Some(target))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuffKind;
    use crate::unit::{Unit, UnitClass};
    use crate::world::World;

    fn setup() -> (World, UnitId, UnitId) {
        crate::config::ensure_constants_initialized();
        let mut world = World::new(8);
        let warrior = world.add_party_member(Unit::new(UnitClass::Warrior, 0.0, 0.0));
        let hunter = world.add_party_member(Unit::new(UnitClass::Hunter, 0.0, 100.0));
        let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 60.0, 40.0));
        world.set_target(warrior, Some(dummy)).unwrap();
        (world, hunter, dummy)
    }

    #[test]
    fn test_arcane_shot_first() {
        let (mut world, hunter, _) = setup();
        let mut ctx = world.context();
        update(&mut ctx, hunter, 0.1).unwrap();
        assert!(!world.unit(hunter).unwrap().skills.is_ready(ARCANE_SHOT));
        assert_eq!(world.pending().len(), 1);
    }

    #[test]
    fn test_steady_shot_when_focus_low() {
        let (mut world, hunter, _) = setup();
        {
            let unit = world.unit_mut(hunter).unwrap();
            unit.resource = 20.0;
        }
        let mut ctx = world.context();
        update(&mut ctx, hunter, 0.1).unwrap();
        let h = world.unit(hunter).unwrap();
        assert!(!h.skills.is_ready(STEADY_SHOT));
        assert!(h.skills.is_ready(CONCUSSIVE_SHOT));
    }

    #[test]
    fn test_concussive_when_focus_high_and_arcane_down() {
        let (mut world, hunter, dummy) = setup();
        world.unit_mut(hunter).unwrap().skills.get_mut(ARCANE_SHOT).unwrap().current_cd = 1.0;
        let mut ctx = world.context();
        update(&mut ctx, hunter, 0.1).unwrap();
        assert!(world.unit(dummy).unwrap().has_buff(BuffKind::Dazed));
    }
}
