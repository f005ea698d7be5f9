//! Mage AI
//!
//! ## Priority Order
//! 1. Frost Nova when an enemy is inside its reach
//! 2. Fire Blast
//! 3. Fireball

use super::movement::{follow, hold_band};
use super::{follower_plan, hostiles_within, nova_radius, try_cast, FollowerPlan};
use crate::error::CastError;
use crate::types::UnitId;
use crate::world::TickContext;

const FIREBALL: u8 = 1;
const FIRE_BLAST: u8 = 2;
const FROST_NOVA: u8 = 3;

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

    let reach = nova_radius(ctx, id, FROST_NOVA).unwrap_or(0.0);
    if hostiles_within(ctx, id, reach) > 0 && try_cast(ctx, id, FROST_NOVA, None)? {
        return Ok(());
    }
    if try_cast(ctx, id, FIRE_BLAST, Some(target))? {
        return Ok(());
    }
    try_cast(ctx, id, FIREBALL, Some(target))?;
    Ok(())
}
