//! Steering helpers shared by the class AIs

use crate::config::constants;
use crate::types::UnitId;
use crate::world::TickContext;

/// Step `id` toward a point at its effective speed
pub(super) fn move_toward(ctx: &mut TickContext<'_>, id: UnitId, (px, py): (f64, f64), dt: f64) {
    if let Some(unit) = ctx.units.get_mut(id) {
        let (cx, cy) = unit.center();
        unit.step_towards(px - cx, py - cy, dt);
    }
}

/// Step `id` directly away from a point
pub(super) fn move_away(ctx: &mut TickContext<'_>, id: UnitId, (px, py): (f64, f64), dt: f64) {
    if let Some(unit) = ctx.units.get_mut(id) {
        let (cx, cy) = unit.center();
        unit.step_towards(cx - px, cy - py, dt);
    }
}

/// Close in past `max`, back off inside `min`. Returns the distance before moving.
pub(super) fn hold_band(
    ctx: &mut TickContext<'_>,
    id: UnitId,
    target: UnitId,
    (min, max): (f64, f64),
    dt: f64,
) -> Option<f64> {
    let dist = ctx.units.distance(id, target)?;
    let point = ctx.units.get(target)?.center();
    if dist > max {
        move_toward(ctx, id, point, dt);
    } else if dist < min {
        move_away(ctx, id, point, dt);
    }
    Some(dist)
}

/// Keep formation on the leader: follow distance with a slack band inside it
pub(super) fn follow(ctx: &mut TickContext<'_>, id: UnitId, leader: UnitId, dt: f64) {
    let Some(follow_distance) = ctx.units.get(id).map(|u| u.profile().follow_distance) else {
        return;
    };
    let slack = constants().movement.follow_slack;
    hold_band(ctx, id, leader, (follow_distance - slack, follow_distance), dt);
}
