use super::resolver::{deal_damage, HitReport};
use crate::events::{VfxEvent, COLOR_DAMAGE};
use crate::types::UnitId;
use crate::world::TickContext;

/// Slack for float drift when a swing timer counts down to zero
const SWING_EPSILON: f64 = 1e-9;

/// Whether `attacker` may swing at its current target right now
///
/// Requires a live target on the other side, within attack range, with the
/// swing timer run down. Units never auto-attack their own side.
pub fn can_auto_attack(ctx: &TickContext<'_>, attacker: UnitId) -> Option<UnitId> {
    let unit = ctx.units.get(attacker)?;
    if unit.is_dead || unit.swing_timer > SWING_EPSILON {
        return None;
    }
    let target_id = unit.target?;
    let target = ctx.units.get(target_id)?;
    if target.is_dead || !ctx.is_hostile(attacker, target_id) {
        return None;
    }
    (unit.distance_to(target) <= unit.attack_range).then_some(target_id)
}

/// Swing at the current target if possible, rearming the swing timer
pub fn auto_attack(ctx: &mut TickContext<'_>, attacker: UnitId) -> Option<HitReport> {
    let target = can_auto_attack(ctx, attacker)?;

    let (color, ranged) = {
        let unit = ctx.units.get_mut(attacker)?;
        // Carry the overshoot so the cadence does not drift by a frame per swing
        unit.swing_timer = (unit.swing_timer + unit.swing_speed).max(0.0);
        (unit.color, unit.attack_range > 100.0)
    };

    let report = deal_damage(ctx, attacker, target, 1.0)?;

    if ranged {
        ctx.events.vfx(VfxEvent::Beam {
            source: attacker,
            target,
            color: color.to_string(),
        });
    } else if let Some(t) = ctx.units.get(target) {
        let (x, y) = t.center();
        ctx.events.vfx(VfxEvent::Impact {
            x,
            y,
            color: COLOR_DAMAGE.to_string(),
        });
    }
    Some(report)
}
