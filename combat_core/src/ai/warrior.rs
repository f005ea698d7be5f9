//! Warrior AI
//!
//! ## Priority Order
//! 1. Charge when first engaging a target from outside melee
//! 2. Taunt anything not attacking the warrior
//! 3. Shield Wall when low

use super::movement::hold_band;
use super::{live_hostile, skill_ready, try_cast, AiState};
use crate::config::constants;
use crate::error::CastError;
use crate::types::UnitId;
use crate::world::TickContext;
use tracing::debug;

const CHARGE: u8 = 1;
const TAUNT: u8 = 2;
const SHIELD_WALL: u8 = 3;

pub(super) fn update(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) -> Result<(), CastError> {
    let aggro = constants().combat.aggro_range;
    let unit = ctx.units.get(id).ok_or(CastError::UnknownUnit(id))?;
    let memory = unit.ai.clone();
    let target = live_hostile(ctx, id, unit.target);

    let in_combat = target
        .and_then(|t| ctx.units.distance(id, t))
        .is_some_and(|dist| dist < aggro);
    if let Some(unit) = ctx.units.get_mut(id) {
        unit.ai.in_combat = in_combat;
    }

    match memory.state {
        AiState::Waiting => set_state(ctx, id, AiState::Observing),
        AiState::Observing => observe(ctx, id, dt),
        AiState::Combat => {
            let Some(target) = target else {
                if let Some(unit) = ctx.units.get_mut(id) {
                    unit.target = None;
                }
                set_state(ctx, id, AiState::Observing);
                return Ok(());
            };

            if in_combat && !memory.in_combat {
                open_with_charge(ctx, id, target)?;
            }
            fight(ctx, id, target, dt)?;
        }
    }
    Ok(())
}

fn set_state(ctx: &mut TickContext<'_>, id: UnitId, state: AiState) {
    if let Some(unit) = ctx.units.get_mut(id) {
        unit.ai.state = state;
        unit.ai.observe_timer = 0.0;
    }
}

/// Pick the nearest live enemy and go to combat; with nobody in sight for
/// `observe_duration`, drop back to waiting
fn observe(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) {
    let nearest = ctx
        .hostiles_of(id)
        .into_iter()
        .filter_map(|e| ctx.units.distance(id, e).map(|d| (e, d)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some(unit) = ctx.units.get_mut(id) else {
        return;
    };
    unit.ai.observe_timer += dt;
    if let Some((enemy, dist)) = nearest {
        debug!(unit = %unit.name, target = %enemy, dist, "warrior picked a target");
        unit.target = Some(enemy);
        unit.ai.state = AiState::Combat;
        unit.ai.observe_timer = 0.0;
    } else if unit.ai.observe_timer >= constants().ai.observe_duration {
        debug!(unit = %unit.name, "warrior found no enemies, idling");
        unit.ai.state = AiState::Waiting;
        unit.ai.observe_timer = 0.0;
    }
}

fn open_with_charge(ctx: &mut TickContext<'_>, id: UnitId, target: UnitId) -> Result<(), CastError> {
    let Some(unit) = ctx.units.get(id) else {
        return Ok(());
    };
    let melee = unit.attack_range;
    let dist = ctx.units.distance(id, target).unwrap_or(0.0);
    if dist > melee && skill_ready(ctx, id, CHARGE) {
        debug!(unit = %id, target = %target, "warrior opens with Charge");
        try_cast(ctx, id, CHARGE, Some(target))?;
    }
    Ok(())
}

/// Hold melee range, then work the priority list
fn fight(ctx: &mut TickContext<'_>, id: UnitId, target: UnitId, dt: f64) -> Result<(), CastError> {
    let Some(band) = ctx.units.get(id).map(|u| u.profile().optimal_range) else {
        return Ok(());
    };
    hold_band(ctx, id, target, band, dt);

    let threshold = constants().ai.shield_wall_hp_pct;
    let Some(unit) = ctx.units.get(id) else {
        return Ok(());
    };
    let low = unit.hp_pct() < threshold;
    let loose = ctx.units.get(target).is_some_and(|t| t.target != Some(id));

    if loose && try_cast(ctx, id, TAUNT, Some(target))? {
        return Ok(());
    }
    if low {
        try_cast(ctx, id, SHIELD_WALL, None)?;
    }
    Ok(())
}
