//! Priest AI
//!
//! Healing is checked before the follow/engage decision, so a priest
//! tends the party even while the leader is idle.
//!
//! ## Priority Order
//! 1. Power Word: Shield on itself when hurt, else on an engaged leader
//! 2. Holy Nova when several party members nearby need healing
//! 3. Heal the most injured party member below the critical threshold
//! 4. Hold casting range on the target and let auto-attacks work

use super::movement::{follow, hold_band, move_toward};
use super::{follower_plan, leader_engagement, nova_radius, try_cast, FollowerPlan};
use crate::config::constants;
use crate::error::CastError;
use crate::types::UnitId;
use crate::world::TickContext;

const HEAL: u8 = 1;
const POWER_WORD_SHIELD: u8 = 2;
const HOLY_NOVA: u8 = 3;

pub(super) fn update(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) -> Result<(), CastError> {
    if try_shield(ctx, id)? || try_nova(ctx, id)? || try_heal(ctx, id, dt)? {
        return Ok(());
    }

    match follower_plan(ctx, id) {
        FollowerPlan::Idle => {}
        FollowerPlan::Follow(leader) => follow(ctx, id, leader, dt),
        FollowerPlan::Engage(target) => {
            if let Some(band) = ctx.units.get(id).map(|u| u.profile().optimal_range) {
                hold_band(ctx, id, target, band, dt);
            }
        }
    }
    Ok(())
}

fn unshielded(ctx: &TickContext<'_>, id: UnitId) -> bool {
    ctx.units.get(id).is_some_and(|u| u.absorb_shield <= 0.0)
}

fn try_shield(ctx: &mut TickContext<'_>, id: UnitId) -> Result<bool, CastError> {
    let heal_pct = constants().ai.heal_hp_pct;
    let hurt = ctx.units.get(id).is_some_and(|u| u.hp_pct() < heal_pct);
    if hurt && unshielded(ctx, id) {
        return try_cast(ctx, id, POWER_WORD_SHIELD, Some(id));
    }

    let Some(leader) = ctx.leader().filter(|&l| l != id) else {
        return Ok(false);
    };
    if leader_engagement(ctx, leader).is_some() && unshielded(ctx, leader) {
        return try_cast(ctx, id, POWER_WORD_SHIELD, Some(leader));
    }
    Ok(false)
}

fn try_nova(ctx: &mut TickContext<'_>, id: UnitId) -> Result<bool, CastError> {
    let ai = &constants().ai;
    let Some(reach) = nova_radius(ctx, id, HOLY_NOVA) else {
        return Ok(false);
    };
    let patients = ctx
        .friends_of(id)
        .into_iter()
        .filter(|&f| {
            ctx.units.distance(id, f).is_some_and(|d| d <= reach)
                && ctx.units.get(f).is_some_and(|u| u.hp_pct() < ai.heal_hp_pct)
        })
        .count();
    if patients >= ai.nova_min_patients {
        return try_cast(ctx, id, HOLY_NOVA, None);
    }
    Ok(false)
}

/// Heal the most injured critical party member, walking into range first
fn try_heal(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) -> Result<bool, CastError> {
    let critical = constants().ai.critical_hp_pct;
    let patient = ctx
        .friends_of(id)
        .into_iter()
        .filter_map(|f| ctx.units.get(f).map(|u| (f, u.hp_pct())))
        .filter(|&(_, pct)| pct < critical)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(f, _)| f);
    let Some(patient) = patient else {
        return Ok(false);
    };

    let Some(unit) = ctx.units.get(id) else {
        return Ok(false);
    };
    let Some(skill) = unit.skills.get(HEAL) else {
        return Err(CastError::UnknownSkill(HEAL));
    };
    if !skill.is_ready() || unit.resource < skill.def.cost {
        return Ok(false);
    }
    let range = skill.def.range_max;

    let dist = ctx.units.distance(id, patient).unwrap_or(f64::INFINITY);
    if dist > range {
        if let Some(point) = ctx.units.get(patient).map(|u| u.center()) {
            move_toward(ctx, id, point, dt);
        }
        return Ok(true);
    }
    try_cast(ctx, id, HEAL, Some(patient))
}
