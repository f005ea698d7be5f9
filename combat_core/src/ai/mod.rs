//! AIController: behavior for party members the player does not control
//!
//! Every tick each AI unit either follows the party leader or, once the
//! leader is engaged, holds its class's range band against a target and
//! works through a fixed skill priority list. The first cast that lands
//! ends the unit's turn.
//!
//! ## Architecture
//!
//! - `movement` holds the shared steering helpers
//! - one module per class decides what that class does with its turn
//! - casts go through the same validation as player casts

mod hunter;
mod mage;
mod movement;
mod priest;
mod rogue;
mod warrior;

use crate::config::constants;
use crate::error::CastError;
use crate::skill::{self, SkillEffect};
use crate::types::UnitId;
use crate::unit::{Unit, UnitClass};
use crate::world::TickContext;
use serde::Serialize;
use tracing::debug;

/// Warrior state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiState {
    /// Fresh unit, not yet looking for enemies
    #[default]
    Waiting,
    /// Scanning for the nearest live enemy
    Observing,
    /// Fighting its current target
    Combat,
}

/// Per-unit AI bookkeeping carried between ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiMemory {
    pub state: AiState,
    /// Seconds spent in the current observing phase
    pub observe_timer: f64,
    /// Whether the unit was engaged at the end of its last update
    pub in_combat: bool,
}

/// Run one AI step for `id`
///
/// Only programmer errors (unknown unit or skill) come back as `Err`; a
/// cast the situation does not allow is skipped.
pub fn update(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) -> Result<(), CastError> {
    let unit = ctx.units.get(id).ok_or(CastError::UnknownUnit(id))?;
    if unit.is_dead {
        return Ok(());
    }
    let class = unit.class;

    match class {
        UnitClass::Warrior => warrior::update(ctx, id, dt),
        UnitClass::Mage => mage::update(ctx, id, dt),
        UnitClass::Priest => priest::update(ctx, id, dt),
        UnitClass::Rogue => rogue::update(ctx, id, dt),
        UnitClass::Hunter => hunter::update(ctx, id, dt),
        UnitClass::TrainingDummy => Ok(()),
    }
}

/// Attempt a cast, treating gameplay rejections as "not this tick"
///
/// Returns whether the cast went off. Rejections are checked up front so
/// the AI never triggers player-facing feedback text.
pub(crate) fn try_cast(
    ctx: &mut TickContext<'_>,
    source: UnitId,
    skill_id: u8,
    target: Option<UnitId>,
) -> Result<bool, CastError> {
    match skill::validate_cast(ctx, source, skill_id, target) {
        Ok(_) => {
            skill::cast(ctx, source, skill_id, target)?;
            Ok(true)
        }
        Err(e) if e.is_programmer_error() => Err(e),
        Err(e) => {
            debug!(unit = %source, skill = skill_id, reason = %e, "AI cast skipped");
            Ok(false)
        }
    }
}

/// Whether `skill_id` is off cooldown and affordable for `id`
pub(crate) fn skill_ready(ctx: &TickContext<'_>, id: UnitId, skill_id: u8) -> bool {
    let Some(unit) = ctx.units.get(id) else {
        return false;
    };
    unit.skills
        .get(skill_id)
        .is_some_and(|s| s.is_ready() && unit.resource >= s.def.cost)
}

/// `target` if it is a live unit on the other side from `id`
pub(crate) fn live_hostile(ctx: &TickContext<'_>, id: UnitId, target: Option<UnitId>) -> Option<UnitId> {
    let target = target?;
    let unit = ctx.units.get(target)?;
    (unit.is_alive() && ctx.is_hostile(id, target)).then_some(target)
}

/// Reach of the first area effect on a unit's skill, if it has one
pub(crate) fn nova_radius(ctx: &TickContext<'_>, id: UnitId, skill_id: u8) -> Option<f64> {
    let skill = ctx.units.get(id)?.skills.get(skill_id)?;
    skill.def.effects.iter().find_map(|effect| match *effect {
        SkillEffect::EnemyNova { radius, .. } | SkillEffect::PartyNova { radius, .. } => Some(radius),
        _ => None,
    })
}

/// Live enemies of `id` within `radius` of it
pub(crate) fn hostiles_within(ctx: &TickContext<'_>, id: UnitId, radius: f64) -> usize {
    ctx.hostiles_of(id)
        .into_iter()
        .filter(|&e| ctx.units.distance(id, e).is_some_and(|d| d <= radius))
        .count()
}

/// The leader's target while the leader counts as engaged with it
///
/// Engaged means the target is alive and within aggro range of the leader.
pub(crate) fn leader_engagement(ctx: &TickContext<'_>, leader: UnitId) -> Option<UnitId> {
    let aggro = constants().combat.aggro_range;
    let unit = ctx.units.get(leader)?;
    let target = live_hostile(ctx, leader, unit.target)?;
    let dist = ctx.units.distance(leader, target)?;
    (dist < aggro).then_some(target)
}

/// What a follower should do this tick
pub(crate) enum FollowerPlan {
    /// No leader at all
    Idle,
    /// Keep formation on the leader
    Follow(UnitId),
    /// The leader is engaged; fight this target
    Engage(UnitId),
}

/// Decide between following and fighting, adopting the leader's target
/// when the follower has none of its own
pub(crate) fn follower_plan(ctx: &mut TickContext<'_>, id: UnitId) -> FollowerPlan {
    let leader = ctx
        .leader()
        .filter(|&l| l != id && ctx.units.get(l).is_some_and(Unit::is_alive));
    let Some(leader) = leader else {
        return FollowerPlan::Idle;
    };
    let Some(leader_target) = leader_engagement(ctx, leader) else {
        if let Some(unit) = ctx.units.get_mut(id) {
            unit.ai.in_combat = false;
        }
        return FollowerPlan::Follow(leader);
    };

    let own = ctx.units.get(id).and_then(|u| u.target);
    let target = live_hostile(ctx, id, own).unwrap_or(leader_target);
    if let Some(unit) = ctx.units.get_mut(id) {
        unit.target = Some(target);
        unit.ai.in_combat = true;
    }
    FollowerPlan::Engage(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    fn setup() -> (World, UnitId, UnitId, UnitId) {
        crate::config::ensure_constants_initialized();
        let mut world = World::new(5);
        // A mage as the player so the warrior leads through its AI
        let player = world.add_party_member(Unit::new(UnitClass::Mage, -400.0, 0.0));
        let warrior = world.add_party_member(Unit::new(UnitClass::Warrior, 0.0, 0.0));
        let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 200.0, -16.0));
        (world, player, warrior, dummy)
    }

    #[test]
    fn test_leader_engagement_needs_aggro_range() {
        let (mut world, _, warrior, dummy) = setup();
        world.set_target(warrior, Some(dummy)).unwrap();
        {
            let ctx = world.context();
            assert_eq!(leader_engagement(&ctx, warrior), Some(dummy));
        }

        world.unit_mut(dummy).unwrap().x = 1000.0;
        let ctx = world.context();
        assert_eq!(leader_engagement(&ctx, warrior), None);
    }

    #[test]
    fn test_dead_target_is_not_hostile() {
        let (mut world, _, warrior, dummy) = setup();
        world.unit_mut(dummy).unwrap().is_dead = true;
        let ctx = world.context();
        assert_eq!(live_hostile(&ctx, warrior, Some(dummy)), None);
    }

    #[test]
    fn test_try_cast_skips_gameplay_rejections() {
        let (mut world, _, warrior, dummy) = setup();
        let mut ctx = world.context();
        // Taunt with no rage
        assert_eq!(try_cast(&mut ctx, warrior, 2, Some(dummy)), Ok(false));
        assert_eq!(try_cast(&mut ctx, warrior, 9, Some(dummy)), Err(CastError::UnknownSkill(9)));
        assert!(world.events().texts().is_empty());
    }

    #[test]
    fn test_dummy_has_no_ai() {
        let (mut world, _, _, dummy) = setup();
        let before = world.unit(dummy).unwrap().clone();
        let mut ctx = world.context();
        update(&mut ctx, dummy, 0.5).unwrap();
        let after = world.unit(dummy).unwrap();
        assert_eq!((before.x, before.y, before.target), (after.x, after.y, after.target));
    }

    #[test]
    fn test_follower_adopts_leader_target() {
        let (mut world, _, warrior, dummy) = setup();
        let hunter = world.add_party_member(Unit::new(UnitClass::Hunter, 0.0, 100.0));
        world.set_target(warrior, Some(dummy)).unwrap();

        let mut ctx = world.context();
        assert!(matches!(follower_plan(&mut ctx, hunter), FollowerPlan::Engage(t) if t == dummy));
        assert_eq!(world.unit(hunter).unwrap().target, Some(dummy));
    }
}
