//! Cast validation state machine

use super::{apply_effects, CastType, SkillDef, TargetType};
use crate::error::{CastError, TargetMismatch};
use crate::events::{LogKind, COLOR_FEEDBACK};
use crate::types::UnitId;
use crate::world::TickContext;
use tracing::{debug, warn};

/// Run every cast check without mutating anything
///
/// Returns the skill definition and the resolved target (the caster itself
/// for self-cast skills).
pub fn validate_cast(
    ctx: &TickContext<'_>,
    source: UnitId,
    skill_id: u8,
    target: Option<UnitId>,
) -> Result<(&'static SkillDef, UnitId), CastError> {
    let caster = ctx.units.get(source).ok_or(CastError::UnknownUnit(source))?;
    if caster.is_dead {
        return Err(CastError::SourceDead);
    }

    // Step 1: Skill lookup
    let skill = caster
        .skills
        .get(skill_id)
        .ok_or(CastError::UnknownSkill(skill_id))?;
    let def = skill.def;

    // Step 2: Cooldown
    if skill.current_cd > 0.0 {
        return Err(CastError::OnCooldown);
    }

    // Step 3: Resource
    if caster.resource < def.cost {
        return Err(CastError::InsufficientResource(caster.resource_type));
    }

    // Step 4: Self-cast ignores the supplied target
    if def.cast_type == CastType::SelfCast {
        return Ok((def, source));
    }

    // Step 5a: Target present and alive
    let target_id = target.ok_or(CastError::NoTarget)?;
    let victim = ctx.units.get(target_id).ok_or(CastError::NoTarget)?;
    if victim.is_dead {
        return Err(CastError::NoTarget);
    }

    // Step 5b: Target type
    match def.target_type {
        TargetType::Enemy if !ctx.is_hostile(source, target_id) => {
            return Err(CastError::WrongTargetType(TargetMismatch::NotEnemy))
        }
        TargetType::Friend if !ctx.is_friendly(source, target_id) => {
            return Err(CastError::WrongTargetType(TargetMismatch::NotFriend))
        }
        TargetType::SelfOnly if target_id != source => {
            return Err(CastError::WrongTargetType(TargetMismatch::NotSelf))
        }
        _ => {}
    }

    // Step 5c: Range
    let dist = caster.distance_to(victim);
    if def.range_min > 0.0 && dist < def.range_min {
        return Err(CastError::TooClose);
    }
    if def.range_max > 0.0 && dist > def.range_max {
        return Err(CastError::TooFar);
    }

    Ok((def, target_id))
}

/// Validate and, on success, commit and dispatch a cast
///
/// A rejection changes nothing except possibly a rate-limited feedback
/// message above the caster.
pub fn cast(
    ctx: &mut TickContext<'_>,
    source: UnitId,
    skill_id: u8,
    target: Option<UnitId>,
) -> Result<UnitId, CastError> {
    let (def, target_id) = match validate_cast(ctx, source, skill_id, target) {
        Ok(ok) => ok,
        Err(e) => {
            report_rejection(ctx, source, skill_id, e);
            return Err(e);
        }
    };

    // Step 6: Commit
    let now = ctx.clock;
    let caster = ctx.units.get_mut(source).ok_or(CastError::UnknownUnit(source))?;
    if let Some(skill) = caster.skills.get_mut(skill_id) {
        skill.current_cd = def.cooldown;
    }
    caster.resource = (caster.resource - def.cost).max(0.0);
    let caster_name = caster.name.clone();

    let target_name = ctx
        .units
        .get(target_id)
        .map(|u| u.name.clone())
        .unwrap_or_default();
    let message = if target_id == source {
        format!("{} casts {}", caster_name, def.name)
    } else {
        format!("{} casts {} on {}", caster_name, def.name, target_name)
    };
    ctx.events.log(now, LogKind::Skill, message);
    debug!(caster = %caster_name, skill = def.name, target = %target_id, "cast");

    apply_effects(ctx, source, target_id, def);
    Ok(target_id)
}

fn report_rejection(ctx: &mut TickContext<'_>, source: UnitId, skill_id: u8, error: CastError) {
    if error.is_programmer_error() {
        warn!(unit = %source, skill = skill_id, %error, "invalid cast request");
        return;
    }
    debug!(unit = %source, skill = skill_id, %error, "cast rejected");

    if !ctx.feedback.allow(source, skill_id, ctx.clock) {
        return;
    }
    if let Some(caster) = ctx.units.get(source) {
        ctx.events
            .text(caster.x, caster.y - 40.0, error.to_string(), COLOR_FEEDBACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceType;
    use crate::unit::{Unit, UnitClass};
    use crate::world::World;

    fn setup() -> (World, UnitId, UnitId, UnitId) {
        crate::config::ensure_constants_initialized();
        let mut world = World::new(5);
        let warrior = world.add_party_member(Unit::new(UnitClass::Warrior, 0.0, 0.0));
        let priest = world.add_party_member(Unit::new(UnitClass::Priest, 0.0, 100.0));
        let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 300.0, 0.0));
        (world, warrior, priest, dummy)
    }

    #[test]
    fn test_unknown_skill() {
        let (mut world, warrior, _, dummy) = setup();
        assert_eq!(
            world.request_cast(warrior, 9, Some(dummy)),
            Err(CastError::UnknownSkill(9))
        );
    }

    #[test]
    fn test_insufficient_rage() {
        let (mut world, warrior, _, dummy) = setup();
        assert_eq!(
            world.request_cast(warrior, 2, Some(dummy)),
            Err(CastError::InsufficientResource(ResourceType::Rage))
        );
    }

    #[test]
    fn test_no_target() {
        let (mut world, _, priest, _) = setup();
        assert_eq!(world.request_cast(priest, 1, None), Err(CastError::NoTarget));
    }

    #[test]
    fn test_dead_target_is_no_target() {
        let (mut world, warrior, _, dummy) = setup();
        world.unit_mut(dummy).unwrap().is_dead = true;
        assert_eq!(world.request_cast(warrior, 1, Some(dummy)), Err(CastError::NoTarget));
    }

    #[test]
    fn test_wrong_target_types() {
        let (mut world, warrior, priest, dummy) = setup();
        assert_eq!(
            world.request_cast(warrior, 1, Some(priest)),
            Err(CastError::WrongTargetType(TargetMismatch::NotEnemy))
        );
        assert_eq!(
            world.request_cast(priest, 1, Some(dummy)),
            Err(CastError::WrongTargetType(TargetMismatch::NotFriend))
        );
    }

    #[test]
    fn test_self_cast_ignores_target() {
        let (mut world, warrior, _, dummy) = setup();
        world.unit_mut(warrior).unwrap().resource = 30.0;
        assert_eq!(world.request_cast(warrior, 3, Some(dummy)), Ok(warrior));
        let unit = world.unit(warrior).unwrap();
        assert_eq!(unit.resource, 0.0);
        assert_eq!(unit.skills.get(3).unwrap().current_cd, 60.0);
    }

    #[test]
    fn test_rejection_mutates_nothing() {
        let (mut world, warrior, priest, _) = setup();
        let before = world.unit(warrior).unwrap().clone();
        let _ = world.request_cast(warrior, 1, Some(priest));
        let after = world.unit(warrior).unwrap();
        assert_eq!(before.resource, after.resource);
        assert_eq!(before.skills, after.skills);
        assert_eq!((before.x, before.y), (after.x, after.y));
    }

    #[test]
    fn test_feedback_is_rate_limited() {
        let (mut world, warrior, _, dummy) = setup();
        for _ in 0..5 {
            let _ = world.request_cast(warrior, 2, Some(dummy));
        }
        assert_eq!(world.events().texts().len(), 1);
    }
}
