//! Skill effect interpreter

use super::{Recipient, SkillDef, SkillEffect};
use crate::combat::{deal_damage, heal};
use crate::config::constants;
use crate::events::{LogKind, VfxEvent, COLOR_ABSORB, COLOR_NEUTRAL};
use crate::pending::{PendingEffect, PendingKind};
use crate::types::UnitId;
use crate::world::TickContext;

/// Apply every effect of an already-validated cast, in order
pub fn apply_effects(ctx: &mut TickContext<'_>, source: UnitId, target: UnitId, def: &'static SkillDef) {
    for effect in def.effects {
        apply_effect(ctx, source, target, def, effect);
    }
}

fn apply_effect(
    ctx: &mut TickContext<'_>,
    source: UnitId,
    target: UnitId,
    def: &'static SkillDef,
    effect: &SkillEffect,
) {
    let now = ctx.clock;
    match *effect {
        SkillEffect::Charge => charge(ctx, source, target),
        SkillEffect::GainResource(amount) => {
            if let Some(caster) = ctx.units.get_mut(source) {
                caster.add_resource(amount);
            }
        }
        SkillEffect::ResetSwingTimer => {
            if let Some(caster) = ctx.units.get_mut(source) {
                caster.swing_timer = 0.0;
            }
        }
        SkillEffect::Taunt => {
            if let Some(victim) = ctx.units.get_mut(target) {
                victim.target = Some(source);
                ctx.events
                    .text(victim.x, victim.y - 40.0, "Taunted!", "#ff0000");
            }
        }
        SkillEffect::ApplyBuff { kind, duration, on } => {
            let recipient = match on {
                Recipient::Caster => source,
                Recipient::Target => target,
            };
            if let Some(unit) = ctx.units.get_mut(recipient) {
                if unit.is_alive() {
                    unit.apply_buff(kind, duration);
                    ctx.events
                        .text(unit.x, unit.y - 50.0, format!("{}!", kind), COLOR_NEUTRAL);
                    ctx.events
                        .log(now, LogKind::Buff, format!("{} gains {}", unit.name, kind));
                }
            }
        }
        SkillEffect::Damage(multiplier) => {
            if deal_damage(ctx, source, target, multiplier).is_some() {
                if let Some(victim) = ctx.units.get(target) {
                    let (x, y) = victim.center();
                    ctx.events.vfx(VfxEvent::Impact {
                        x,
                        y,
                        color: def.color.to_string(),
                    });
                }
            }
        }
        SkillEffect::Projectile { multiplier, speed } => {
            let (Some(caster), Some(victim)) = (ctx.units.get(source), ctx.units.get(target)) else {
                return;
            };
            let (x, y) = caster.center();
            let remaining_travel = victim.distance_to_point(x, y);
            ctx.pending.push(PendingEffect {
                kind: PendingKind::Damage { multiplier },
                source,
                target,
                skill_name: def.name,
                x,
                y,
                speed,
                remaining_travel,
                color: def.color,
            });
            ctx.events.vfx(VfxEvent::ProjectileSpawned {
                source,
                target,
                color: def.color.to_string(),
                speed,
            });
        }
        SkillEffect::Heal(amount) => {
            if heal(ctx, source, target, amount).is_some() {
                ctx.events.vfx(VfxEvent::Beam {
                    source,
                    target,
                    color: def.color.to_string(),
                });
            }
        }
        SkillEffect::Shield { base, per_intellect } => {
            let Some(intellect) = ctx.units.get(source).map(|u| u.current.intellect) else {
                return;
            };
            let amount = base + per_intellect * intellect as f64;
            if let Some(unit) = ctx.units.get_mut(target) {
                unit.absorb_shield = amount;
                ctx.events
                    .text(unit.x, unit.y - 40.0, format!("Shield ({})", amount), COLOR_ABSORB);
            }
        }
        SkillEffect::EnemyNova {
            radius,
            multiplier,
            debuff,
        } => {
            let victims = units_near(ctx, source, radius, ctx.hostiles_of(source));
            nova_vfx(ctx, source, radius, def.color);
            for victim in victims {
                deal_damage(ctx, source, victim, multiplier);
                if let Some((kind, duration)) = debuff {
                    if let Some(unit) = ctx.units.get_mut(victim) {
                        if unit.is_alive() {
                            unit.apply_buff(kind, duration);
                        }
                    }
                }
            }
        }
        SkillEffect::PartyNova { radius, amount } => {
            let patients = units_near(ctx, source, radius, ctx.friends_of(source));
            nova_vfx(ctx, source, radius, def.color);
            for patient in patients {
                heal(ctx, source, patient, amount);
            }
        }
    }
}

/// Filter `candidates` to those whose center is within `radius` of the caster's
fn units_near(ctx: &TickContext<'_>, source: UnitId, radius: f64, candidates: Vec<UnitId>) -> Vec<UnitId> {
    let Some(caster) = ctx.units.get(source) else {
        return Vec::new();
    };
    candidates
        .into_iter()
        .filter(|&id| ctx.units.get(id).is_some_and(|u| caster.distance_to(u) <= radius))
        .collect()
}

fn nova_vfx(ctx: &mut TickContext<'_>, source: UnitId, radius: f64, color: &str) {
    if let Some(caster) = ctx.units.get(source) {
        let (x, y) = caster.center();
        ctx.events.vfx(VfxEvent::Nova {
            x,
            y,
            radius,
            color: color.to_string(),
        });
    }
}

/// Move the caster next to the target, stopping short of its center
fn charge(ctx: &mut TickContext<'_>, source: UnitId, target: UnitId) {
    let stop = constants().movement.charge_stop_distance;
    let Some((tx, ty)) = ctx.units.get(target).map(|u| u.center()) else {
        return;
    };
    let Some(caster) = ctx.units.get_mut(source) else {
        return;
    };

    let (cx, cy) = caster.center();
    let (dx, dy) = (tx - cx, ty - cy);
    let dist = dx.hypot(dy);
    if dist > stop {
        let travel = dist - stop;
        caster.x += dx / dist * travel;
        caster.y += dy / dist * travel;
    }
    ctx.events
        .text(caster.x, caster.y - 30.0, "Charge!", COLOR_NEUTRAL);
    ctx.events.vfx(VfxEvent::Beam {
        source,
        target,
        color: "#a52a2a".to_string(),
    });
}
