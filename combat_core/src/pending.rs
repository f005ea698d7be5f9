//! Deferred effects: projectiles in flight

use crate::types::UnitId;
use crate::world::Roster;
use serde::Serialize;

/// What happens when a pending effect lands
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingKind {
    Damage { multiplier: f64 },
}

/// A projectile travelling toward its target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingEffect {
    pub kind: PendingKind,
    pub source: UnitId,
    pub target: UnitId,
    pub skill_name: &'static str,
    pub x: f64,
    pub y: f64,
    /// Pixels per second
    pub speed: f64,
    /// Distance left to the target's center as of the last advance
    pub remaining_travel: f64,
    pub color: &'static str,
}

/// Ordered collection of effects in flight
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    effects: Vec<PendingEffect>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: PendingEffect) {
        self.effects.push(effect);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingEffect> {
        self.effects.iter()
    }

    /// Drop effects whose target has died or vanished. Returns how many.
    pub fn cancel_orphans(&mut self, units: &Roster) -> usize {
        let before = self.effects.len();
        self.effects
            .retain(|effect| units.get(effect.target).is_some_and(|t| t.is_alive()));
        before - self.effects.len()
    }

    /// Remove and return effects within `radius` of their target's center
    pub fn take_arrived(&mut self, units: &Roster, radius: f64) -> Vec<PendingEffect> {
        let mut arrived = Vec::new();
        let mut in_flight = Vec::with_capacity(self.effects.len());

        for effect in self.effects.drain(..) {
            let landed = units
                .get(effect.target)
                .is_some_and(|t| t.distance_to_point(effect.x, effect.y) < radius);
            if landed {
                arrived.push(effect);
            } else {
                in_flight.push(effect);
            }
        }

        self.effects = in_flight;
        arrived
    }

    /// Move every effect toward its target's current center
    pub fn advance(&mut self, units: &Roster, dt: f64) {
        for effect in &mut self.effects {
            let Some(target) = units.get(effect.target) else {
                continue;
            };
            let (tx, ty) = target.center();
            let (dx, dy) = (tx - effect.x, ty - effect.y);
            let dist = dx.hypot(dy);
            let step = effect.speed * dt;

            if step >= dist {
                effect.x = tx;
                effect.y = ty;
                effect.remaining_travel = 0.0;
            } else {
                effect.x += dx / dist * step;
                effect.y += dy / dist * step;
                effect.remaining_travel = dist - step;
            }
        }
    }
}
