//! World: the unit arena, the explicit tick context and the fixed-order
//! tick driver

use crate::ai;
use crate::combat::auto_attack;
use crate::config::constants;
use crate::error::{CastError, EquipError, WorldError};
use crate::events::{CombatEvents, LogKind, VfxEvent};
use crate::feedback::FeedbackLimiter;
use crate::pending::{PendingKind, PendingQueue};
use crate::skill;
use crate::snapshot::UnitSnapshot;
use crate::types::{BuffKind, UnitId};
use crate::unit::{Unit, UnitClass};
use item_core::EquipSlot;
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Arena of units addressed by [`UnitId`]
#[derive(Debug, Clone, Default)]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit and assign its id
    pub fn add(&mut self, mut unit: Unit) -> UnitId {
        let id = UnitId(self.units.len());
        unit.id = id;
        self.units.push(unit);
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn ids(&self) -> Vec<UnitId> {
        (0..self.units.len()).map(UnitId).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Center-to-center distance between two units
    pub fn distance(&self, a: UnitId, b: UnitId) -> Option<f64> {
        Some(self.get(a)?.distance_to(self.get(b)?))
    }
}

/// Everything a tick step may read or mutate, passed explicitly
pub struct TickContext<'a> {
    pub units: &'a mut Roster,
    pub party: &'a [UnitId],
    pub enemies: &'a [UnitId],
    pub player: Option<UnitId>,
    /// Simulated seconds since the world started
    pub clock: f64,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut CombatEvents,
    pub pending: &'a mut PendingQueue,
    pub feedback: &'a mut FeedbackLimiter,
}

impl<'a> TickContext<'a> {
    pub fn is_party(&self, id: UnitId) -> bool {
        self.party.contains(&id)
    }

    pub fn is_enemy(&self, id: UnitId) -> bool {
        self.enemies.contains(&id)
    }

    /// Whether two units are on opposite sides
    pub fn is_hostile(&self, a: UnitId, b: UnitId) -> bool {
        (self.is_party(a) && self.is_enemy(b)) || (self.is_enemy(a) && self.is_party(b))
    }

    /// Whether two units are on the same side
    pub fn is_friendly(&self, a: UnitId, b: UnitId) -> bool {
        (self.is_party(a) && self.is_party(b)) || (self.is_enemy(a) && self.is_enemy(b))
    }

    /// Live units on the other side from `id`
    pub fn hostiles_of(&self, id: UnitId) -> Vec<UnitId> {
        let side: &[UnitId] = if self.is_party(id) {
            self.enemies
        } else if self.is_enemy(id) {
            self.party
        } else {
            &[]
        };
        self.live(side)
    }

    /// Live units on the same side as `id`, itself included
    pub fn friends_of(&self, id: UnitId) -> Vec<UnitId> {
        let side: &[UnitId] = if self.is_party(id) {
            self.party
        } else if self.is_enemy(id) {
            self.enemies
        } else {
            &[]
        };
        self.live(side)
    }

    fn live(&self, ids: &[UnitId]) -> Vec<UnitId> {
        ids.iter()
            .copied()
            .filter(|&id| self.units.get(id).is_some_and(Unit::is_alive))
            .collect()
    }

    /// The unit the AI party follows: the first live Warrior, else the player
    pub fn leader(&self) -> Option<UnitId> {
        self.party
            .iter()
            .copied()
            .find(|&id| {
                self.units
                    .get(id)
                    .is_some_and(|u| u.class == UnitClass::Warrior && u.is_alive())
            })
            .or(self.player)
    }
}

/// One action requested by the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "skill", rename_all = "snake_case")]
pub enum Action {
    CastSkill(u8),
    NextTarget,
    NextPartyTarget,
}

/// Player input for one tick: a movement direction and discrete actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub dx: f64,
    pub dy: f64,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Intent {
    pub fn movement(dx: f64, dy: f64) -> Self {
        Intent {
            dx,
            dy,
            actions: Vec::new(),
        }
    }

    pub fn action(action: Action) -> Self {
        Intent {
            dx: 0.0,
            dy: 0.0,
            actions: vec![action],
        }
    }
}

/// The whole simulation: units, sides, clock and emitted events
pub struct World {
    units: Roster,
    party: Vec<UnitId>,
    enemies: Vec<UnitId>,
    player: Option<UnitId>,
    clock: f64,
    rng: ChaCha8Rng,
    events: CombatEvents,
    pending: PendingQueue,
    feedback: FeedbackLimiter,
    intent: Option<Intent>,
    last_cycle: Option<f64>,
}

impl World {
    /// Create an empty world whose randomness is fully determined by `seed`
    pub fn new(seed: u64) -> Self {
        World {
            units: Roster::new(),
            party: Vec::new(),
            enemies: Vec::new(),
            player: None,
            clock: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: CombatEvents::default(),
            pending: PendingQueue::new(),
            feedback: FeedbackLimiter::default(),
            intent: None,
            last_cycle: None,
        }
    }

    /// Add a unit to the party. The first party member becomes the player.
    pub fn add_party_member(&mut self, unit: Unit) -> UnitId {
        let id = self.units.add(unit);
        self.party.push(id);
        if self.player.is_none() {
            self.player = Some(id);
        }
        id
    }

    pub fn add_enemy(&mut self, unit: Unit) -> UnitId {
        let id = self.units.add(unit);
        self.enemies.push(id);
        id
    }

    /// Hand player control to a party member
    pub fn set_player(&mut self, id: UnitId) -> Result<(), WorldError> {
        if !self.party.contains(&id) {
            return Err(WorldError::UnknownUnit(id));
        }
        self.player = Some(id);
        Ok(())
    }

    pub fn player(&self) -> Option<UnitId> {
        self.player
    }

    pub fn party(&self) -> &[UnitId] {
        &self.party
    }

    pub fn enemies(&self) -> &[UnitId] {
        &self.enemies
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id)
    }

    pub fn units(&self) -> &Roster {
        &self.units
    }

    pub fn events(&self) -> &CombatEvents {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut CombatEvents {
        &mut self.events
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    /// Whether every enemy is dead
    pub fn enemies_defeated(&self) -> bool {
        self.enemies
            .iter()
            .all(|&id| self.units.get(id).map_or(true, |u| u.is_dead))
    }

    /// Whether every party member is dead
    pub fn party_defeated(&self) -> bool {
        self.party
            .iter()
            .all(|&id| self.units.get(id).map_or(true, |u| u.is_dead))
    }

    /// Borrow the world as a tick context
    pub fn context(&mut self) -> TickContext<'_> {
        TickContext {
            units: &mut self.units,
            party: &self.party,
            enemies: &self.enemies,
            player: self.player,
            clock: self.clock,
            rng: &mut self.rng,
            events: &mut self.events,
            pending: &mut self.pending,
            feedback: &mut self.feedback,
        }
    }

    /// Queue player input for the next tick, replacing any earlier intent
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = Some(intent);
    }

    /// Cast a skill on behalf of any unit
    pub fn request_cast(
        &mut self,
        unit: UnitId,
        skill_id: u8,
        target: Option<UnitId>,
    ) -> Result<UnitId, CastError> {
        let mut ctx = self.context();
        skill::cast(&mut ctx, unit, skill_id, target)
    }

    /// Point a unit at a target (or clear it)
    pub fn set_target(&mut self, unit: UnitId, target: Option<UnitId>) -> Result<(), WorldError> {
        if let Some(t) = target {
            self.units.get(t).ok_or(WorldError::UnknownUnit(t))?;
        }
        let unit = self.units.get_mut(unit).ok_or(WorldError::UnknownUnit(unit))?;
        unit.target = target;
        Ok(())
    }

    /// Every enemy targets the player
    pub fn enemies_target_player(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        for &id in &self.enemies {
            if let Some(enemy) = self.units.get_mut(id) {
                enemy.target = Some(player);
            }
        }
    }

    /// Switch `unit` to the next live enemy after its current target
    pub fn cycle_target(&mut self, unit: UnitId) -> Option<UnitId> {
        let candidates = self.live(&self.enemies);
        self.cycle_among(unit, &candidates)
    }

    /// Switch `unit` to the next live party member after its current target
    pub fn cycle_party_target(&mut self, unit: UnitId) -> Option<UnitId> {
        let candidates = self.live(&self.party);
        self.cycle_among(unit, &candidates)
    }

    fn live(&self, ids: &[UnitId]) -> Vec<UnitId> {
        ids.iter()
            .copied()
            .filter(|&id| self.units.get(id).is_some_and(Unit::is_alive))
            .collect()
    }

    fn cycle_among(&mut self, unit: UnitId, candidates: &[UnitId]) -> Option<UnitId> {
        let current = self.units.get(unit)?.target;
        let next = match current.and_then(|t| candidates.iter().position(|&c| c == t)) {
            Some(index) => candidates.get((index + 1) % candidates.len()).copied(),
            None => candidates.first().copied(),
        };
        if let Some(u) = self.units.get_mut(unit) {
            u.target = next;
        }
        next
    }

    /// Equip a bag item; failures are logged and leave the unit unchanged
    pub fn equip_from_bag(&mut self, unit: UnitId, bag_index: usize) -> Result<EquipSlot, EquipError> {
        let now = self.clock;
        let Some(u) = self.units.get_mut(unit) else {
            return Err(EquipError::UnknownUnit(unit));
        };
        let result = u.equip_from_bag(bag_index);
        let message = match &result {
            Ok(slot) => {
                let name = u.equipment.get(*slot).map(|i| i.name.as_str()).unwrap_or("item");
                format!("{} equips {}", u.name, name)
            }
            Err(e) => format!("{} cannot equip: {}", u.name, e),
        };
        self.events.log(now, LogKind::Equipment, message);
        result
    }

    /// Unequip a slot into the bag; failures are logged and leave the unit unchanged
    pub fn unequip(&mut self, unit: UnitId, slot: EquipSlot) -> Result<usize, EquipError> {
        let now = self.clock;
        let Some(u) = self.units.get_mut(unit) else {
            return Err(EquipError::UnknownUnit(unit));
        };
        let result = u.unequip(slot);
        let message = match &result {
            Ok(_) => format!("{} unequips {}", u.name, slot),
            Err(e) => format!("{} cannot unequip {}: {}", u.name, slot, e),
        };
        self.events.log(now, LogKind::Equipment, message);
        result
    }

    pub fn snapshot(&self, id: UnitId) -> Option<UnitSnapshot> {
        self.units.get(id).map(UnitSnapshot::from_unit)
    }

    pub fn snapshots(&self) -> Vec<UnitSnapshot> {
        self.units.iter().map(UnitSnapshot::from_unit).collect()
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Order: timers and auto-attacks, player intent, AI, arrived
    /// projectiles, projectile travel. A failure inside one unit's update is
    /// logged and skipped; only an invalid `dt` is an error.
    ///
    /// Visual-effect triggers from the previous tick are dropped on entry.
    pub fn tick(&mut self, dt: f64) -> Result<(), WorldError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(WorldError::InvalidDelta(dt));
        }
        self.clock += dt;
        self.events.begin_frame();
        let intent = self.intent.take();

        // Target cycling happens before the context borrows the world
        if let (Some(player), Some(intent)) = (self.player, intent.as_ref()) {
            for action in &intent.actions {
                match action {
                    Action::NextTarget | Action::NextPartyTarget => {
                        self.cycle_from_intent(player, *action)
                    }
                    Action::CastSkill(_) => {}
                }
            }
        }

        let mut ctx = self.context();

        // Step 1: Timers, buffs, cooldowns, regen, auto-attack
        for id in ctx.units.ids() {
            update_unit(&mut ctx, id, dt);
        }

        // Step 2: Player intent
        if let (Some(player), Some(intent)) = (ctx.player, intent) {
            apply_intent(&mut ctx, player, &intent, dt);
        }

        // Step 3: AI
        let party = ctx.party.to_vec();
        for id in party {
            if Some(id) == ctx.player {
                continue;
            }
            if let Err(e) = ai::update(&mut ctx, id, dt) {
                warn!(unit = %id, error = %e, "AI update failed, skipping unit");
            }
        }

        // Step 4: Deferred effects that reached their target
        resolve_arrived(&mut ctx);

        // Step 5: Advance deferred effects and floating text
        let cancelled = ctx.pending.cancel_orphans(ctx.units);
        if cancelled > 0 {
            debug!(cancelled, "dropped projectiles with dead targets");
        }
        ctx.pending.advance(ctx.units, dt);
        ctx.events.tick(dt);

        Ok(())
    }

    fn cycle_from_intent(&mut self, player: UnitId, action: Action) {
        let debounce = constants().movement.tab_debounce;
        if let Some(last) = self.last_cycle {
            if self.clock - last < debounce {
                return;
            }
        }
        self.last_cycle = Some(self.clock);
        let next = match action {
            Action::NextPartyTarget => self.cycle_party_target(player),
            _ => self.cycle_target(player),
        };
        debug!(?next, "player cycled target");
    }
}

/// Per-unit bookkeeping for one tick, then an auto-attack if ready
fn update_unit(ctx: &mut TickContext<'_>, id: UnitId, dt: f64) {
    let now = ctx.clock;
    let Some(unit) = ctx.units.get_mut(id) else {
        return;
    };
    if unit.is_dead {
        return;
    }

    for kind in unit.tick_buffs(dt) {
        if kind == BuffKind::PowerWordShield {
            unit.absorb_shield = 0.0;
        }
        ctx.events
            .log(now, LogKind::Buff, format!("{} fades from {}", kind, unit.name));
    }
    if unit.swing_timer > 0.0 {
        unit.swing_timer -= dt;
    }
    unit.tick_cooldowns(dt);
    unit.regenerate(dt);

    auto_attack(ctx, id);
}

fn apply_intent(ctx: &mut TickContext<'_>, player: UnitId, intent: &Intent, dt: f64) {
    if let Some(unit) = ctx.units.get_mut(player) {
        if unit.is_alive() {
            unit.step_towards(intent.dx, intent.dy, dt);
        }
    }

    for action in &intent.actions {
        if let Action::CastSkill(skill_id) = *action {
            let target = ctx.units.get(player).and_then(|u| u.target);
            if let Err(e) = skill::cast(ctx, player, skill_id, target) {
                debug!(skill = skill_id, error = %e, "player cast rejected");
            }
        }
    }
}

fn resolve_arrived(ctx: &mut TickContext<'_>) {
    let radius = constants().combat.projectile_arrival_radius;
    for effect in ctx.pending.take_arrived(ctx.units, radius) {
        ctx.events.vfx(VfxEvent::ProjectileArrived {
            target: effect.target,
            color: effect.color.to_string(),
        });
        match effect.kind {
            PendingKind::Damage { multiplier } => {
                if crate::combat::deal_damage(ctx, effect.source, effect.target, multiplier).is_none() {
                    debug!(skill = effect.skill_name, "projectile landed on nothing");
                }
            }
        }
    }
}
