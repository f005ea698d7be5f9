//! combat_core - Real-time combat resolution for a small party skirmish
//!
//! This library provides:
//! - StatModel: base attributes plus gear folded into hp, resource and damage
//! - Unit: a combatant with resources, buffs, equipment and a skill book
//! - CombatResolver: damage, mitigation, absorption, rage and healing
//! - SkillEngine: cast validation and per-class effect tables
//! - AIController: follow/engage behavior for party members
//! - World: the fixed-order tick driver tying it all together
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use combat_core::prelude::*;
//!
//! let mut world = World::new(42);
//! let warrior = world.add_party_member(Unit::new(UnitClass::Warrior, 0.0, 0.0));
//! let dummy = world.add_enemy(Unit::new(UnitClass::TrainingDummy, 40.0, -8.0));
//! world.set_target(warrior, Some(dummy))?;
//!
//! for _ in 0..40 {
//!     world.tick(0.25)?;
//! }
//! for line in world.events().log_lines() {
//!     println!("{}", line);
//! }
//! ```

pub mod ai;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod pending;
pub mod prelude;
pub mod skill;
pub mod snapshot;
pub mod stats;
pub mod types;
pub mod unit;
pub mod world;

// Core API - what most users need
pub use error::{CastError, EquipError, TargetMismatch, WorldError};
pub use events::{CombatEvents, FloatingText, LogEntry, LogKind, VfxEvent};
pub use snapshot::{SkillSnapshot, UnitSnapshot};
pub use types::{Buff, BuffKind, ResourceType, UnitId};
pub use unit::{Unit, UnitClass};
pub use world::{Action, Intent, TickContext, World};

// Configuration
pub use config::{constants, init_constants, init_constants_default, GameConstants};

// Re-export the item types units carry
pub use item_core::{EquipSlot, Item, ItemRegistry};
