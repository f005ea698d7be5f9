//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Buff, BuffKind, ResourceType, UnitId};
pub use crate::unit::{Unit, UnitClass};

// World and input
pub use crate::world::{Action, Intent, World};

// Combat
pub use crate::combat::HitReport;
pub use crate::error::{CastError, EquipError, WorldError};

// Events and views
pub use crate::events::{CombatEvents, LogKind, VfxEvent};
pub use crate::snapshot::UnitSnapshot;

// Config
pub use crate::config::{init_constants, init_constants_default};

// Re-exports from item_core
pub use item_core::{EquipSlot, Item, ItemRegistry};
