//! Error types for casting, equipment and the tick driver

use crate::types::{ResourceType, UnitId};
use item_core::EquipSlot;
use thiserror::Error;

/// Why a cast was rejected
///
/// Every variant except `UnknownSkill`, `UnknownUnit` and `SourceDead` is
/// a normal gameplay outcome shown to the caster as feedback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("Skill is on cooldown")]
    OnCooldown,
    #[error("Not enough {0}")]
    InsufficientResource(ResourceType),
    #[error("No target")]
    NoTarget,
    #[error("Invalid target: {0}")]
    WrongTargetType(TargetMismatch),
    #[error("Target too close")]
    TooClose,
    #[error("Target too far")]
    TooFar,
    #[error("Unknown skill {0}")]
    UnknownSkill(u8),
    #[error("Unknown unit {0}")]
    UnknownUnit(UnitId),
    #[error("Caster is dead")]
    SourceDead,
}

impl CastError {
    /// Whether this rejection points at a caller bug rather than gameplay
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            CastError::UnknownSkill(_) | CastError::UnknownUnit(_) | CastError::SourceDead
        )
    }
}

/// Which target-type rule a cast broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TargetMismatch {
    #[error("must target an enemy")]
    NotEnemy,
    #[error("must target a party member")]
    NotFriend,
    #[error("can only target yourself")]
    NotSelf,
}

/// Why an equip or unequip request was a no-op
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("Bag slot {0} is empty")]
    EmptyBagSlot(usize),
    #[error("Bag slot {0} does not exist")]
    BagIndexOutOfRange(usize),
    #[error("{0} cannot be equipped")]
    InvalidSlot(String),
    #[error("Inventory is full")]
    InventoryFull,
    #[error("Nothing equipped in {0}")]
    EmptyEquipSlot(EquipSlot),
    #[error("Unknown unit {0}")]
    UnknownUnit(UnitId),
}

/// Failure of the outer tick driver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("Invalid tick delta: {0}")]
    InvalidDelta(f64),
    #[error("Unknown unit {0}")]
    UnknownUnit(UnitId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_message() {
        let err = CastError::InsufficientResource(ResourceType::Rage);
        assert_eq!(err.to_string(), "Not enough rage");
        assert!(!err.is_programmer_error());
    }

    #[test]
    fn test_target_message() {
        let err = CastError::WrongTargetType(TargetMismatch::NotFriend);
        assert_eq!(err.to_string(), "Invalid target: must target a party member");
    }
}
