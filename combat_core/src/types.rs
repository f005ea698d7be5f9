use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a unit inside a [`crate::world::Roster`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub usize);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pool that gates a unit's skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    None,
    Rage,
    Mana,
    Energy,
    Focus,
}

impl ResourceType {
    /// Whether the maximum scales with intellect
    pub fn scales_with_intellect(&self) -> bool {
        matches!(self, ResourceType::Mana)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::None => write!(f, "none"),
            ResourceType::Rage => write!(f, "rage"),
            ResourceType::Mana => write!(f, "mana"),
            ResourceType::Energy => write!(f, "energy"),
            ResourceType::Focus => write!(f, "focus"),
        }
    }
}

/// Every buff or debuff a unit can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    /// 75% damage reduction
    ShieldWall,
    /// Rooted in place
    Frozen,
    /// Move speed halved
    Dazed,
    /// Move speed increased
    Sprint,
    /// Marker for an active absorb shield
    PowerWordShield,
}

impl BuffKind {
    /// Display name shown on the buff bar
    pub fn name(&self) -> &'static str {
        match self {
            BuffKind::ShieldWall => "Shield Wall",
            BuffKind::Frozen => "Frozen",
            BuffKind::Dazed => "Dazed",
            BuffKind::Sprint => "Sprint",
            BuffKind::PowerWordShield => "Power Word: Shield",
        }
    }

    /// Multiplier applied to move speed while active
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            BuffKind::Frozen => 0.0,
            BuffKind::Dazed => 0.5,
            BuffKind::Sprint => 1.7,
            BuffKind::ShieldWall | BuffKind::PowerWordShield => 1.0,
        }
    }
}

impl fmt::Display for BuffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A timed effect on a unit. At most one per kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub kind: BuffKind,
    /// Seconds left
    pub remaining: f64,
}

impl Buff {
    pub fn new(kind: BuffKind, duration: f64) -> Self {
        Buff {
            kind,
            remaining: duration,
        }
    }
}
