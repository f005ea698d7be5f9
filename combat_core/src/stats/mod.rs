//! StatModel: attributes, equipment aggregation and derived combat stats

mod attributes;
mod recalc;
mod scaling;

pub use attributes::{Attributes, GearTotals};
pub use recalc::{derive_stats, recalc_stats, DerivedStats};
pub use scaling::{CasterScaling, DamageScalingPolicy, MeleeScaling, NoScaling};
