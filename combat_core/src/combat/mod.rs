//! CombatResolver: damage rolls, mitigation, absorption, resource
//! generation, death and healing

mod auto_attack;
mod resolver;

pub use auto_attack::{auto_attack, can_auto_attack};
pub use resolver::{apply_damage, deal_damage, heal, mitigate, roll_damage, HitReport, Mitigation};
