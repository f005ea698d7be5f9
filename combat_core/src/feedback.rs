//! Rate limiting for cast-rejection messages

use crate::types::UnitId;
use std::collections::HashMap;

/// Remembers when each (unit, skill) pair last showed a rejection
#[derive(Debug, Clone)]
pub struct FeedbackLimiter {
    interval: f64,
    last_shown: HashMap<(UnitId, u8), f64>,
}

impl Default for FeedbackLimiter {
    fn default() -> Self {
        Self::new(crate::config::constants().combat.feedback_interval)
    }
}

impl FeedbackLimiter {
    pub fn new(interval: f64) -> Self {
        FeedbackLimiter {
            interval,
            last_shown: HashMap::new(),
        }
    }

    /// Whether a message may be shown now; records the time if so
    pub fn allow(&mut self, unit: UnitId, skill: u8, now: f64) -> bool {
        match self.last_shown.get(&(unit, skill)) {
            Some(&last) if now - last < self.interval => false,
            _ => {
                self.last_shown.insert((unit, skill), now);
                true
            }
        }
    }
}
