//! Combat events produced for the view layer: floating text, the combat
//! log and visual-effect hooks. The core never renders these itself.

use crate::types::UnitId;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

pub const COLOR_DAMAGE: &str = "#ffeb3b";
pub const COLOR_HEAL: &str = "#2ecc71";
pub const COLOR_ABSORB: &str = "#ffffff";
pub const COLOR_BLOCK: &str = "#aaaaaa";
pub const COLOR_FEEDBACK: &str = "#ff5555";
pub const COLOR_NEUTRAL: &str = "#aaaaaa";

/// Short-lived text drawn near a unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingText {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: String,
    /// Seconds until it disappears
    pub ttl: f64,
}

/// Category of a combat log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Damage,
    Heal,
    Absorb,
    Block,
    Death,
    Skill,
    Buff,
    Equipment,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// Simulated seconds since the start of the fight
    pub time: f64,
    pub kind: LogKind,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", format_clock(self.time), self.message)
    }
}

/// Render seconds as `mm:ss.s`
pub fn format_clock(seconds: f64) -> String {
    let tenths = (seconds.max(0.0) * 10.0).floor() as u64;
    let minutes = tenths / 600;
    let rest = tenths % 600;
    format!("{:02}:{:02}.{}", minutes, rest / 10, rest % 10)
}

/// Trigger for a particle or animation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VfxEvent {
    ProjectileSpawned {
        source: UnitId,
        target: UnitId,
        color: String,
        speed: f64,
    },
    ProjectileArrived {
        target: UnitId,
        color: String,
    },
    Nova {
        x: f64,
        y: f64,
        radius: f64,
        color: String,
    },
    Beam {
        source: UnitId,
        target: UnitId,
        color: String,
    },
    Impact {
        x: f64,
        y: f64,
        color: String,
    },
}

/// Everything the core emits for consumers during a tick
#[derive(Debug, Clone, Serialize)]
pub struct CombatEvents {
    texts: Vec<FloatingText>,
    log: VecDeque<LogEntry>,
    vfx: Vec<VfxEvent>,
    log_capacity: usize,
    text_ttl: f64,
}

impl Default for CombatEvents {
    fn default() -> Self {
        let constants = &crate::config::constants().events;
        Self::new(constants.combat_log_lines, constants.floating_text_ttl)
    }
}

impl CombatEvents {
    pub fn new(log_capacity: usize, text_ttl: f64) -> Self {
        CombatEvents {
            texts: Vec::new(),
            log: VecDeque::with_capacity(log_capacity),
            vfx: Vec::new(),
            log_capacity: log_capacity.max(1),
            text_ttl,
        }
    }

    /// Spawn a floating text
    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, color: &str) {
        self.texts.push(FloatingText {
            x,
            y,
            text: text.into(),
            color: color.to_string(),
            ttl: self.text_ttl,
        });
    }

    /// Append a combat log line, dropping the oldest past capacity
    pub fn log(&mut self, time: f64, kind: LogKind, message: impl Into<String>) {
        self.log.push_back(LogEntry {
            time,
            kind,
            message: message.into(),
        });
        while self.log.len() > self.log_capacity {
            self.log.pop_front();
        }
    }

    /// Drop the previous tick's visual-effect triggers.
    ///
    /// Triggers live for one tick; a renderer reads or drains them between
    /// ticks. Floating texts and the log keep their own lifetimes.
    pub fn begin_frame(&mut self) {
        self.vfx.clear();
    }

    pub fn vfx(&mut self, event: VfxEvent) {
        self.vfx.push(event);
    }

    /// Age floating texts and drop expired ones
    pub fn tick(&mut self, dt: f64) {
        self.texts.retain_mut(|text| {
            text.ttl -= dt;
            text.ttl > 0.0
        });
    }

    pub fn texts(&self) -> &[FloatingText] {
        &self.texts
    }

    pub fn log_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.iter()
    }

    /// Formatted log lines, oldest first
    pub fn log_lines(&self) -> Vec<String> {
        self.log.iter().map(|entry| entry.to_string()).collect()
    }

    pub fn pending_vfx(&self) -> &[VfxEvent] {
        &self.vfx
    }

    /// Hand the current visual-effect triggers to the renderer
    pub fn drain_vfx(&mut self) -> Vec<VfxEvent> {
        std::mem::take(&mut self.vfx)
    }

}
