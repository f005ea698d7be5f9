//! Fixed-step tick loop with the fail-stop guard

use combat_core::snapshot::{self, UnitSnapshot};
use combat_core::World;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, info};

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every enemy died
    Victory,
    /// Every party member died
    Defeat,
    /// The clock ran out with both sides standing
    TimeUp,
    /// A tick failed; no further ticks ran
    Crashed(String),
}

impl Outcome {
    pub fn is_crash(&self) -> bool {
        matches!(self, Outcome::Crashed(_))
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Simulated seconds when the loop stopped
    pub elapsed: f64,
    pub ticks: u64,
    /// Visual-effect triggers handed off by the loop
    pub vfx_triggers: usize,
    pub log: Vec<String>,
    pub units: Vec<UnitSnapshot>,
}

impl RunReport {
    /// Render the report for the terminal
    pub fn render(&self, json: bool) -> Result<String, serde_json::Error> {
        let mut out = String::new();

        out.push_str("=== Combat log ===\n");
        for line in &self.log {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str("\n=== Units ===\n");
        for unit in &self.units {
            out.push_str(&unit.summary());
            out.push('\n');
        }

        out.push('\n');
        match &self.outcome {
            Outcome::Crashed(reason) => {
                out.push_str(&format!("SIMULATION CRASHED: {}\n", reason));
            }
            outcome => {
                out.push_str(&format!("Result: {:?} after {:.1}s ({} ticks)\n", outcome, self.elapsed, self.ticks));
            }
        }

        if json {
            out.push('\n');
            out.push_str(&snapshot::to_json(&self.units)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Tick `world` in steps of `dt` until `duration` elapses or one side falls
pub fn run(world: &mut World, duration: f64, dt: f64) -> RunReport {
    let max_ticks = (duration / dt).ceil().max(0.0) as u64;
    let mut ticks = 0;
    let mut vfx_triggers = 0;
    let mut outcome = Outcome::TimeUp;

    while ticks < max_ticks {
        if let Err(reason) = guarded_tick(world, dt) {
            error!(%reason, clock = world.clock(), "simulation halted");
            outcome = Outcome::Crashed(reason);
            break;
        }
        ticks += 1;
        // No renderer here; take the triggers so they are counted once
        vfx_triggers += world.events_mut().drain_vfx().len();

        if world.enemies_defeated() {
            outcome = Outcome::Victory;
            break;
        }
        if world.party_defeated() {
            outcome = Outcome::Defeat;
            break;
        }
    }

    info!(?outcome, ticks, vfx_triggers, elapsed = world.clock(), "run finished");
    RunReport {
        outcome,
        elapsed: world.clock(),
        ticks,
        vfx_triggers,
        log: world.events().log_lines(),
        units: world.snapshots(),
    }
}

/// Run one tick, turning both tick errors and panics into a reason string
fn guarded_tick(world: &mut World, dt: f64) -> Result<(), String> {
    match panic::catch_unwind(AssertUnwindSafe(|| world.tick(dt))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
