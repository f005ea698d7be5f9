//! Rule constants and their TOML loading

mod constants;

pub use constants::{
    constants, constants_initialized, ensure_constants_initialized, init_constants,
    init_constants_default, AiConstants, CombatConstants, EventConstants, GameConstants, MovementConstants,
    StatConstants,
};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading rule constants
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error: {0}")]
    Validation(String),
}
