//! Item database and item instances for the combat sandbox.
//!
//! Items are defined as TOML templates and materialized into [`Item`]
//! instances with a unique uid. A built-in database ships with the crate;
//! extra files can be loaded from a directory.

mod config;
mod item;
mod registry;
mod types;

pub use config::ItemFileConfig;
pub use item::{Item, ItemTemplate};
pub use registry::ItemRegistry;
pub use types::{Attribute, EquipSlot, ItemKind, Rarity, StatBonuses};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading item configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error looking up or validating item templates
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown item template: {0}")]
    UnknownItem(u32),
    #[error("Invalid item template {id}: {reason}")]
    InvalidTemplate { id: u32, reason: String },
}
