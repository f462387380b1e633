//! Common paths for Magpie data storage
//!
//! All Magpie data is stored under ~/.config/magpie/ on all platforms:
//! - config.toml - User configuration
//! - magpie.sqlite - Local store (post cache, search history)

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the Magpie data directory (~/.config/magpie/)
///
/// This is consistent across all platforms for simplicity.
pub fn magpie_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let magpie_dir = home.join(".config").join("magpie");
    fs::create_dir_all(&magpie_dir).context("Failed to create magpie directory")?;
    Ok(magpie_dir)
}

/// Get the config file path (~/.config/magpie/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(magpie_dir()?.join("config.toml"))
}

/// Get the store file path (~/.config/magpie/magpie.sqlite)
pub fn store_path() -> Result<PathBuf> {
    Ok(magpie_dir()?.join("magpie.sqlite"))
}
