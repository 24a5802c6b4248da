//! Configuration file loading
//!
//! Every option resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! This module covers tier 3; the merge itself lives in each service's
//! `Config::resolve`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional settings read from the TOML config file.
///
/// Absent keys fall through to the next resolution tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub notion_api_key: Option<String>,
    pub notion_database_id: Option<String>,
    pub google_api_key: Option<String>,
    pub google_cx: Option<String>,
    pub title_variations: Option<bool>,
}

/// Platform config file path (`~/.config/revq/config.toml` on Linux)
pub fn config_file_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("revq").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// Load the platform config file; an absent file yields defaults.
pub fn load_toml_config() -> Result<TomlConfig> {
    load_toml_config_from(&config_file_path()?)
}

/// Load a TOML config from an explicit path; an absent file yields defaults.
pub fn load_toml_config_from(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}
