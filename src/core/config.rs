//! Optional `config.toml` loading.

use crate::models::config::ConfigFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load the vault configuration. A missing file is the default config, not an
/// error; an unreadable or malformed one is an error the caller may choose to
/// downgrade to a warning.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read vault config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse vault config {}", path.display()))
}
