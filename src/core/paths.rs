//! Vault path resolution and directory structure.

use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub root: PathBuf,
    pub store_file: PathBuf,
    pub config_toml: PathBuf,
    pub vault_lock: PathBuf,
}

impl VaultPaths {
    /// Resolve the vault root from CLI arg, env var, or the home directory.
    pub fn resolve(root_arg: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = root_arg {
            return Ok(Self::from_root(root));
        }
        if let Ok(root) = env::var("CREDVAULT_ROOT") {
            return Ok(Self::from_root(PathBuf::from(root)));
        }
        if let Ok(home) = env::var("HOME") {
            return Ok(Self::from_root(
                PathBuf::from(home).join(constants::DEFAULT_ROOT_DIR),
            ));
        }
        Ok(Self::from_root(PathBuf::from(constants::DEFAULT_ROOT_DIR)))
    }

    /// Create vault paths from a root directory.
    pub fn from_root(root: PathBuf) -> Self {
        let store_file = root.join(constants::STORE_FILE);
        let config_toml = root.join(constants::CONFIG_FILE);
        let vault_lock = root.join(constants::LOCK_FILE);
        Self {
            root,
            store_file,
            config_toml,
            vault_lock,
        }
    }

    /// Create the root directory if missing and restrict it to the owner.
    pub fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .with_context(|| format!("create vault directory {}", self.root.display()))?;
        }
        #[cfg(unix)]
        {
            let perm = fs::Permissions::from_mode(constants::ROOT_DIR_MODE);
            fs::set_permissions(&self.root, perm).with_context(|| {
                format!("set permissions on vault directory {}", self.root.display())
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Display for VaultPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vault@{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root() {
        let paths = VaultPaths::from_root(PathBuf::from("/test"));
        assert_eq!(paths.root, PathBuf::from("/test"));
        assert_eq!(paths.store_file, PathBuf::from("/test/credentials.json"));
        assert_eq!(paths.config_toml, PathBuf::from("/test/config.toml"));
        assert_eq!(paths.vault_lock, PathBuf::from("/test/vault.lock"));
    }

    #[test]
    fn test_explicit_root_wins() {
        let paths = VaultPaths::resolve(Some(PathBuf::from("/elsewhere"))).unwrap();
        assert_eq!(paths.root, PathBuf::from("/elsewhere"));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_root_creates_restricted_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = VaultPaths::from_root(dir.path().join("vault"));
        paths.ensure_root().unwrap();
        let mode = fs::metadata(&paths.root).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, constants::ROOT_DIR_MODE);
    }
}
