//! Centralized constants for paths, permissions, and limits.

/// Default vault directory name under `$HOME`.
pub const DEFAULT_ROOT_DIR: &str = ".credvault";

/// File holding the credential records (one JSON document).
pub const STORE_FILE: &str = "credentials.json";

/// Optional configuration file inside the vault root.
pub const CONFIG_FILE: &str = "config.toml";

/// Lock file guarding mutating operations.
pub const LOCK_FILE: &str = "vault.lock";

/// Permission mode for the vault root directory.
pub const ROOT_DIR_MODE: u32 = 0o700;

/// Permission mode for the credential store file.
pub const STORE_FILE_MODE: u32 = 0o600;

/// Maximum accepted password size in bytes.
pub const MAX_PASSWORD_SIZE: usize = 4096;
