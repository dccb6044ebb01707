//! Typed credential record and its lookup key.

use crate::core::normalize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidKeyError {
    #[error("username cannot be empty")]
    EmptyUsername,
    #[error("platform cannot be empty")]
    EmptyPlatform,
}

/// Natural key of a credential: the username as given (case-sensitive,
/// no normalization) plus the normalized platform name.
///
/// Construction is the single place platform normalization happens, so every
/// store/lookup/verify/update/delete resolves "gmail", " GMAIL " and "GMail"
/// to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialKey {
    pub username: String,
    pub platform: String,
}

impl CredentialKey {
    /// Build a key, normalizing the platform. Rejects an empty username and a
    /// platform that normalizes to the empty string (whitespace-only input
    /// would otherwise collapse every no-platform entry into one record).
    pub fn new(username: &str, platform: &str) -> Result<Self, InvalidKeyError> {
        if username.is_empty() {
            return Err(InvalidKeyError::EmptyUsername);
        }
        let platform = normalize::normalize_platform(platform);
        if platform.is_empty() {
            return Err(InvalidKeyError::EmptyPlatform);
        }
        Ok(Self {
            username: username.to_string(),
            platform,
        })
    }

    pub fn matches(&self, cred: &Credential) -> bool {
        cred.username == self.username && cred.platform == self.platform
    }
}

impl std::fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.username, self.platform)
    }
}

/// A stored credential. `hash` is a self-describing PHC token; there is no
/// plaintext field by construction. Timestamps are display metadata only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub platform: String,
    pub hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// New record for a validated key. `created_at` is set now; `updated_at`
    /// stays empty until the hash is replaced.
    pub fn new(key: CredentialKey, hash: String) -> Self {
        Self {
            username: key.username,
            platform: key.platform,
            hash,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn key(&self) -> CredentialKey {
        CredentialKey {
            username: self.username.clone(),
            platform: self.platform.clone(),
        }
    }
}
