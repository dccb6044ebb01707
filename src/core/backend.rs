//! Document-store port for credential records.
//!
//! The credential store talks to persistence only through [`DocumentStore`];
//! filters are always the (username, normalized platform) pair. The trait is
//! synchronous: one interactive caller at a time, operations block until the
//! backend responds.

use crate::models::credential::{Credential, CredentialKey};
use chrono::Utc;
use std::path::PathBuf;
use thiserror::Error;

/// Backing-store failure. Distinct and recoverable; the core performs no
/// retries around it.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("read credential store {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse credential store {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("encode credential store {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("write credential store {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub trait DocumentStore {
    /// Fetch the record matching `key`, if any.
    fn find_one(&self, key: &CredentialKey) -> Result<Option<Credential>, BackendError>;

    /// Insert a new record. Callers check for duplicates first; the
    /// uniqueness invariant is theirs to uphold.
    fn insert_one(&mut self, credential: Credential) -> Result<(), BackendError>;

    /// Replace the hash of the record matching `key` and bump its update
    /// timestamp. Returns whether a record matched.
    fn update_one(&mut self, key: &CredentialKey, hash: &str) -> Result<bool, BackendError>;

    /// Remove the record matching `key`. Returns the number removed (0 or 1).
    fn delete_one(&mut self, key: &CredentialKey) -> Result<u64, BackendError>;

    /// Snapshot of every record. No ordering guarantee.
    fn find_all(&self) -> Result<Vec<Credential>, BackendError>;
}

/// In-memory backend, used as a test double and for ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Credential>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn find_one(&self, key: &CredentialKey) -> Result<Option<Credential>, BackendError> {
        Ok(self.records.iter().find(|c| key.matches(c)).cloned())
    }

    fn insert_one(&mut self, credential: Credential) -> Result<(), BackendError> {
        self.records.push(credential);
        Ok(())
    }

    fn update_one(&mut self, key: &CredentialKey, hash: &str) -> Result<bool, BackendError> {
        match self.records.iter_mut().find(|c| key.matches(c)) {
            Some(cred) => {
                cred.hash = hash.to_string();
                cred.updated_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_one(&mut self, key: &CredentialKey) -> Result<u64, BackendError> {
        let before = self.records.len();
        self.records.retain(|c| !key.matches(c));
        Ok((before - self.records.len()) as u64)
    }

    fn find_all(&self) -> Result<Vec<Credential>, BackendError> {
        Ok(self.records.clone())
    }
}
