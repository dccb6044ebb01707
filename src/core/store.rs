//! Credential store: the state machine over (username, platform) keys.
//!
//! Every operation builds a validated [`CredentialKey`] first, so platform
//! normalization is applied identically on store, lookup, verify, update, and
//! delete. The backing store is injected at construction; there is no
//! process-global handle.
//!
//! Failure signals are deliberately flat: verify and update never distinguish
//! "no such credential" from "wrong password", so neither usernames nor
//! platforms can be enumerated through them.

use crate::core::backend::{BackendError, DocumentStore};
use crate::core::hashing;
use crate::models::credential::{Credential, CredentialKey, InvalidKeyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),
    #[error("hash password: {0}")]
    Hash(#[from] argon2::password_hash::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result of a store request. A duplicate is informational, never an
/// overwrite: replacing a hash requires proof of the old password via
/// [`CredentialStore::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    AlreadyExists,
}

/// Result of an update request. `Rejected` carries no cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Rejected,
}

pub struct CredentialStore<S: DocumentStore> {
    backend: S,
}

impl<S: DocumentStore> CredentialStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Store a new credential. If one already exists for the key this is a
    /// no-op reporting [`StoreOutcome::AlreadyExists`]; the stored hash is
    /// untouched.
    pub fn store(
        &mut self,
        username: &str,
        platform: &str,
        password: &str,
    ) -> Result<StoreOutcome, StoreError> {
        let key = CredentialKey::new(username, platform)?;
        if self.backend.find_one(&key)?.is_some() {
            return Ok(StoreOutcome::AlreadyExists);
        }
        let hash = hashing::hash(password)?;
        self.backend.insert_one(Credential::new(key, hash))?;
        Ok(StoreOutcome::Stored)
    }

    /// Fetch the stored hash token for a key, if any.
    pub fn lookup(&self, username: &str, platform: &str) -> Result<Option<String>, StoreError> {
        let key = CredentialKey::new(username, platform)?;
        Ok(self.backend.find_one(&key)?.map(|c| c.hash))
    }

    /// Check a password. Absent record and wrong password both yield `false`;
    /// the absent path still runs one full hash verification so response time
    /// does not reveal whether the record exists.
    pub fn verify(
        &self,
        username: &str,
        platform: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        let key = CredentialKey::new(username, platform)?;
        match self.backend.find_one(&key)? {
            Some(cred) => Ok(hashing::verify(&cred.hash, password)),
            None => {
                let _ = hashing::verify(hashing::DECOY_TOKEN, password);
                Ok(false)
            }
        }
    }

    /// Replace a stored hash, gated on proof of the old password. A missing
    /// record and a wrong old password both come back as
    /// [`UpdateOutcome::Rejected`].
    pub fn update(
        &mut self,
        username: &str,
        platform: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<UpdateOutcome, StoreError> {
        let key = CredentialKey::new(username, platform)?;
        let proven = match self.backend.find_one(&key)? {
            Some(cred) => hashing::verify(&cred.hash, old_password),
            None => {
                let _ = hashing::verify(hashing::DECOY_TOKEN, old_password);
                false
            }
        };
        if !proven {
            return Ok(UpdateOutcome::Rejected);
        }
        let hash = hashing::hash(new_password)?;
        self.backend.update_one(&key, &hash)?;
        Ok(UpdateOutcome::Updated)
    }

    /// Remove a credential. Returns the number removed (0 or 1) so callers
    /// can tell "deleted" from "nothing to delete".
    pub fn delete(&mut self, username: &str, platform: &str) -> Result<u64, StoreError> {
        let key = CredentialKey::new(username, platform)?;
        Ok(self.backend.delete_one(&key)?)
    }

    /// Snapshot of every record, for display. Contains hash tokens only.
    pub fn list_all(&self) -> Result<Vec<Credential>, StoreError> {
        Ok(self.backend.find_all()?)
    }
}
