//! File-backed document store: one JSON document holding every record.
//!
//! Each operation is load-mutate-save; the save goes through a temp file in
//! the same directory and an atomic rename, so a crash mid-write never leaves
//! a truncated store behind.

use crate::constants;
use crate::core::backend::{BackendError, DocumentStore};
use crate::models::credential::{Credential, CredentialKey};
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Credential>, BackendError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| BackendError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| BackendError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, mut records: Vec<Credential>) -> Result<(), BackendError> {
        // Stable on-disk and listing order; callers may not rely on it.
        records.sort_by(|a, b| {
            (a.username.as_str(), a.platform.as_str())
                .cmp(&(b.username.as_str(), b.platform.as_str()))
        });
        let content =
            serde_json::to_string_pretty(&records).map_err(|source| BackendError::Encode {
                path: self.path.clone(),
                source,
            })?;

        let write_err = |source| BackendError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;

        #[cfg(unix)]
        {
            let perm = fs::Permissions::from_mode(constants::STORE_FILE_MODE);
            tmp.as_file().set_permissions(perm).map_err(write_err)?;
        }

        tmp.persist(&self.path).map_err(|err| BackendError::Write {
            path: self.path.clone(),
            source: err.error,
        })?;
        Ok(())
    }
}

impl DocumentStore for JsonStore {
    fn find_one(&self, key: &CredentialKey) -> Result<Option<Credential>, BackendError> {
        Ok(self.load()?.into_iter().find(|c| key.matches(c)))
    }

    fn insert_one(&mut self, credential: Credential) -> Result<(), BackendError> {
        let mut records = self.load()?;
        records.push(credential);
        self.save(records)
    }

    fn update_one(&mut self, key: &CredentialKey, hash: &str) -> Result<bool, BackendError> {
        let mut records = self.load()?;
        let matched = match records.iter_mut().find(|c| key.matches(c)) {
            Some(cred) => {
                cred.hash = hash.to_string();
                cred.updated_at = Some(Utc::now());
                true
            }
            None => false,
        };
        if matched {
            self.save(records)?;
        }
        Ok(matched)
    }

    fn delete_one(&mut self, key: &CredentialKey) -> Result<u64, BackendError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|c| !key.matches(c));
        let removed = (before - records.len()) as u64;
        if removed > 0 {
            self.save(records)?;
        }
        Ok(removed)
    }

    fn find_all(&self) -> Result<Vec<Credential>, BackendError> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(username: &str, platform: &str) -> CredentialKey {
        CredentialKey::new(username, platform).unwrap()
    }

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("credentials.json"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.find_all().unwrap().is_empty());
        assert!(store.find_one(&key("alice", "gmail")).unwrap().is_none());
    }

    #[test]
    fn test_insert_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        let mut store = JsonStore::new(path.clone());
        store
            .insert_one(Credential::new(key("alice", "gmail"), "tok".into()))
            .unwrap();

        let reopened = JsonStore::new(path);
        let found = reopened.find_one(&key("alice", "GMAIL")).unwrap().unwrap();
        assert_eq!(found.hash, "tok");
    }

    #[test]
    fn test_update_and_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let k = key("alice", "gmail");
        store
            .insert_one(Credential::new(k.clone(), "old".into()))
            .unwrap();
        assert!(store.update_one(&k, "new").unwrap());
        assert_eq!(store.find_one(&k).unwrap().unwrap().hash, "new");
        assert_eq!(store.delete_one(&k).unwrap(), 1);
        assert_eq!(store.delete_one(&k).unwrap(), 0);
    }

    #[test]
    fn test_update_missing_is_not_written() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(!store.update_one(&key("nobody", "x"), "new").unwrap());
        // No file should appear from a no-op update.
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonStore::new(path);
        match store.find_all() {
            Err(BackendError::Parse { .. }) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_orders_records() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store
            .insert_one(Credential::new(key("bob", "zulip"), "1".into()))
            .unwrap();
        store
            .insert_one(Credential::new(key("alice", "gmail"), "2".into()))
            .unwrap();
        let all = store.find_all().unwrap();
        assert_eq!(all[0].username, "alice");
        assert_eq!(all[1].username, "bob");
    }

    #[cfg(unix)]
    #[test]
    fn test_store_file_mode() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store
            .insert_one(Credential::new(key("alice", "gmail"), "tok".into()))
            .unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, constants::STORE_FILE_MODE);
    }
}
