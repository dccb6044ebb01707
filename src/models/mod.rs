//! Data structures persisted or configured by the vault.

pub mod config;
pub mod credential;
