//! Personal credential vault CLI.
//!
//! Stores one salted password hash per (username, platform) pair, verifies
//! supplied passwords against it, and supports update/delete/list. Plaintext
//! is never persisted; only self-describing Argon2id tokens are.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Business logic (hashing, normalization, credential store, backends)
//! - `models` — Data structures

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
