//! Core business logic modules.

pub mod backend;
pub mod config;
pub mod file_lock;
pub mod hashing;
pub mod json_store;
pub mod normalize;
pub mod paths;
pub mod store;
