//! # Taskboard Shared Library
//!
//! This crate contains the storage layer shared by the Taskboard API server:
//! the PostgreSQL connection pool, the migration runner, and the persisted
//! models with their CRUD operations.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migration runner
//! - `models`: database models (`User`, `Task`) and their operations

pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
