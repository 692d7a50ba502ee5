//! Content store access
//!
//! This module handles all database operations for the audit, including:
//! - SQLite database initialization and schema management
//! - Filtered reads of chapter, section summary, and external URL rows
//! - Single-row field reads and writes for link rewriting

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStore;
pub use traits::{ContentStore, StoreError, StoreResult};

use std::path::Path;

/// Opens the content store at `path`, creating the schema if needed
pub fn open_store(path: &Path) -> StoreResult<SqliteStore> {
    SqliteStore::open(path)
}
