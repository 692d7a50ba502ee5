//! Store traits and error types
//!
//! This module defines the interface the audit needs from the content
//! store: filtered row reads for extraction, and single-row field reads and
//! writes for rewriting.

use crate::link::{LinkSource, Scheme, SourceRow};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Row not found: {0}")]
    RowNotFound(LinkSource),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for content store implementations
///
/// Every call is one statement scoped to one row or one filtered read; no
/// call holds a lock across the probing phase.
pub trait ContentStore {
    // ===== Extraction Reads =====

    /// Fetches book chapter rows whose content mentions `scheme`
    ///
    /// # Arguments
    ///
    /// * `scheme` - Scheme substring to pre-filter on
    /// * `course` - Exact course full name to restrict to, or all courses
    fn fetch_chapter_rows(&self, scheme: Scheme, course: Option<&str>) -> StoreResult<Vec<SourceRow>>;

    /// Fetches course section rows whose summary mentions `scheme`
    fn fetch_summary_rows(&self, scheme: Scheme, course: Option<&str>) -> StoreResult<Vec<SourceRow>>;

    /// Fetches external URL resource rows whose address mentions `scheme`
    fn fetch_external_url_rows(&self, scheme: Scheme, course: Option<&str>) -> StoreResult<Vec<SourceRow>>;

    /// Fetches every candidate row in extraction order
    ///
    /// Chapter rows come first, then section summaries, then external URLs.
    fn fetch_source_rows(&self, scheme: Scheme, course: Option<&str>) -> StoreResult<Vec<SourceRow>> {
        let mut rows = self.fetch_chapter_rows(scheme, course)?;
        rows.extend(self.fetch_summary_rows(scheme, course)?);
        rows.extend(self.fetch_external_url_rows(scheme, course)?);
        Ok(rows)
    }

    // ===== Rewrite Access =====

    /// Reads the current value of the field a link lives in
    fn read_field(&self, source: &LinkSource) -> StoreResult<String>;

    /// Replaces the whole value of the field a link lives in
    fn write_field(&mut self, source: &LinkSource, value: &str) -> StoreResult<()>;

    // ===== Lookup =====

    /// Lists distinct course full names
    fn list_courses(&self) -> StoreResult<Vec<String>>;
}
