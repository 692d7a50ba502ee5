//! Link-Audit: a link verification and protocol migration engine
//!
//! This crate scans the text fields of a content store for hyperlinks,
//! probes them in bounded concurrent batches, classifies the outcomes and
//! optionally rewrites verified HTTP links to HTTPS in the backing store.

pub mod classify;
pub mod config;
pub mod extract;
pub mod link;
pub mod probe;
pub mod rewrite;
pub mod run;
pub mod store;

use thiserror::Error;

/// Main error type for Link-Audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Report error: {0}")]
    Report(#[from] classify::ReportError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid run options: {0}")]
    Validation(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Link-Audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use link::{LinkRecord, LinkSource, ProbeOutcome, RowMetadata, Scheme, SourceKind};
pub use run::{RunController, RunMode, RunOptions, RunReport};
