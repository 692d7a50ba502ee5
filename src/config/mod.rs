//! Configuration module for Link-Audit
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use link_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-audit.toml")).unwrap();
//! println!("Probing {} links at a time", config.probe.batch_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ProbeConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
