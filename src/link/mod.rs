//! Link data model
//!
//! This module defines the types that flow through the verification pipeline.
//!
//! # Components
//!
//! - `Scheme`: The URL protocol family being audited (HTTP or HTTPS)
//! - `LinkSource`: Which backing field a link came from, with that row's identifier
//! - `LinkRecord`: One discovered URL occurrence plus its probe outcome

mod record;
mod scheme;

pub use record::{LinkRecord, LinkSource, ProbeOutcome, RowMetadata, SourceKind, SourceRow};
pub use scheme::Scheme;
