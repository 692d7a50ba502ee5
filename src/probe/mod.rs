//! Network probing of extracted links
//!
//! This module contains:
//! - The HEAD probe client with fixed redirect, timeout and TLS settings
//! - The batch prober that bounds in-flight requests per batch

mod batch;
mod client;

pub use batch::{partition_batches, BatchProber};
pub use client::{build_probe_client, describe_error, probe_url, EMPTY_REPLY_ERROR};
