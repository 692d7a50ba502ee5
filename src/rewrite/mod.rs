//! HTTP to HTTPS link migration
//!
//! Verified HTTP links are converted to HTTPS copies for a second probing
//! pass. Only links good under both protocols are written back, each into
//! the field it was extracted from.

mod apply;
mod convert;

pub use apply::{apply_rewrites, plan_rewrites, Rewrite, RewriteSummary};
pub use convert::{convert, downgrade_url, upgrade_url};
