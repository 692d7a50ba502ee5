//! Write-back of verified protocol upgrades
//!
//! Rewrites are planned by joining the verified HTTP and HTTPS sets on the
//! extraction index, then applied one row at a time. A failure on one row
//! is logged and does not stop the rest.

use crate::classify::is_good;
use crate::extract::replace_link;
use crate::link::{LinkRecord, LinkSource, Scheme, SourceKind};
use crate::rewrite::convert::downgrade_url;
use crate::store::{ContentStore, StoreResult};
use std::collections::HashMap;

/// One planned upgrade of one link in one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub index: usize,
    pub source: LinkSource,
    pub from: String,
    pub to: String,
}

/// Counts from applying a rewrite plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Rows written
    pub updated: usize,
    /// Rows that no longer contained the old link
    pub unchanged: usize,
    /// Rows whose read or write failed
    pub failed: usize,
}

/// Plans rewrites for links verified under both protocols
///
/// A rewrite is planned only when an HTTPS record has a good HTTP record
/// with the same index and source whose URL is the HTTPS URL downgraded.
pub fn plan_rewrites(http_good: &[LinkRecord], https_good: &[LinkRecord]) -> Vec<Rewrite> {
    let originals: HashMap<usize, &LinkRecord> = http_good
        .iter()
        .filter(|r| is_good(r))
        .map(|r| (r.index, r))
        .collect();

    https_good
        .iter()
        .filter(|upgraded| is_good(upgraded))
        .filter_map(|upgraded| {
            let original = originals.get(&upgraded.index)?;
            if original.source != upgraded.source || downgrade_url(&upgraded.url) != original.url {
                return None;
            }
            Some(Rewrite {
                index: upgraded.index,
                source: upgraded.source,
                from: original.url.clone(),
                to: upgraded.url.clone(),
            })
        })
        .collect()
}

/// Applies planned rewrites to the store, one read-modify-write per rewrite
pub fn apply_rewrites<S: ContentStore + ?Sized>(store: &mut S, plan: &[Rewrite]) -> RewriteSummary {
    let mut summary = RewriteSummary::default();

    for rewrite in plan {
        match apply_rewrite(store, rewrite) {
            Ok(true) => {
                tracing::debug!("Rewrote {} -> {} in {}", rewrite.from, rewrite.to, rewrite.source);
                summary.updated += 1;
            }
            Ok(false) => {
                tracing::debug!("{} no longer holds {}", rewrite.source, rewrite.from);
                summary.unchanged += 1;
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to rewrite {} in {}: {}",
                    rewrite.from,
                    rewrite.source,
                    e
                );
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Rewrites applied: {} updated, {} unchanged, {} failed",
        summary.updated,
        summary.unchanged,
        summary.failed
    );

    summary
}

/// Applies one rewrite, returning whether the row was written
fn apply_rewrite<S: ContentStore + ?Sized>(store: &mut S, rewrite: &Rewrite) -> StoreResult<bool> {
    let current = store.read_field(&rewrite.source)?;

    let updated = match rewrite.source.kind() {
        SourceKind::ExternalUrl => {
            if current.trim() != rewrite.from {
                return Ok(false);
            }
            rewrite.to.clone()
        }
        SourceKind::ChapterContent | SourceKind::SectionSummary => {
            let (text, replaced) = replace_link(&current, Scheme::Http, &rewrite.from, &rewrite.to);
            if replaced == 0 {
                return Ok(false);
            }
            text
        }
    };

    store.write_field(&rewrite.source, &updated)?;
    Ok(true)
}
