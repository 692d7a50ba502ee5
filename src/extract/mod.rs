//! Link extraction from store rows
//!
//! This module scans the text fields of fetched rows for links of one
//! scheme and turns each match into a `LinkRecord`, applying a lower and
//! upper bound on the global match index across all rows.

mod pattern;

pub use pattern::{find_links, link_pattern, replace_link};

use crate::link::{LinkRecord, Scheme, SourceRow};

/// Window of global match indices to keep
///
/// `lower` is inclusive and `upper` exclusive. A window with
/// `lower >= upper` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractBounds {
    pub lower: usize,
    pub upper: usize,
}

impl ExtractBounds {
    pub fn new(lower: usize, upper: usize) -> Self {
        Self { lower, upper }
    }

    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }
}

impl Default for ExtractBounds {
    fn default() -> Self {
        Self {
            lower: 0,
            upper: 1000,
        }
    }
}

/// Extracts the links of `scheme` from `rows`
///
/// Rows are scanned in order, matches within a row in order of appearance.
/// The first `bounds.lower` matches across the whole set are skipped and
/// extraction stops entirely once `bounds.upper` matches have been seen.
///
/// # Arguments
///
/// * `rows` - The rows to scan, in traversal order
/// * `scheme` - Which scheme's links to match
/// * `bounds` - Window of global match indices to keep
///
/// # Returns
///
/// The selected records, in extraction order
pub fn extract_links(rows: &[SourceRow], scheme: Scheme, bounds: ExtractBounds) -> Vec<LinkRecord> {
    let mut records = Vec::new();
    scan(rows, scheme, bounds, |index, url, row| {
        records.push(LinkRecord::new(index, url, row.source, row.metadata.clone()));
    });
    records
}

/// Counts the links `extract_links` would return, without building records
pub fn count_links(rows: &[SourceRow], scheme: Scheme, bounds: ExtractBounds) -> usize {
    let mut count = 0;
    scan(rows, scheme, bounds, |_, _, _| count += 1);
    count
}

fn scan<F>(rows: &[SourceRow], scheme: Scheme, bounds: ExtractBounds, mut emit: F)
where
    F: FnMut(usize, &str, &SourceRow),
{
    if bounds.is_empty() {
        if bounds.lower > bounds.upper {
            tracing::warn!(
                "Lower bound {} exceeds upper bound {}, selecting no links",
                bounds.lower,
                bounds.upper
            );
        }
        return;
    }

    let mut index = 0;
    for row in rows {
        for url in find_links(&row.text, scheme) {
            if index >= bounds.lower {
                emit(index, url, row);
            }
            index += 1;

            if index >= bounds.upper {
                return;
            }
        }
    }
}
