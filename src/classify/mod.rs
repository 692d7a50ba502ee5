//! Outcome classification and reporting
//!
//! This module handles:
//! - Partitioning probed links into good and broken sets
//! - Collecting HTTP links eligible for HTTPS conversion
//! - Writing the good/broken report files for a scheme

mod report;
mod rules;

pub use report::{
    format_report_line, render_report, write_report, ReportError, ReportKind, ReportResult,
    Verdict,
};
pub use rules::{
    has_success_status, is_embedded_video, is_empty_reply, is_good, is_mathml_link,
    EMBED_SSL_ERROR,
};

use crate::link::{LinkRecord, Scheme};
use std::path::Path;

/// Partition of a probed link set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub good: Vec<LinkRecord>,
    pub broken: Vec<LinkRecord>,
    /// Good HTTP links to re-check under HTTPS; empty unless requested
    pub convertible: Vec<LinkRecord>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.good.len() + self.broken.len()
    }
}

/// Classifies probed records into good and broken sets
///
/// # Arguments
///
/// * `records` - Probed link records
/// * `is_https` - Whether these are HTTPS links
/// * `collect_convertible` - Whether to collect good HTTP links for conversion;
///   ignored for HTTPS sets
pub fn classify(records: Vec<LinkRecord>, is_https: bool, collect_convertible: bool) -> Classification {
    let mut result = Classification::default();
    let collect = collect_convertible && !is_https;

    for record in records {
        if is_good(&record) {
            if collect {
                result.convertible.push(record.clone());
            }
            result.good.push(record);
        } else {
            result.broken.push(record);
        }
    }

    tracing::info!(
        "Classified {} links: {} good, {} broken",
        result.total(),
        result.good.len(),
        result.broken.len()
    );

    result
}

/// Line counts of the two reports written for one scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrittenReports {
    pub good: usize,
    pub broken: usize,
}

/// Writes the good and broken report files for `scheme`, overwriting both
pub fn write_reports(
    classification: &Classification,
    scheme: Scheme,
    results_dir: &Path,
) -> ReportResult<WrittenReports> {
    write_report(
        results_dir,
        ReportKind::new(Verdict::Broken, scheme),
        &classification.broken,
    )?;
    write_report(
        results_dir,
        ReportKind::new(Verdict::Good, scheme),
        &classification.good,
    )?;

    Ok(WrittenReports {
        good: classification.good.len(),
        broken: classification.broken.len(),
    })
}
