//! Good/broken link report files
//!
//! Each report is a flat text file with one comma-joined line per link:
//! course full name, short name, section, book, title, URL, status code,
//! transport error. Files are overwritten on every write.

use crate::link::{LinkRecord, Scheme};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Outcome class of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Good,
    Broken,
}

/// One of the four report artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportKind {
    pub verdict: Verdict,
    pub scheme: Scheme,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::new(Verdict::Good, Scheme::Http),
        ReportKind::new(Verdict::Broken, Scheme::Http),
        ReportKind::new(Verdict::Good, Scheme::Https),
        ReportKind::new(Verdict::Broken, Scheme::Https),
    ];

    pub const fn new(verdict: Verdict, scheme: Scheme) -> Self {
        Self { verdict, scheme }
    }

    /// File name of this report inside the results directory
    pub fn file_name(&self) -> &'static str {
        match (self.verdict, self.scheme) {
            (Verdict::Good, Scheme::Http) => "good_http_links.txt",
            (Verdict::Broken, Scheme::Http) => "broken_http_links.txt",
            (Verdict::Good, Scheme::Https) => "good_https_links.txt",
            (Verdict::Broken, Scheme::Https) => "broken_https_links.txt",
        }
    }

    pub fn path_in(&self, results_dir: &Path) -> PathBuf {
        results_dir.join(self.file_name())
    }
}

/// Formats one record as a report line, without the trailing newline
pub fn format_report_line(record: &LinkRecord) -> String {
    let meta = &record.metadata;
    let status = record
        .status_code()
        .map(|code| code.to_string())
        .unwrap_or_default();

    [
        meta.course_fullname.as_deref().unwrap_or(""),
        meta.course_shortname.as_deref().unwrap_or(""),
        meta.container_name.as_deref().unwrap_or(""),
        meta.book_name.as_deref().unwrap_or(""),
        meta.title.as_deref().unwrap_or(""),
        record.url.as_str(),
        status.as_str(),
        record.transport_error().unwrap_or(""),
    ]
    .join(",")
}

/// Renders records as a newline-terminated report body
pub fn render_report(records: &[LinkRecord]) -> String {
    let mut body = String::new();
    for record in records {
        body.push_str(&format_report_line(record));
        body.push('\n');
    }
    body
}

/// Writes (overwriting) one report file
///
/// The results directory is created if it does not exist.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(ReportError)` - Failed to create the directory or write the file
pub fn write_report(results_dir: &Path, kind: ReportKind, records: &[LinkRecord]) -> ReportResult<PathBuf> {
    let path = kind.path_in(results_dir);
    let wrap = |source| ReportError::Write {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(results_dir).map_err(wrap)?;
    let mut file = File::create(&path).map_err(wrap)?;
    file.write_all(render_report(records).as_bytes()).map_err(wrap)?;

    tracing::info!("Wrote {} lines to {}", records.len(), path.display());
    Ok(path)
}
