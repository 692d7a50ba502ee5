//! Run summary
//!
//! The `RunReport` is the immutable record of one completed run. The CLI
//! prints it through `print_summary`.

use crate::classify::{ReportKind, Verdict};
use crate::link::Scheme;
use crate::run::{RunMode, RunOptions};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub mode: RunMode,
    pub scheme: Scheme,
    pub course: Option<String>,
    pub check_conversion: bool,
    pub update: bool,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,

    /// Links extracted (or counted) within the bounds
    pub link_count: usize,

    pub good_http: usize,
    pub broken_http: usize,
    pub good_https: usize,
    pub broken_https: usize,

    /// Rows rewritten; `None` unless an update ran
    pub updated: Option<usize>,
    /// Rewrites that failed on a store error; `None` unless an update ran
    pub failed_rewrites: Option<usize>,
}

impl RunReport {
    /// Creates an empty report for a run started at `started_at`
    pub fn new(options: &RunOptions, started_at: DateTime<Utc>) -> Self {
        Self {
            mode: options.mode,
            scheme: options.scheme,
            course: options.course.clone(),
            check_conversion: options.check_conversion,
            update: options.update,
            started_at,
            elapsed: Duration::ZERO,
            link_count: 0,
            good_http: 0,
            broken_http: 0,
            good_https: 0,
            broken_https: 0,
            updated: None,
            failed_rewrites: None,
        }
    }

    /// Lines in the given report written this run, 0 if it was not written
    pub fn report_count(&self, kind: ReportKind) -> usize {
        match (kind.verdict, kind.scheme) {
            (Verdict::Good, Scheme::Http) => self.good_http,
            (Verdict::Broken, Scheme::Http) => self.broken_http,
            (Verdict::Good, Scheme::Https) => self.good_https,
            (Verdict::Broken, Scheme::Https) => self.broken_https,
        }
    }

    pub(crate) fn set_report_count(&mut self, kind: ReportKind, count: usize) {
        let slot = match (kind.verdict, kind.scheme) {
            (Verdict::Good, Scheme::Http) => &mut self.good_http,
            (Verdict::Broken, Scheme::Http) => &mut self.broken_http,
            (Verdict::Good, Scheme::Https) => &mut self.good_https,
            (Verdict::Broken, Scheme::Https) => &mut self.broken_https,
        };
        *slot = count;
    }

    pub fn course_label(&self) -> &str {
        self.course.as_deref().unwrap_or("all courses")
    }

    /// Elapsed seconds rounded to one decimal
    pub fn elapsed_secs(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 10.0).round() / 10.0
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Prints a run summary to stdout
pub fn print_summary(report: &RunReport) {
    println!("=== Link Audit Summary ===\n");

    println!("Run:");
    println!("  Started: {}", report.started_at.to_rfc3339());
    println!("  Mode: {}", report.mode);
    println!("  Scheme: {}", report.scheme);
    println!("  Course: {}", report.course_label());
    println!("  Check conversion: {}", yes_no(report.check_conversion));
    println!("  Update: {}", yes_no(report.update));
    println!("  Elapsed: {:.1}s", report.elapsed_secs());
    println!();

    if report.mode == RunMode::Count {
        println!("Links found: {}", report.link_count);
        return;
    }

    println!("Links checked: {}", report.link_count);
    println!();

    println!("Reports:");
    for kind in ReportKind::ALL {
        println!("  {}: {}", kind.file_name(), report.report_count(kind));
    }

    if let Some(updated) = report.updated {
        println!();
        println!("Links updated: {}", updated);
        if let Some(failed) = report.failed_rewrites.filter(|&n| n > 0) {
            println!("Failed rewrites: {} (see log)", failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_has_zero_counts() {
        let report = RunReport::new(&RunOptions::default(), Utc::now());
        for kind in ReportKind::ALL {
            assert_eq!(report.report_count(kind), 0);
        }
        assert_eq!(report.updated, None);
        assert_eq!(report.course_label(), "all courses");
    }

    #[test]
    fn test_report_count_slots() {
        let mut report = RunReport::new(&RunOptions::default(), Utc::now());
        report.set_report_count(ReportKind::new(Verdict::Broken, Scheme::Https), 7);
        assert_eq!(report.broken_https, 7);
        assert_eq!(report.good_http, 0);
    }

    #[test]
    fn test_elapsed_rounding() {
        let mut report = RunReport::new(&RunOptions::default(), Utc::now());
        report.elapsed = Duration::from_millis(12_345);
        assert_eq!(report.elapsed_secs(), 12.3);
        report.elapsed = Duration::from_millis(960);
        assert_eq!(report.elapsed_secs(), 1.0);
    }

    #[test]
    fn test_course_label_uses_filter() {
        let options = RunOptions {
            course: Some("Physics 101".to_string()),
            ..Default::default()
        };
        let report = RunReport::new(&options, Utc::now());
        assert_eq!(report.course_label(), "Physics 101");
    }
}
