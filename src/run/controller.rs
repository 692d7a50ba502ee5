//! Run orchestration
//!
//! The controller sequences one run end to end:
//! - Fetch candidate rows from the store
//! - Extract links within the configured bounds
//! - Probe them in batches and classify the outcomes
//! - Optionally re-probe good HTTP links as HTTPS and rewrite the store
//!
//! Store reads all happen before probing and store writes after it, so no
//! store access overlaps network I/O.

use crate::classify::{classify, write_reports, Classification, ReportKind, Verdict};
use crate::config::Config;
use crate::extract::{count_links, extract_links};
use crate::link::{LinkRecord, Scheme};
use crate::probe::BatchProber;
use crate::rewrite::{apply_rewrites, convert, plan_rewrites};
use crate::run::{RunMode, RunOptions, RunReport, RunTimer};
use crate::store::ContentStore;
use crate::Result;
use std::path::{Path, PathBuf};

/// Drives audit runs against one content store
pub struct RunController<S: ContentStore> {
    config: Config,
    store: S,
}

impl<S: ContentStore> RunController<S> {
    /// Creates a controller over `store` using the probe and output settings of `config`
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn results_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.output.results_dir)
    }

    /// Executes one run
    ///
    /// # Arguments
    ///
    /// * `options` - The run parameters; validated before anything else happens
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The completed run's summary
    /// * `Err(AuditError)` - Invalid options, a failed row fetch, or a failed report write
    pub async fn execute(&mut self, options: &RunOptions) -> Result<RunReport> {
        options.validate()?;

        let timer = RunTimer::start();
        let mut report = RunReport::new(options, chrono::Utc::now());

        tracing::info!(
            "Starting {} run for {} links ({}), bounds {}..{}",
            options.mode,
            options.scheme,
            report.course_label(),
            options.bounds.lower,
            options.bounds.upper
        );

        let rows = self
            .store
            .fetch_source_rows(options.scheme, options.course.as_deref())?;
        tracing::info!("Fetched {} candidate rows", rows.len());

        match options.mode {
            RunMode::Count => {
                report.link_count = count_links(&rows, options.scheme, options.bounds);
                tracing::info!("Counted {} links", report.link_count);
            }
            RunMode::Check => {
                let records = extract_links(&rows, options.scheme, options.bounds);
                drop(rows);
                report.link_count = records.len();
                tracing::info!("Extracted {} links", records.len());

                self.check(records, options, &mut report).await?;
            }
        }

        report.elapsed = timer.elapsed();
        tracing::info!("Run finished in {:.1}s", report.elapsed.as_secs_f64());

        Ok(report)
    }

    async fn check(
        &mut self,
        records: Vec<LinkRecord>,
        options: &RunOptions,
        report: &mut RunReport,
    ) -> Result<()> {
        let prober = BatchProber::new(&self.config.probe)?;
        let results_dir = self.results_dir();

        let probed = prober.probe_all(records).await;
        let primary = classify(probed, options.scheme.is_https(), options.check_conversion);
        record_written(report, &primary, options.scheme, &results_dir)?;

        let Some(target) = options.scheme.upgraded().filter(|_| options.check_conversion) else {
            return Ok(());
        };

        let converted = convert(&primary.convertible);
        tracing::info!("Re-checking {} good links as {}", converted.len(), target);

        let probed = prober.probe_all(converted).await;
        let upgraded = classify(probed, target.is_https(), false);
        record_written(report, &upgraded, target, &results_dir)?;

        if options.update {
            let plan = plan_rewrites(&primary.good, &upgraded.good);
            tracing::info!("Planned {} rewrites", plan.len());

            let summary = apply_rewrites(&mut self.store, &plan);
            report.updated = Some(summary.updated);
            report.failed_rewrites = Some(summary.failed);
        }

        Ok(())
    }
}

/// Writes the scheme's reports and records their line counts on the run report
fn record_written(
    report: &mut RunReport,
    classification: &Classification,
    scheme: Scheme,
    results_dir: &Path,
) -> Result<()> {
    let written = write_reports(classification, scheme, results_dir)?;
    report.set_report_count(ReportKind::new(Verdict::Good, scheme), written.good);
    report.set_report_count(ReportKind::new(Verdict::Broken, scheme), written.broken);
    Ok(())
}
