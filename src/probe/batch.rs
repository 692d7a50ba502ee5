//! Batched concurrent probing
//!
//! Records are split into fixed-size batches. Every record of a batch is
//! probed at once on its own task; the batch is fully drained before the next
//! one starts, so the batch size is the bound on in-flight requests.

use crate::config::ProbeConfig;
use crate::link::{LinkRecord, ProbeOutcome};
use crate::probe::client::{build_probe_client, probe_url};
use reqwest::Client;
use std::ops::Range;
use std::time::Instant;
use tokio::task::JoinSet;

/// Splits `len` items into consecutive ranges of at most `batch_size`
///
/// A `batch_size` of zero is treated as one.
pub fn partition_batches(len: usize, batch_size: usize) -> Vec<Range<usize>> {
    let size = batch_size.max(1);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Probes link records in sequential, internally concurrent batches
#[derive(Debug, Clone)]
pub struct BatchProber {
    client: Client,
    batch_size: usize,
}

impl BatchProber {
    /// Creates a prober with a client built from the probe configuration
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_probe_client(config)?, config.batch_size))
    }

    /// Creates a prober around an existing client
    pub fn with_client(client: Client, batch_size: usize) -> Self {
        Self {
            client,
            batch_size: batch_size.max(1),
        }
    }

    /// Probes every record and returns them annotated, in input order
    ///
    /// Records that already carry an outcome are left untouched. No record
    /// causes this to fail; transport errors are stored on the record.
    pub async fn probe_all(&self, mut records: Vec<LinkRecord>) -> Vec<LinkRecord> {
        let batches = partition_batches(records.len(), self.batch_size);
        let total = batches.len();

        for (number, range) in batches.into_iter().enumerate() {
            let size = range.len();
            tracing::info!("Probing batch {}/{} ({} links)", number + 1, total, size);

            let started = Instant::now();
            self.probe_batch(&mut records[range]).await;

            tracing::info!(
                "Batch {}/{} drained in {:.1}s",
                number + 1,
                total,
                started.elapsed().as_secs_f64()
            );
        }

        records
    }

    /// Probes one batch concurrently and waits for every request to finish
    async fn probe_batch(&self, batch: &mut [LinkRecord]) {
        let mut tasks = JoinSet::new();

        for (position, record) in batch.iter().enumerate() {
            if record.is_probed() {
                continue;
            }
            let client = self.client.clone();
            let url = record.url.clone();
            tasks.spawn(async move { (position, probe_url(&client, &url).await) });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, outcome)) => {
                    let record = &mut batch[position];
                    tracing::debug!(
                        "{} -> {} {}",
                        record.url,
                        outcome.status_code,
                        outcome.transport_error
                    );
                    record.set_outcome(outcome);
                }
                Err(e) => tracing::error!("Probe task failed: {}", e),
            }
        }

        // A task that panicked never reported back; its record still counts as probed.
        for record in batch.iter_mut().filter(|r| !r.is_probed()) {
            record.set_outcome(ProbeOutcome::transport_failure("probe task aborted"));
        }
    }
}
