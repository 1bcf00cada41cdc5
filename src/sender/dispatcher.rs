//! Batch accumulation and dispatch.

use super::Sink;
use crate::parser::AlbLogRecord;
use bytes::Bytes;
use tracing::{error, info, warn};

/// Hard cap on records per delivery call (the Firehose `PutRecordBatch`
/// limit).
pub const MAX_BATCH_SIZE: usize = 500;

/// Outcome of one `send_all` pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Records the sink accepted: handed over in a delivery call that
    /// returned, minus the failures that call reported. `delivered + failed
    /// + dropped` equals the input count.
    pub delivered: usize,
    /// Records the sink reported failed, plus every record of a batch whose
    /// delivery call errored outright.
    pub failed: usize,
    /// Records dropped before batching because they failed to serialize.
    pub dropped: usize,
    /// Delivery calls made.
    pub batches: usize,
}

/// Accumulates serialized records and flushes full batches to the sink.
///
/// The in-progress batch is owned exclusively by one `send_all` pass and
/// batches go out in input order. Delivery failures are counted and logged,
/// never retried, and never abort the pass.
pub struct BatchDispatcher<S: Sink> {
    sink: S,
    batch_size: usize,
}

impl<S: Sink> BatchDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self::with_batch_size(sink, MAX_BATCH_SIZE)
    }

    /// `batch_size` is clamped to the sink's hard cap.
    pub fn with_batch_size(sink: S, batch_size: usize) -> Self {
        Self {
            sink,
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
        }
    }

    /// Serializes `records`, dispatching every full batch and the trailing
    /// partial batch. All but the last batch hold exactly `batch_size`
    /// records.
    pub async fn send_all(&self, records: &[AlbLogRecord]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        let mut batch: Vec<Bytes> = Vec::with_capacity(self.batch_size.min(records.len()));

        for record in records {
            match serde_json::to_vec(record) {
                Ok(data) => batch.push(Bytes::from(data)),
                Err(e) => {
                    warn!(error = %e, "dropping record that failed to serialize");
                    summary.dropped += 1;
                    continue;
                }
            }

            if batch.len() >= self.batch_size {
                self.flush(std::mem::take(&mut batch), &mut summary).await;
            }
        }

        if !batch.is_empty() {
            self.flush(batch, &mut summary).await;
        }

        summary
    }

    async fn flush(&self, batch: Vec<Bytes>, summary: &mut DispatchSummary) {
        let size = batch.len();
        summary.batches += 1;

        match self.sink.deliver(batch).await {
            Ok(failed) => {
                let failed = failed.min(size);
                summary.delivered += size - failed;
                summary.failed += failed;
                if failed > 0 {
                    warn!(size, failed, "sink reported failed records in batch");
                } else {
                    info!(size, "batch delivered");
                }
            }
            Err(e) => {
                // The whole batch is considered lost for this invocation.
                summary.failed += size;
                error!(size, error = %e, "batch delivery failed");
            }
        }
    }
}
