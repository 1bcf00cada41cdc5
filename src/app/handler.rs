//! Per-invocation pipeline: for each event record, fetch the object, gunzip,
//! parse every line, and dispatch the batches.

use crate::parser;
use crate::sender::{BatchDispatcher, Sink};
use crate::source::{ObjectSource, gunzip};
use aws_lambda_events::event::s3::S3Event;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("event payload carries no records")]
    EmptyEvent,
}

/// What one invocation did, across all of its event records.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct InvocationSummary {
    pub objects_processed: usize,
    pub objects_skipped: usize,
    /// Objects whose stream was cut short mid-read; their records parsed
    /// before the cut were still dispatched.
    pub objects_truncated: usize,
    pub lines_parsed: usize,
    pub lines_dropped: usize,
    pub records_delivered: usize,
    pub records_failed: usize,
    pub records_dropped: usize,
}

/// Processes every object named by `event`, strictly in order.
///
/// Object-level failures (missing bucket/key, unreachable object) skip that
/// object and continue; nothing below the event payload itself aborts the
/// invocation.
pub async fn handle_event<O, S>(
    event: S3Event,
    source: &O,
    dispatcher: &BatchDispatcher<S>,
) -> Result<InvocationSummary, HandlerError>
where
    O: ObjectSource,
    S: Sink,
{
    if event.records.is_empty() {
        return Err(HandlerError::EmptyEvent);
    }

    let mut summary = InvocationSummary::default();

    for record in event.records {
        let (Some(bucket), Some(key)) = (record.s3.bucket.name, record.s3.object.key) else {
            warn!("event record without bucket or key, skipping");
            summary.objects_skipped += 1;
            continue;
        };

        let body = match source.fetch(&bucket, &key).await {
            Ok(body) => body,
            Err(e) => {
                error!(bucket, key, error = %e, "object fetch failed, skipping");
                summary.objects_skipped += 1;
                continue;
            }
        };

        let parsed = parser::parse_all(gunzip(body)).await;
        info!(
            bucket,
            key,
            parsed = parsed.records.len(),
            dropped = parsed.dropped,
            truncated = parsed.truncated,
            "object parsed"
        );

        let dispatched = dispatcher.send_all(&parsed.records).await;

        summary.objects_processed += 1;
        if parsed.truncated {
            summary.objects_truncated += 1;
        }
        summary.lines_parsed += parsed.records.len();
        summary.lines_dropped += parsed.dropped;
        summary.records_delivered += dispatched.delivered;
        summary.records_failed += dispatched.failed;
        summary.records_dropped += dispatched.dropped;
    }

    Ok(summary)
}
