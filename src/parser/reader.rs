//! Line-stream parsing over a decompressed object body.

use super::record::AlbLogRecord;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Result of parsing one object's worth of lines.
#[derive(Debug, Default)]
pub struct ParseSummary {
    /// Parsed records, in input order, at most one per line.
    pub records: Vec<AlbLogRecord>,
    /// Lines dropped because they did not carry the full schema.
    pub dropped: usize,
    /// Set when a mid-stream read error cut the object short. Records parsed
    /// before the error are still returned.
    pub truncated: bool,
}

/// Parses every line of `reader`, converting per-line failures into a drop
/// plus a diagnostic. Never fails: a corrupt stream yields the records parsed
/// so far with `truncated` set, and an empty stream yields an empty summary.
pub async fn parse_all<R: AsyncBufRead + Unpin>(reader: R) -> ParseSummary {
    let mut summary = ParseSummary::default();
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match AlbLogRecord::parse(&line) {
                Ok(record) => summary.records.push(record),
                Err(e) => {
                    warn!(error = %e, "dropping unparseable line");
                    summary.dropped += 1;
                }
            },
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "read error mid-stream, abandoning rest of object");
                summary.truncated = true;
                break;
            }
        }
    }

    summary
}
