pub mod dispatcher;
pub mod firehose;

pub use dispatcher::{BatchDispatcher, DispatchSummary, MAX_BATCH_SIZE};
pub use firehose::FirehoseSink;

use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("delivery failed: {0}")]
    Delivery(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Downstream destination for batches of serialized records.
///
/// Implementations report how many records of the batch failed to persist;
/// delivery guarantees beyond that single attempt are out of scope. Injected
/// into the pipeline so tests can substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait Sink {
    /// Delivers one batch, returning the number of records that failed.
    async fn deliver(&self, batch: Vec<Bytes>) -> Result<usize, SinkError>;
}
