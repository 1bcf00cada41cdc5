//! Kinesis Data Firehose delivery sink.

use super::{Sink, SinkError};
use aws_sdk_firehose::Client;
use aws_sdk_firehose::primitives::Blob;
use aws_sdk_firehose::types::Record;
use bytes::Bytes;
use tracing::info;

pub struct FirehoseSink {
    client: Client,
    delivery_stream_name: String,
}

impl FirehoseSink {
    pub fn new(client: Client, delivery_stream_name: impl Into<String>) -> Self {
        Self {
            client,
            delivery_stream_name: delivery_stream_name.into(),
        }
    }
}

impl Sink for FirehoseSink {
    async fn deliver(&self, batch: Vec<Bytes>) -> Result<usize, SinkError> {
        let size = batch.len();
        let records = batch
            .into_iter()
            .map(|data| {
                Record::builder()
                    .data(Blob::new(data.to_vec()))
                    .build()
                    .map_err(|e| SinkError::InvalidRecord(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .client
            .put_record_batch()
            .delivery_stream_name(&self.delivery_stream_name)
            .set_records(Some(records))
            .send()
            .await
            .map_err(|e| SinkError::Delivery(e.to_string()))?;

        let failed = output.failed_put_count().max(0) as usize;
        info!(
            stream = %self.delivery_stream_name,
            sent = size,
            failed,
            "put record batch"
        );
        Ok(failed)
    }
}
