//! S3 object retrieval.

use super::{ObjectBody, ObjectSource, SourceError};
use aws_sdk_s3::Client;
use tracing::info;

pub struct S3ObjectSource {
    client: Client,
}

impl S3ObjectSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ObjectSource for S3ObjectSource {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<ObjectBody, SourceError> {
        info!(bucket, key, "fetching object");
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| SourceError::Fetch(e.to_string()))?;

        Ok(Box::new(output.body.into_async_read()))
    }
}
