pub mod s3;

pub use s3::S3ObjectSource;

use async_compression::tokio::bufread::GzipDecoder;
use thiserror::Error;
use tokio::io::{AsyncRead, BufReader};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("object fetch failed: {0}")]
    Fetch(String),
}

/// A readable body of one compressed log object.
pub type ObjectBody = Box<dyn AsyncRead + Send + Unpin>;

/// Storage holding the compressed access-log objects.
///
/// Injected into the pipeline so tests can substitute an in-memory fake. A
/// fetch failure skips that object; there is no retry.
#[allow(async_fn_in_trait)]
pub trait ObjectSource {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<ObjectBody, SourceError>;
}

/// Wraps a fetched body in a gzip decompression filter. Corrupt input
/// surfaces as a read error on the returned stream, not here.
pub fn gunzip(body: ObjectBody) -> BufReader<GzipDecoder<BufReader<ObjectBody>>> {
    BufReader::new(GzipDecoder::new(BufReader::new(body)))
}
