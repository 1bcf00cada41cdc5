//! In-memory fakes for the object source and delivery sink, plus gzip
//! fixture helpers.

// Not every test binary uses every fake.
#![allow(dead_code)]

use alb_log_forwarder::sender::{Sink, SinkError};
use alb_log_forwarder::source::{ObjectBody, ObjectSource, SourceError};
use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

/// Serves gzipped payloads from a (bucket, key) map.
#[derive(Default)]
pub struct MemorySource {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MemorySource {
    pub fn with_object(mut self, bucket: &str, key: &str, body: Vec<u8>) -> Self {
        self.objects
            .insert((bucket.to_string(), key.to_string()), body);
        self
    }
}

impl ObjectSource for MemorySource {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<ObjectBody, SourceError> {
        match self.objects.get(&(bucket.to_string(), key.to_string())) {
            Some(body) => Ok(Box::new(std::io::Cursor::new(body.clone()))),
            None => Err(SourceError::Fetch(format!("no such object {bucket}/{key}"))),
        }
    }
}

/// Records every delivered batch; can report per-batch failures or fail the
/// delivery call outright.
#[derive(Default)]
pub struct MemorySink {
    pub batches: Mutex<Vec<Vec<Bytes>>>,
    pub failed_per_batch: usize,
    pub fail_delivery: bool,
}

impl MemorySink {
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }

    pub fn all_records(&self) -> Vec<Bytes> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }
}

impl Sink for &MemorySink {
    async fn deliver(&self, batch: Vec<Bytes>) -> Result<usize, SinkError> {
        if self.fail_delivery {
            return Err(SinkError::Delivery("transport down".to_string()));
        }
        let failed = self.failed_per_batch.min(batch.len());
        self.batches.lock().unwrap().push(batch);
        Ok(failed)
    }
}

pub fn gz(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

pub const SAMPLE_LINE: &str = r#"http 2018-09-18T21:38:37.519183Z app/test1/7f050ffab5373730 95.90.211.80:4254 172.31.7.183:80 0.001 0.000 0.000 200 200 461 654 "GET http://test1.example.com:80/ HTTP/1.1" "Mozilla/5.0" - - arn:aws:elasticloadbalancing:eu-west-1:123:targetgroup/tg/76784 "Root=1-5ba1705d-abc" "-" "-" 0 2018-09-18T21:38:37.518000Z "forward" "-""#;
