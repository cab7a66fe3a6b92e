use super::ReportStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::primitives::ByteStream;
use tracing::debug;

pub struct S3ReportStore {
    client: s3::Client,
}

impl S3ReportStore {
    pub fn new(client: s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportStore for S3ReportStore {
    /// Upload the whole report in one `PutObject`.
    ///
    /// `If-None-Match: *` makes S3 reject the write if the key already exists.
    async fn put_report(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("text/csv")
            .if_none_match("*")
            .body(ByteStream::from(body))
            .send()
            .await
            .with_context(|| format!("Failed to upload report to s3://{}/{}", bucket, key))?;

        debug!("Uploaded {} bytes to s3://{}/{}", size, bucket, key);
        Ok(())
    }
}
