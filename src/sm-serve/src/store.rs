use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};

/// Location of an object in a bucket
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: &str, key: &str) -> Self {
        ObjectRef {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        }
    }

    pub(crate) fn download_error<E>(&self, source: E) -> Error
    where
        E: Into<crate::error::BoxError>,
    {
        Error::Download {
            bucket: self.bucket.clone(),
            key: self.key.clone(),
            source: source.into(),
        }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch `object` and write it to `dest`, replacing whatever was there.
    ///
    /// Returns the number of bytes written.
    async fn download(&self, object: &ObjectRef, dest: &Path) -> Result<u64>;
}

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        S3Store { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn download(&self, object: &ObjectRef, dest: &Path) -> Result<u64> {
        debug!("GetObject s3://{}/{}", object.bucket, object.key);

        let output = self
            .client
            .get_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
            .map_err(|e| object.download_error(e))?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| object.download_error(e))?
            .into_bytes();

        tokio::fs::write(dest, &data)
            .await
            .map_err(|e| Error::io(dest, e))?;

        Ok(data.len() as u64)
    }
}
