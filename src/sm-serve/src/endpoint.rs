use async_trait::async_trait;
use aws_sdk_sagemakerruntime::primitives::Blob;
use aws_sdk_sagemakerruntime::Client;
use log::debug;

use crate::error::{Error, Result};

/// Declared content type of every inference request, whatever the file holds.
pub const IMAGE_CONTENT_TYPE: &str = "application/x-image";

#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    /// Send `body` to `endpoint_name` and return the raw response body.
    async fn invoke(&self, endpoint_name: &str, content_type: &str, body: Vec<u8>)
        -> Result<Vec<u8>>;
}

/// SageMaker runtime `InvokeEndpoint`
pub struct SageMakerEndpoint {
    client: Client,
}

impl SageMakerEndpoint {
    pub fn new(client: Client) -> Self {
        SageMakerEndpoint { client }
    }
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    async fn invoke(
        &self,
        endpoint_name: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        debug!(
            "InvokeEndpoint {} ({} bytes, {})",
            endpoint_name,
            body.len(),
            content_type
        );

        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(endpoint_name)
            .content_type(content_type)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| Error::Invoke {
                endpoint: endpoint_name.to_owned(),
                source: e.into(),
            })?;

        // absent body decodes as empty and fails JSON parsing downstream
        let body: Option<Blob> = output.body.into();

        Ok(body.map(Blob::into_inner).unwrap_or_default())
    }
}
