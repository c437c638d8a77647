use std::path::Path;

use aws_config::SdkConfig;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde_json::Value;

pub mod config;
pub mod endpoint;
pub mod error;
pub mod prediction;
pub mod store;

pub use crate::config::Config;
pub use crate::endpoint::{InferenceEndpoint, SageMakerEndpoint, IMAGE_CONTENT_TYPE};
pub use crate::error::{Error, Result};
pub use crate::store::{ObjectRef, ObjectStore, S3Store};

/// Wall-clock timer for one stage of an invocation
pub struct Timer {
    name: String,
    started: DateTime<Utc>,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        info!("{}: starting", name);

        Timer {
            name: name.to_owned(),
            started: Utc::now(),
        }
    }

    /// Stop the timer, returning the elapsed milliseconds
    pub fn stop(self) -> i64 {
        let msec = (Utc::now() - self.started).num_milliseconds();
        info!("{} duration: {} msec", self.name, msec);
        msec
    }
}

/// Configuration and clients shared by every invocation of the process.
pub struct Classifier<S, E> {
    config: Config,
    store: S,
    endpoint: E,
}

impl Classifier<S3Store, SageMakerEndpoint> {
    /// Build S3 and SageMaker runtime clients from one shared AWS config.
    pub fn with_aws(config: Config, sdk_config: &SdkConfig) -> Self {
        let store = S3Store::new(aws_sdk_s3::Client::new(sdk_config));
        let endpoint = SageMakerEndpoint::new(aws_sdk_sagemakerruntime::Client::new(sdk_config));

        Classifier::new(config, store, endpoint)
    }
}

impl<S: ObjectStore, E: InferenceEndpoint> Classifier<S, E> {
    pub fn new(config: Config, store: S, endpoint: E) -> Self {
        Classifier {
            config,
            store,
            endpoint,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one invocation: fetch the configured image, send it to the
    /// endpoint and return `predictions.class` from its answer.
    pub async fn classify(&self) -> Result<Value> {
        let payload = self.fetch_payload().await?;

        let t = Timer::start(&format!("Invoking {}", self.config.endpoint_name));
        let body = self
            .endpoint
            .invoke(&self.config.endpoint_name, IMAGE_CONTENT_TYPE, payload)
            .await?;
        t.stop();

        let result = prediction::parse_response(&body)?;
        info!("{}", result);

        prediction::predicted_class(&result)
    }

    async fn fetch_payload(&self) -> Result<Vec<u8>> {
        let object = &self.config.object;
        let path: &Path = &self.config.local_path;

        let t = Timer::start(&format!(
            "Downloading s3://{}/{} to {}",
            object.bucket,
            object.key,
            path.display()
        ));
        let size = self.store.download(object, path).await?;
        t.stop();

        debug!("Downloaded {} bytes", size);

        tokio::fs::read(path).await.map_err(|e| Error::io(path, e))
    }
}
