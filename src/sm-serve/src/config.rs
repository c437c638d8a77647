use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::ObjectRef;

pub const ENDPOINT_NAME_VAR: &str = "ENDPOINT_NAME";
pub const SOURCE_BUCKET_VAR: &str = "SOURCE_BUCKET";
pub const SOURCE_KEY_VAR: &str = "SOURCE_KEY";
pub const LOCAL_PATH_VAR: &str = "LOCAL_PATH";

pub const DEFAULT_BUCKET: &str = "sagemaker-us-west-2-601091450883";
pub const DEFAULT_KEY: &str = "data/paper.jpg";
pub const DEFAULT_LOCAL_PATH: &str = "/tmp/paper.jpg";

/// Process-wide settings, read once before the first invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Config {
    /// Name of the hosted inference endpoint
    pub endpoint_name: String,

    /// Image to classify on every invocation
    pub object: ObjectRef,

    /// Where the image is written before being read back
    pub local_path: PathBuf,
}

impl Config {
    pub fn new(endpoint_name: &str) -> Self {
        Config {
            endpoint_name: endpoint_name.to_owned(),
            object: ObjectRef::new(DEFAULT_BUCKET, DEFAULT_KEY),
            local_path: PathBuf::from(DEFAULT_LOCAL_PATH),
        }
    }

    pub fn with_object(mut self, bucket: &str, key: &str) -> Self {
        self.object = ObjectRef::new(bucket, key);
        self
    }

    pub fn with_local_path(mut self, path: &Path) -> Self {
        self.local_path = path.to_path_buf();
        self
    }

    /// Build the configuration from the process environment.
    ///
    /// Fails if `ENDPOINT_NAME` is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let endpoint_name = var(ENDPOINT_NAME_VAR).ok_or(Error::MissingConfig(ENDPOINT_NAME_VAR))?;

        let mut config = Config::new(&endpoint_name);

        let bucket = var(SOURCE_BUCKET_VAR).unwrap_or_else(|| DEFAULT_BUCKET.to_owned());
        let key = var(SOURCE_KEY_VAR).unwrap_or_else(|| DEFAULT_KEY.to_owned());
        config = config.with_object(&bucket, &key);

        if let Some(path) = var(LOCAL_PATH_VAR) {
            config = config.with_local_path(Path::new(&path));
        }

        Ok(config)
    }
}
