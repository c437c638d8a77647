use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),

    #[error("could not download s3://{bucket}/{key}: {source}")]
    Download {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invocation of endpoint {endpoint} failed: {source}")]
    Invoke {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("endpoint response is not valid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Expected nesting absent from the endpoint response
    #[error("endpoint response has no `{0}` field")]
    MissingField(&'static str),
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
