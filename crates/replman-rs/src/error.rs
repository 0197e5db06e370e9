//! Error type for the replication-manager API client.

use thiserror::Error;

/// Errors produced by the replication-manager client
#[derive(Debug, Error)]
pub enum ReplmanError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The payload did not match the expected schema for this resource
    #[error("failed to decode {resource} payload: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A cluster-scoped request was made with no cluster selected
    #[error("no cluster selected")]
    NoClusterSelected,

    /// Config file not found at the expected path
    #[error("config not found: {0}")]
    ConfigNotFound(String),

    /// Config file exists but is not usable
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// Home directory could not be resolved
    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
