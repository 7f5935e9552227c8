//! Errors raised while reading stored blobs or converting them to and from JSON.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend holds a value under `key` but could not hand it back.
    #[error("failed to read key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data under key `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode data for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
