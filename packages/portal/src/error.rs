//! Portal error type.

use store::StoreError;
use thiserror::Error;

/// Failures surfaced to callers. Unauthorized mutations are not errors; they
/// are ignored and reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid seed catalog: {0}")]
    Seed(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl PortalError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        PortalError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
