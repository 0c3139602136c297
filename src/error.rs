//! Error types for schema resolution and payload validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Direction;

/// Errors during schema resolution or configuration loading.
#[derive(Debug, Error)]
pub enum ResolveError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    // Configuration errors (exit code 2)
    #[error("unknown attribute \"{attribute}\": not part of the serializer_class grammar")]
    UnknownAttribute { attribute: String },

    #[error("invalid value for \"{attribute}\": expected schema object or source string, got {actual}")]
    InvalidAttributeValue {
        attribute: String,
        actual: &'static str,
    },

    #[error("configuration must be a JSON object, got {actual}")]
    InvalidConfig { actual: &'static str },

    #[cfg(not(feature = "remote"))]
    #[error("cannot fetch {url}: built without the \"remote\" feature")]
    RemoteDisabled { url: String },

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    /// No schema configured at any precedence level for an action/direction
    /// pair. Always a setup defect on the controller, never a request error.
    #[error(
        "no schema configured for action \"{action}\" ({direction}): define one of {}",
        tried.join(", ")
    )]
    Misconfigured {
        action: String,
        direction: Direction,
        /// The four attribute names that were tried, in precedence order.
        tried: Vec<String>,
    },
}

impl ResolveError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::FileNotFound { .. } | ResolveError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            ResolveError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors during payload validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Resolve(e) => e.exit_code(),
            ValidateError::Invalid { .. } => 1,
        }
    }
}

/// Single validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the invalid field.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
