//! Error taxonomy: startup failures are fatal and reported before the
//! server binds; inference failures fail a single request and nothing else.

use std::path::PathBuf;

/// A model artifact could not be turned into a usable regressor.
/// Always carries the path that was attempted.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("model artifact unreadable at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact malformed at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact at {path} does not match the F1..F33 schema: {detail}")]
    SchemaMismatch { path: PathBuf, detail: String },
}

impl StartupError {
    /// The artifact path the failure refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            StartupError::Read { path, .. }
            | StartupError::Parse { path, .. }
            | StartupError::SchemaMismatch { path, .. } => path,
        }
    }
}

/// A model call failed at prediction time. Terminal for that request;
/// never blended with a partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("model {model}: tree walk did not reach a leaf (corrupt node table)")]
    CorruptTree { model: String },

    #[error("model {model}: prediction is not a finite number")]
    NonFinite { model: String },
}
