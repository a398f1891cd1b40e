use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HerdError>;

/// Errors raised anywhere in the extraction → aggregation pipeline.
#[derive(Debug, Error)]
pub enum HerdError {
    #[error("record '{record}' has no reference entity")]
    MissingReference { record: String },

    #[error("record '{record}' has {count} reference entities, expected exactly one")]
    MultipleReference { record: String, count: usize },

    #[error("record name '{record}' cannot be stored: {reason}")]
    InvalidRecordName { record: String, reason: &'static str },

    #[error("malformed point encoding '{text}': {reason}")]
    MalformedEncoding { text: String, reason: &'static str },

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HerdError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HerdError::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        HerdError::Json { path: path.into(), source }
    }

    /// True for the per-record errors that a batch run may skip.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            HerdError::MissingReference { .. }
                | HerdError::MultipleReference { .. }
                | HerdError::InvalidRecordName { .. }
        )
    }
}
