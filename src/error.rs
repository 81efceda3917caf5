//! Error types for tiptree operations.

use thiserror::Error;

use crate::model::NodeKind;

/// Errors that can occur while converting or querying editor documents.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A single element lacked a sub-element or attribute its kind requires.
    ///
    /// Recovered locally: the builder records it in [`crate::Conversion::issues`]
    /// and keeps going.
    #[error("Malformed {kind} element: {reason}")]
    MalformedStructure { kind: NodeKind, reason: String },

    #[error("Nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Invalid node: {0}")]
    InvalidNode(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Whole-document failure, naming the input it happened on.
    #[error("Conversion of {input} failed: {source}")]
    ConversionFailed {
        input: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an error as the unrecoverable failure of converting `input`.
    pub fn conversion_failed(input: impl Into<String>, source: Error) -> Self {
        Error::ConversionFailed {
            input: input.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
