//! Error types
//!
//! None of these escape the public entry points; each has a documented local
//! fallback. They surface only through the lower-level building blocks and
//! configuration loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudyError>;

#[derive(Debug, Error)]
pub enum StudyError {
    /// No usable sentence survived cleanup and splitting
    #[error("no usable sentences in input")]
    EmptyInput,

    /// Term weights cannot be computed (empty vocabulary after stop-word filtering)
    #[error("term-weight matrix is degenerate: no distinguishing terms")]
    DegenerateVectors,

    /// A quiz candidate failed option-count or answer-presence checks
    #[error("malformed quiz candidate: {reason}")]
    MalformedCandidate { reason: String },

    /// A configuration value violates a validation rule
    #[error("invalid configuration at {path}: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl StudyError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        StudyError::MalformedCandidate {
            reason: reason.into(),
        }
    }
}
