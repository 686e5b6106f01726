//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent invalid input to an operation.
/// They are raised before anything is sent to a service.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid value for {param}: {reason}")]
    InvalidValue { param: String, reason: String },

    #[error("parameter {param} is not defined for {command}")]
    UnknownParameter { command: String, param: String },

    #[error("invalid select expression '{0}'")]
    InvalidSelect(String),

    #[error("cannot read blob input {path}: {reason}")]
    BlobInput { path: PathBuf, reason: String },
}

impl DomainError {
    pub fn invalid_value(param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
