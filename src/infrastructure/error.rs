//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Failure of a single service call.
#[derive(Error, Debug)]
pub enum CallError {
    /// The service answered with an error document.
    #[error("{code}: {message}")]
    Service {
        code: String,
        message: String,
        status: u16,
        request_id: Option<String>,
    },

    #[error(
        "could not resolve endpoint {endpoint}: the service may not be available in region \
         '{region}', or there is no network connectivity"
    )]
    NameResolution { endpoint: String, region: String },

    #[error("request to {endpoint} failed")]
    Http {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no AWS credentials: {0}")]
    Credentials(String),

    #[error("no AWS region: pass --region, set AWS_REGION or configure one for the profile")]
    MissingRegion,

    #[error("invalid endpoint '{endpoint}': {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl CallError {
    pub fn http(
        endpoint: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Http {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }
}

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
