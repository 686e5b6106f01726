//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::{CallError, InfraError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Client(_) => exitcode::SOFTWARE,
                InfraError::Application(e) => application_exit_code(e),
            },
        }
    }
}

fn application_exit_code(e: &ApplicationError) -> i32 {
    match e {
        ApplicationError::Domain(DomainError::BlobInput { .. }) => exitcode::NOINPUT,
        ApplicationError::Domain(_) => exitcode::USAGE,
        ApplicationError::Config { .. } => exitcode::CONFIG,
        ApplicationError::Prompt(_) => exitcode::IOERR,
        ApplicationError::Call(call) => match call {
            CallError::Service { .. } => exitcode::FAILURE,
            CallError::NameResolution { .. } | CallError::Http { .. } => exitcode::UNAVAILABLE,
            CallError::Credentials(_) => exitcode::NOPERM,
            CallError::MissingRegion | CallError::Endpoint { .. } => exitcode::CONFIG,
            CallError::Decode(_) => exitcode::DATAERR,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn call(e: CallError) -> CliError {
        ApplicationError::Call(e).into()
    }

    #[rstest]
    #[case(
        call(CallError::Service {
            code: "NotFoundException".into(),
            message: "gone".into(),
            status: 400,
            request_id: None,
        }),
        exitcode::FAILURE
    )]
    #[case(
        call(CallError::NameResolution { endpoint: "kms.x.amazonaws.com".into(), region: "x".into() }),
        exitcode::UNAVAILABLE
    )]
    #[case(call(CallError::Credentials("none".into())), exitcode::NOPERM)]
    #[case(call(CallError::MissingRegion), exitcode::CONFIG)]
    #[case(call(CallError::Decode("eof".into())), exitcode::DATAERR)]
    #[case(
        ApplicationError::Domain(DomainError::InvalidSelect("^".into())).into(),
        exitcode::USAGE
    )]
    #[case(CliError::Usage("no command".into()), exitcode::USAGE)]
    fn exit_codes_follow_error_class(#[case] err: CliError, #[case] expected: i32) {
        assert_eq!(err.exit_code(), expected);
    }
}
