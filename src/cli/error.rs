//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(DomainError::NegativeDepth(_)) => crate::exitcode::USAGE,
                ApplicationError::Domain(DomainError::PersonNotFound(_)) => crate::exitcode::NOINPUT,
                ApplicationError::Domain(DomainError::AncestryCycle(_)) => crate::exitcode::DATAERR,
                ApplicationError::Domain(DomainError::InvalidMetrics { .. }) => {
                    crate::exitcode::CONFIG
                }
                ApplicationError::Domain(_) => crate::exitcode::SOFTWARE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::FamilyFile { .. } => crate::exitcode::DATAERR,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonId;

    #[test]
    fn given_domain_errors_then_exit_codes_match_category() {
        assert_eq!(
            CliError::from(DomainError::NegativeDepth(-1)).exit_code(),
            crate::exitcode::USAGE
        );
        assert_eq!(
            CliError::from(DomainError::PersonNotFound(PersonId(7))).exit_code(),
            crate::exitcode::NOINPUT
        );
        assert_eq!(
            CliError::InvalidArgs("x".into()).exit_code(),
            crate::exitcode::USAGE
        );
    }
}
