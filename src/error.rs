//! Crate-level error type.
//!
//! Scheduling itself never fails: unplaceable subjects are reported inside
//! each [`ScheduleResult`](crate::models::ScheduleResult). Errors only arise
//! from contract violations in the input or from configuration.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Error returned by the scheduling entry points.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message() {
        let err = ScheduleError::from(vec![
            ValidationError::new(ValidationErrorKind::DuplicateName, "Duplicate subject: MATES"),
            ValidationError::new(ValidationErrorKind::EmptyName, "Subject #3 has no name"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate subject: MATES; Subject #3 has no name"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = ScheduleError::from(ConfigError::Invalid("bad".into()));
        assert_eq!(err.to_string(), "Invalid configuration: bad");
    }
}
