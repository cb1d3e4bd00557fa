use salvo::http::StatusCode;
use thiserror::Error;

use regimen_core::error::CoreError;
use regimen_pattern::PatternError;
use regimen_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    PatternError(#[from] PatternError),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl AppError {
    /// ## Summary
    /// Maps the error onto the HTTP status reported to the client.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(ServiceError::PatternError(err)) | Self::PatternError(err) => {
                pattern_status(err)
            }
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(ServiceError::InvariantViolation(_))
            | Self::CoreError(CoreError::InvariantViolation(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CoreError(CoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
        }
    }
}

const fn pattern_status(err: &PatternError) -> StatusCode {
    match err {
        PatternError::ConfigurationError(_) | PatternError::RRuleError(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PatternError::ValidationError(_) => StatusCode::BAD_REQUEST,
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::from(PatternError::ConfigurationError("x".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(ServiceError::PatternError(PatternError::ValidationError(
                    "x".into(),
                ))),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(ServiceError::NotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(CoreError::InvalidInput("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(CoreError::InvariantViolation("x")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
        }
    }
}
