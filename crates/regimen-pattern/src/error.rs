use thiserror::Error;

/// Pattern definition and expansion errors
#[derive(Error, Debug)]
pub enum PatternError {
    /// The pattern lacks a field its `pattern_type` requires.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("RRule error: {0}")]
    RRuleError(String),
}

pub type PatternResult<T> = std::result::Result<T, PatternError>;
