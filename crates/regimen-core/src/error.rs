use thiserror::Error;

/// Errors raised outside the pattern and schedule layers
#[derive(Error, Debug)]
pub enum CoreError {
    /// A request was well formed but asked for more than the server allows.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}
