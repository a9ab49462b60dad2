//! Object-specific error types
//!
//! Provides domain-specific errors for map object construction with
//! clear error messages and context.

use thiserror::Error;

pub type ObjectResult<T> = Result<T, ObjectError>;

#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("Key {0:?} may not begin with the reserved internal prefix")]
    ReservedPrefix(String),

    #[error("Key '{0}' conflicts with reserved word")]
    ReservedWord(String),

    #[error("Keys '{first}' and '{second}' both rewrite to '{sanitized}'")]
    AmbiguousKey {
        sanitized: String,
        first: String,
        second: String,
    },

    #[error("Nesting depth {depth} exceeds the configured limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
