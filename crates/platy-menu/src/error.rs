//! Menu Error Types
//!
//! Model failures are deliberately narrow: the generate loop swallows them
//! into attempt failures and the endpoint answers with the fallback plan,
//! so nothing here ever reaches a caller as a 5xx.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, MenuError>;

/// Menu generation errors
#[derive(Error, Debug)]
pub enum MenuError {
    /// Model API error (transport, HTTP status, or malformed envelope)
    #[error("provider error: {0}")]
    Provider(String),

    /// Model answered without any content
    #[error("model returned no content")]
    EmptyCompletion,
}
