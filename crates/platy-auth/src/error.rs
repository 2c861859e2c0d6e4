//! Auth Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AuthError>;

/// Token issuance errors. Verification never errors; it returns `None`.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Claims failed to serialize
    #[error("claims serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
