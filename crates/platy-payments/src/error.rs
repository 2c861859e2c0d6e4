//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Gateway request failed or returned an unusable response
    #[error("gateway error: {0}")]
    Gateway(String),

    /// Required request parameter is missing
    #[error("missing parameter: {0}")]
    MissingParam(&'static str),

    /// Token minting failed
    #[error("token error: {0}")]
    Token(#[from] platy_auth::AuthError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Gateway(_) => "Payment verification failed. Please try again.",
            PaymentError::MissingParam(_) => "The request is missing required data.",
            PaymentError::Token(_) | PaymentError::Config(_) => "Service configuration error.",
        }
    }
}
