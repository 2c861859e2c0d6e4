//! Error Types

use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// Plan does not have exactly seven days
    #[error("plan must have exactly 7 days, got {0}")]
    WrongDayCount(usize),

    /// Day number outside 1..=7
    #[error("day number {0} is out of range 1..=7")]
    DayOutOfRange(u8),

    /// A day has no ingredients
    #[error("day {0} has no ingredients")]
    EmptyIngredients(u8),

    /// A day has no preparation steps
    #[error("day {0} has no steps")]
    EmptySteps(u8),

    /// An ingredient is missing its name
    #[error("day {0} has an unnamed ingredient")]
    UnnamedIngredient(u8),

    /// An ingredient quantity is zero or negative
    #[error("day {0}: non-positive quantity for '{1}'")]
    NonPositiveQty(u8, String),

    /// Embedded pricebook failed to parse
    #[error("pricebook parse error: {0}")]
    Pricebook(#[from] serde_json::Error),
}
