//! Cookie Catalogue
//!
//! Names and lifetimes of every cookie the funnel sets. All durations are
//! seconds except [`ACTIVATION_TTL_MS`], which matches the millisecond
//! `exp` claim inside activation tokens.

/// Signed lifetime-access token
pub const ACCESS_COOKIE: &str = "platy_access";

/// Signed admin-session token
pub const ADMIN_COOKIE: &str = "platy_admin";

/// Plain integer free-trial counter
pub const TRIALS_COOKIE: &str = "platy_trials";

/// Access cookie lifetime: ~10 years
pub const ACCESS_MAX_AGE: i64 = 60 * 60 * 24 * 365 * 10;

/// Admin cookie lifetime: 48 hours
pub const ADMIN_MAX_AGE: i64 = 60 * 60 * 24 * 2;

/// Trials cookie lifetime: 1 year
pub const TRIALS_MAX_AGE: i64 = 60 * 60 * 24 * 365;

/// Activation token validity: 48 hours, in milliseconds
pub const ACTIVATION_TTL_MS: i64 = 1000 * 60 * 60 * 24 * 2;

/// Free menu generations per browser before the paywall
pub const FREE_TRIALS: u32 = 3;
