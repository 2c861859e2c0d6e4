//! # platy-auth
//!
//! Signed-capability tokens for the Platy funnel. There is no server-side
//! session store: the cookie *is* the session.
//!
//! A token is two dot-joined base64url segments:
//!
//! ```text
//! base64url(JSON(claims)) . base64url(HMAC-SHA256(secret, data-segment))
//! ```
//!
//! Tokens issued by one process are verified by another (the access
//! middleware vs. the API handlers), so this wire shape is a contract.
//! Verification recomputes the MAC over the data segment and only then
//! parses the claims; any malformed or tampered token verifies to `None`,
//! never an error.

pub mod claims;
pub mod cookies;
pub mod error;
pub mod token;

pub use claims::{Claims, PlanKind, Role};
pub use error::{AuthError, Result};
pub use token::TokenSigner;
