//! # platy-payments
//!
//! Wompi payment-gateway integration for Platy.
//!
//! ## Flow
//!
//! The checkout itself is Wompi-hosted: the site redirects the buyer to a
//! preconfigured payment link and never touches card data.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────┐
//! │  Your Site  │────▶│  Wompi Hosted   │────▶│  /thanks?id= │
//! │  (/checkout)│     │  Payment Link   │     │  (verify)    │
//! └─────────────┘     └─────────────────┘     └──────┬───────┘
//!                                                    │ GET /v1/transactions/{id}
//!                                                    ▼
//!                                            APPROVED ⇒ lifetime
//!                                            access cookie
//! ```
//!
//! Confirmation is never taken from the browser or the webhook payload
//! alone: both paths re-query the transaction's current status from the
//! gateway before granting anything.

pub mod error;
pub mod grant;
pub mod webhook;
pub mod wompi;

pub use error::{PaymentError, Result};
pub use grant::{GrantOutcome, activation_link, verify_and_grant};
pub use webhook::{EventNotice, verify_signature};
pub use wompi::{Transaction, TransactionStatus, WompiClient};
