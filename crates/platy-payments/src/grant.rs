//! Access Grants
//!
//! Turns a confirmed payment (or a manual admin decision) into a signed
//! lifetime-access token. The token is the entitlement; nothing is stored.

use platy_auth::{Claims, TokenSigner};

use crate::error::Result;
use crate::wompi::{TransactionStatus, WompiClient};

/// Outcome of checking a transaction for access
#[derive(Clone, Debug)]
pub enum GrantOutcome {
    /// Payment confirmed: the signed access token to set as a cookie
    Granted { token: String },

    /// Gateway reports a non-approved status
    NotApproved { status: TransactionStatus },
}

/// Re-query a transaction and, if the gateway says it is approved, mint a
/// lifetime access token for the buyer.
pub async fn verify_and_grant(
    wompi: &WompiClient,
    signer: &TokenSigner,
    transaction_id: &str,
    email: &str,
    now_ms: i64,
) -> Result<GrantOutcome> {
    let status = wompi.transaction_status(transaction_id).await?;

    if status.is_approved() {
        let token = signer.sign(&Claims::lifetime(email, now_ms))?;
        tracing::info!(transaction_id, "payment approved, lifetime access granted");
        Ok(GrantOutcome::Granted { token })
    } else {
        tracing::info!(transaction_id, %status, "payment not approved");
        Ok(GrantOutcome::NotApproved { status })
    }
}

/// Mint a 48-hour activation link for a manual grant.
///
/// The link embeds an activation token; visiting it exchanges the token for
/// the long-lived access cookie.
pub fn activation_link(
    signer: &TokenSigner,
    public_domain: &str,
    email: &str,
    now_ms: i64,
) -> Result<String> {
    let token = signer.sign(&Claims::activation(email, now_ms))?;
    Ok(format!("https://{public_domain}/activate?token={token}"))
}
