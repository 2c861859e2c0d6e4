//! Webhook Verification
//!
//! Wompi posts event notifications with an HMAC-SHA256 hex signature over
//! the raw body. The signature is checked in constant time, but a matching
//! signature is advisory only: the transaction status is always re-queried
//! from the gateway before anything is believed.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a webhook signature header against the raw body bytes.
///
/// The header value may carry an optional `sha256=` prefix (any case) and
/// surrounding whitespace. A missing header or secret verifies to `false`,
/// as does a header that is not valid hex.
pub fn verify_signature(raw_body: &[u8], signature: Option<&str>, secret: Option<&str>) -> bool {
    let (Some(signature), Some(secret)) = (signature, secret) else {
        return false;
    };

    let given = signature.trim();
    let given = given
        .get(..7)
        .filter(|p| p.eq_ignore_ascii_case("sha256="))
        .map_or(given, |_| given[7..].trim());

    let Ok(given) = hex::decode(given) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(raw_body);
    mac.verify_slice(&given).is_ok()
}

/// The two fields the funnel cares about from an event body
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventNotice {
    /// Uppercased event name, empty when absent
    pub event: String,

    /// Transaction id, wherever the gateway put it
    pub transaction_id: Option<String>,
}

impl EventNotice {
    /// Extract the event name and transaction id from a parsed body.
    ///
    /// Wompi has shipped several shapes over time; the id is looked up at
    /// `data.transaction.id`, then `data.id`, then `transaction.id`.
    pub fn from_body(body: &serde_json::Value) -> Self {
        let event = body
            .get("event")
            .or_else(|| body.pointer("/data/event"))
            .and_then(|e| e.as_str())
            .unwrap_or_default()
            .to_uppercase();

        let transaction_id = body
            .pointer("/data/transaction/id")
            .or_else(|| body.pointer("/data/id"))
            .or_else(|| body.pointer("/transaction/id"))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self {
            event,
            transaction_id,
        }
    }
}
