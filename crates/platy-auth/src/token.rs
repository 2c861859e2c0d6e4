//! Token Signer/Verifier
//!
//! Compact HMAC-SHA256 tokens: `base64url(JSON(claims)).base64url(mac)`,
//! both segments unpadded. One fixed key, one fixed hash; there is no
//! algorithm negotiation to get wrong.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::Sha256;

use crate::error::Result;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies capability tokens with a single fixed secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Sign a payload into the two-segment wire form
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String> {
        let data = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let mac = URL_SAFE_NO_PAD.encode(self.mac_of(data.as_bytes()));
        Ok(format!("{data}.{mac}"))
    }

    /// Verify a token and parse its payload.
    ///
    /// Returns `None` for anything other than a well-formed token whose MAC
    /// matches: missing separator, empty segments, bad base64, MAC
    /// mismatch, or unparseable claims. Never panics, never errors.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Option<T> {
        let (data, mac) = token.split_once('.')?;
        if data.is_empty() || mac.is_empty() {
            return None;
        }

        let given = URL_SAFE_NO_PAD.decode(mac).ok()?;
        // constant-time comparison of the recomputed MAC
        let mut hmac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        hmac.update(data.as_bytes());
        hmac.verify_slice(&given).ok()?;

        let payload = URL_SAFE_NO_PAD.decode(data).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    fn mac_of(&self, data: &[u8]) -> Vec<u8> {
        let mut hmac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts any key length");
        hmac.update(data);
        hmac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the secret
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Claims;

    fn signer() -> TokenSigner {
        TokenSigner::new("dev-secret-change-me")
    }

    #[test]
    fn test_round_trip() {
        let claims = Claims::lifetime("ana@example.com", 1_700_000_000_000);
        let token = signer().sign(&claims).unwrap();
        let back: Claims = signer().verify(&token).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn test_wire_shape_is_two_base64url_segments() {
        let token = signer().sign(&Claims::admin(0)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 2);
        for part in parts {
            assert!(!part.is_empty());
            assert!(URL_SAFE_NO_PAD.decode(part).is_ok());
            assert!(!part.contains('='));
        }
    }

    #[test]
    fn test_tampered_data_segment_fails() {
        let token = signer().sign(&Claims::admin(0)).unwrap();
        let (data, mac) = token.split_once('.').unwrap();
        let forged = Claims::lifetime("eve@example.com", 0);
        let forged_data = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let tampered = format!("{forged_data}.{mac}");
        assert!(signer().verify::<Claims>(&tampered).is_none());
        // sanity: the untampered token still verifies
        assert!(signer().verify::<Claims>(&format!("{data}.{mac}")).is_some());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let token = signer().sign(&Claims::admin(0)).unwrap();
        let (data, _) = token.split_once('.').unwrap();
        let tampered = format!("{data}.{}", URL_SAFE_NO_PAD.encode(b"not-a-mac"));
        assert!(signer().verify::<Claims>(&tampered).is_none());
    }

    #[test]
    fn test_missing_separator_returns_none() {
        assert!(signer().verify::<Claims>("justonesegment").is_none());
        assert!(signer().verify::<Claims>("").is_none());
        assert!(signer().verify::<Claims>(".").is_none());
        assert!(signer().verify::<Claims>("abc.").is_none());
        assert!(signer().verify::<Claims>(".abc").is_none());
    }

    #[test]
    fn test_garbage_base64_returns_none() {
        assert!(signer().verify::<Claims>("!!!.???").is_none());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = signer().sign(&Claims::admin(0)).unwrap();
        let other = TokenSigner::new("another-secret");
        assert!(other.verify::<Claims>(&token).is_none());
    }
}
