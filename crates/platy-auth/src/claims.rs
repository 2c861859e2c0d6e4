//! Typed Claims
//!
//! Every token carries the same claim struct so issuers and verifiers
//! cannot drift apart on shape. Absent claims are omitted from the JSON.
//! Timestamps are epoch milliseconds.

use serde::{Deserialize, Serialize};

use crate::cookies::ACTIVATION_TTL_MS;

/// Session role claim
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
}

/// Entitlement claim
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanKind {
    #[serde(rename = "lifetime")]
    Lifetime,
}

/// Signed token payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin session role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Customer entitlement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanKind>,

    /// Customer email, when the grant is tied to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued-at, epoch milliseconds
    pub iat: i64,

    /// Expiry, epoch milliseconds; absent for long-lived access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Admin session claims (expiry enforced by the cookie lifetime)
    pub fn admin(now_ms: i64) -> Self {
        Self {
            role: Some(Role::Admin),
            plan: None,
            email: None,
            iat: now_ms,
            exp: None,
        }
    }

    /// Lifetime-access claims minted after a confirmed payment
    pub fn lifetime(email: impl Into<String>, now_ms: i64) -> Self {
        let email = email.into();
        Self {
            role: None,
            plan: Some(PlanKind::Lifetime),
            email: (!email.is_empty()).then_some(email),
            iat: now_ms,
            exp: None,
        }
    }

    /// Short-lived activation claims for a manual grant link
    pub fn activation(email: impl Into<String>, now_ms: i64) -> Self {
        Self {
            exp: Some(now_ms + ACTIVATION_TTL_MS),
            ..Self::lifetime(email, now_ms)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    pub fn has_lifetime(&self) -> bool {
        self.plan == Some(PlanKind::Lifetime)
    }

    /// Whether an `exp` claim is present and in the past
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.exp.is_some_and(|exp| now_ms > exp)
    }
}
