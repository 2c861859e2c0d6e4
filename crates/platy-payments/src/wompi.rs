//! Wompi REST Client
//!
//! Read-only view over the gateway's transaction endpoints. Transactions
//! are gateway-owned and never persisted locally; every lookup goes to the
//! API with the private key as a bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};

/// Default production API base
pub const DEFAULT_API_BASE: &str = "https://production.wompi.co";

/// Gateway transaction status
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Approved,
    ApprovedPartial,
    Declined,
    Voided,
    Error,
    Pending,
    /// Anything the gateway reports that this build does not know
    Other(String),
}

impl TransactionStatus {
    /// Statuses that count as a confirmed payment
    pub fn is_approved(&self) -> bool {
        matches!(self, TransactionStatus::Approved | TransactionStatus::ApprovedPartial)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::ApprovedPartial => "APPROVED_PARTIAL",
            TransactionStatus::Declined => "DECLINED",
            TransactionStatus::Voided => "VOIDED",
            TransactionStatus::Error => "ERROR",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Other(s) => s,
        }
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        match s.to_uppercase().as_str() {
            "APPROVED" => TransactionStatus::Approved,
            "APPROVED_PARTIAL" => TransactionStatus::ApprovedPartial,
            "DECLINED" => TransactionStatus::Declined,
            "VOIDED" => TransactionStatus::Voided,
            "ERROR" => TransactionStatus::Error,
            "PENDING" => TransactionStatus::Pending,
            _ => TransactionStatus::Other(s),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(s: TransactionStatus) -> Self {
        s.as_str().to_string()
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only transaction view used by the admin console
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub status: TransactionStatus,

    #[serde(rename = "amount_in_cents", default)]
    pub amount_in_cents: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(rename = "customer_email", default)]
    pub customer_email: Option<String>,

    #[serde(rename = "created_at", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Wompi API client
pub struct WompiClient {
    http: reqwest::Client,
    base_url: String,
    private_key: String,
}

impl WompiClient {
    /// Create a new client against a gateway base URL
    pub fn new(base_url: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            private_key: private_key.into(),
        }
    }

    /// Create from `WOMPI_API_BASE` / `WOMPI_PRIVATE_KEY`
    pub fn from_env() -> Self {
        let base = std::env::var("WOMPI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let key = std::env::var("WOMPI_PRIVATE_KEY").unwrap_or_default();
        if key.is_empty() {
            tracing::warn!("WOMPI_PRIVATE_KEY not set - gateway lookups will be rejected");
        }
        Self::new(base, key)
    }

    /// Most recent transactions, verbatim gateway JSON
    pub async fn recent(&self, per_page: u32) -> Result<serde_json::Value> {
        self.get(&format!("{}/v1/transactions?per_page={per_page}", self.base_url))
            .await
    }

    /// Single transaction by id, verbatim gateway JSON
    pub async fn transaction(&self, id: &str) -> Result<serde_json::Value> {
        self.get(&format!("{}/v1/transactions/{id}", self.base_url))
            .await
    }

    /// Current status of a transaction.
    ///
    /// The gateway wraps the record in `{"data": {...}}`; some error bodies
    /// put `status` at the top level, so both spots are checked.
    pub async fn transaction_status(&self, id: &str) -> Result<TransactionStatus> {
        let body = self.transaction(id).await?;
        Self::extract_status(&body)
            .ok_or_else(|| PaymentError::Gateway(format!("no status in response for tx {id}")))
    }

    /// Pull a status string out of a gateway response body
    pub fn extract_status(body: &serde_json::Value) -> Option<TransactionStatus> {
        body.pointer("/data/status")
            .or_else(|| body.get("status"))
            .and_then(|s| s.as_str())
            .map(|s| TransactionStatus::from(s.to_string()))
    }

    async fn get(&self, url: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.private_key)
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))
    }
}
