//! API Client

use platy_core::Plan;
use serde::{Deserialize, Serialize};

/// Errors a page wants to tell apart; everything else is a message string
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// 402 from /generate-menu: free trials exhausted
    TrialsLimit,

    /// Anything else
    Other(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::TrialsLimit => write!(f, "Se acabaron los intentos gratis"),
            ApiError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

/// Wizard form state sent to the backend
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WizardForm {
    pub ciudad: String,
    pub personas: u32,
    pub modo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alergias: Option<String>,
}

/// Public site configuration
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SiteInfo {
    pub brand: String,
    pub checkout_link: Option<String>,
    pub lifetime_usd: f64,
    pub free_trials: u32,
}

/// GET /api/site
pub async fn fetch_site() -> Result<SiteInfo, String> {
    let response = reqwest::Client::new()
        .get("/api/site")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    response.json().await.map_err(|e| e.to_string())
}

/// POST /generate-menu
pub async fn generate_menu(form: &WizardForm) -> Result<Plan, ApiError> {
    let response = reqwest::Client::new()
        .post("/generate-menu")
        .json(form)
        .send()
        .await
        .map_err(|e| ApiError::Other(e.to_string()))?;

    if response.status().as_u16() == 402 {
        return Err(ApiError::TrialsLimit);
    }
    if !response.status().is_success() {
        return Err(ApiError::Other(format!("HTTP {}", response.status())));
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Other(e.to_string()))
}

/// POST /admin/login
pub async fn admin_login(password: &str) -> bool {
    let body = serde_json::json!({ "password": password });
    match reqwest::Client::new()
        .post("/admin/login")
        .json(&body)
        .send()
        .await
    {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// POST /admin/logout
pub async fn admin_logout() {
    let _ = reqwest::Client::new().post("/admin/logout").send().await;
}

/// POST /admin/grant -> activation link
pub async fn admin_grant(email: &str) -> Result<String, String> {
    let body = serde_json::json!({ "email": email });
    let response = reqwest::Client::new()
        .post("/admin/grant")
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let data: serde_json::Value = response.json().await.unwrap_or_default();
    data["link"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "No se pudo generar el link".into())
}

/// GET /wompi/recent?per= -> the gateway's `data` array
pub async fn recent_transactions(per: u32) -> Result<Vec<serde_json::Value>, String> {
    let response = reqwest::Client::new()
        .get(format!("/wompi/recent?per={per}"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }
    let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
    Ok(data["data"].as_array().cloned().unwrap_or_default())
}

/// GET /wompi/verify?id= -> whether access was granted
pub async fn verify_transaction(id: &str) -> bool {
    match reqwest::Client::new()
        .get(format!("/wompi/verify?id={id}"))
        .send()
        .await
    {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}
