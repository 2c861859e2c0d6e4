//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::json;

use platy_auth::cookies::{
    ACCESS_COOKIE, ACCESS_MAX_AGE, ADMIN_COOKIE, ADMIN_MAX_AGE, FREE_TRIALS, TRIALS_COOKIE,
    TRIALS_MAX_AGE,
};
use platy_auth::Claims;
use platy_menu::MenuRequest;
use platy_payments::{EventNotice, GrantOutcome, activation_link, verify_and_grant, verify_signature};

use crate::cookies::{clear_cookie, plain_cookie, secure_cookie};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_configured: bool,
    pub payments_configured: bool,
}

#[derive(Serialize)]
pub struct SiteResponse {
    pub brand: &'static str,
    pub domain: String,
    pub whatsapp: &'static str,
    pub checkout_link: Option<String>,
    pub lifetime_usd: f64,
    pub free_trials: u32,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub per: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TxQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whether the request carries a valid admin-session cookie
fn is_admin(state: &AppState, jar: &CookieJar) -> bool {
    jar.get(ADMIN_COOKIE)
        .and_then(|cookie| state.signer.verify::<Claims>(cookie.value()))
        .is_some_and(|claims| claims.is_admin())
}

// ============================================================================
// Health & Site Info
// ============================================================================

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_configured: state.config.model_configured(),
        payments_configured: state.config.payments_configured(),
    })
}

pub async fn site_info(State(state): State<AppState>) -> Json<SiteResponse> {
    Json(SiteResponse {
        brand: state.config.site.brand,
        domain: state.config.public_domain.clone(),
        whatsapp: state.config.site.whatsapp,
        checkout_link: state.config.checkout_link.clone(),
        lifetime_usd: state.config.site.lifetime_usd,
        free_trials: FREE_TRIALS,
    })
}

// ============================================================================
// Menu Generation
// ============================================================================

/// POST /generate-menu
///
/// Trial-gated: 3 free generations per browser, tracked in a plain cookie,
/// unless an access cookie is present. The plan itself always materializes
/// (model or fallback), so this never 5xxs on upstream trouble.
pub async fn generate_menu(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<MenuRequest>,
) -> Response {
    let trials: u32 = jar
        .get(TRIALS_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
        .unwrap_or(0);
    let has_access = jar
        .get(ACCESS_COOKIE)
        .is_some_and(|cookie| !cookie.value().is_empty());

    if !has_access && trials >= FREE_TRIALS {
        return (StatusCode::PAYMENT_REQUIRED, Json(json!({ "error": "TRIALS_LIMIT" })))
            .into_response();
    }

    let generated = state.menu.generate(&request).await;
    tracing::info!(source = ?generated.source, trials, has_access, "menu generated");

    let mut headers = HeaderMap::new();
    headers.insert(
        "x-platy-has-access",
        HeaderValue::from_static(if has_access { "true" } else { "false" }),
    );
    if let Ok(value) = HeaderValue::from_str(&trials.to_string()) {
        headers.insert("x-platy-trials", value);
    }
    if !has_access {
        if let Ok(value) = HeaderValue::from_str(&plain_cookie(
            TRIALS_COOKIE,
            &(trials + 1).to_string(),
            TRIALS_MAX_AGE,
        )) {
            headers.append(header::SET_COOKIE, value);
        }
    }

    (headers, Json(generated.plan)).into_response()
}

// ============================================================================
// Activation
// ============================================================================

/// GET /activate?token=
///
/// Redeems an activation token for the long-lived access cookie. The token
/// itself becomes the cookie value, so the same verifier accepts both.
pub async fn activate(State(state): State<AppState>, Query(query): Query<TokenQuery>) -> Response {
    let Some(claims) = state.signer.verify::<Claims>(&query.token) else {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "ok": false }))).into_response();
    };
    if !claims.has_lifetime() {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "ok": false }))).into_response();
    }
    if claims.is_expired(now_ms()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "error": "expired" })),
        )
            .into_response();
    }

    tracing::info!(email = ?claims.email, "activation token redeemed");

    let mut headers = HeaderMap::new();
    if let Ok(value) =
        HeaderValue::from_str(&secure_cookie(ACCESS_COOKIE, &query.token, ACCESS_MAX_AGE))
    {
        headers.insert(header::SET_COOKIE, value);
    }
    (headers, Redirect::to("/pro")).into_response()
}

// ============================================================================
// Admin Console
// ============================================================================

/// POST /admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Response {
    let ok = !request.password.is_empty()
        && state.config.admin_password.as_deref() == Some(request.password.as_str());
    if !ok {
        tracing::warn!("admin login rejected");
        return (StatusCode::UNAUTHORIZED, Json(json!({ "ok": false }))).into_response();
    }

    let token = match state.signer.sign(&Claims::admin(now_ms())) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "admin token signing failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "ok": false })))
                .into_response();
        }
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&secure_cookie(ADMIN_COOKIE, &token, ADMIN_MAX_AGE)) {
        headers.insert(header::SET_COOKIE, value);
    }
    (headers, Json(json!({ "ok": true }))).into_response()
}

/// POST /admin/logout
pub async fn admin_logout() -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&clear_cookie(ADMIN_COOKIE)) {
        headers.insert(header::SET_COOKIE, value);
    }
    (headers, Json(json!({ "ok": true }))).into_response()
}

/// POST /admin/grant
///
/// Mints a 48-hour activation link for an email, for buyers who paid
/// through some other channel.
pub async fn admin_grant(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<GrantRequest>,
) -> Response {
    if !is_admin(&state, &jar) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "ok": false }))).into_response();
    }
    if request.email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "email_required" })),
        )
            .into_response();
    }

    match activation_link(&state.signer, &state.config.public_domain, &request.email, now_ms()) {
        Ok(link) => {
            tracing::info!(email = %request.email, "manual grant link minted");
            Json(json!({ "ok": true, "link": link })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "grant link minting failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "ok": false }))).into_response()
        }
    }
}

// ============================================================================
// Wompi
// ============================================================================

/// GET /wompi/recent?per=
pub async fn wompi_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Response {
    match state.wompi.recent(query.per.unwrap_or(20)).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "recent transactions lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.user_message() })),
            )
                .into_response()
        }
    }
}

/// GET /wompi/tx?id=
pub async fn wompi_tx(State(state): State<AppState>, Query(query): Query<TxQuery>) -> Response {
    let Some(id) = query.id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "Missing id" })),
        )
            .into_response();
    };

    match state.wompi.transaction(&id).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "transaction lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.user_message() })),
            )
                .into_response()
        }
    }
}

/// GET /wompi/verify?id=&email=
///
/// Re-queries the gateway and converts an approved transaction into the
/// lifetime-access cookie. Anything not approved is a 402 with the status.
pub async fn wompi_verify(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    let Some(id) = query.id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "Missing id" })),
        )
            .into_response();
    };

    match verify_and_grant(&state.wompi, &state.signer, &id, &query.email, now_ms()).await {
        Ok(GrantOutcome::Granted { token }) => {
            let mut headers = HeaderMap::new();
            if let Ok(value) =
                HeaderValue::from_str(&secure_cookie(ACCESS_COOKIE, &token, ACCESS_MAX_AGE))
            {
                headers.insert(header::SET_COOKIE, value);
            }
            (headers, Json(json!({ "ok": true }))).into_response()
        }
        Ok(GrantOutcome::NotApproved { status }) => (
            StatusCode::PAYMENT_REQUIRED,
            Json(json!({ "ok": false, "status": status.as_str() })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "payment verification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.user_message() })),
            )
                .into_response()
        }
    }
}

/// POST /wompi/webhook
///
/// Signature verification over the raw body is reported but does not gate
/// anything: the transaction status is independently re-queried either way,
/// and the response is advisory.
pub async fn wompi_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get("x-event-signature")
        .or_else(|| headers.get("x-signature"))
        .and_then(|value| value.to_str().ok());

    let signature_ok = verify_signature(
        &body,
        signature,
        state.config.wompi_events_secret.as_deref(),
    );

    let Ok(payload) = serde_json::from_slice::<serde_json::Value>(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "bad_json" })),
        )
            .into_response();
    };

    let notice = EventNotice::from_body(&payload);

    let mut verified = false;
    if let Some(id) = &notice.transaction_id {
        verified = match state.wompi.transaction_status(id).await {
            Ok(status) => status.is_approved(),
            Err(e) => {
                tracing::warn!(error = %e, id, "webhook corroboration query failed");
                false
            }
        };
    }

    tracing::info!(
        event = %notice.event,
        id = ?notice.transaction_id,
        signature_ok,
        verified,
        "webhook received"
    );

    Json(json!({
        "ok": true,
        "event": notice.event,
        "id": notice.transaction_id,
        "verified": verified,
        "signature": signature_ok,
    }))
    .into_response()
}
