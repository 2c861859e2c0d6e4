//! Router Assembly
//!
//! All routes plus the gated `/pro` static area. Split from `main` so the
//! whole surface can be exercised in-process with `tower::oneshot`.

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::access;
use crate::handlers::{
    activate, admin_grant, admin_login, admin_logout, generate_menu, health_check, site_info,
    wompi_recent, wompi_tx, wompi_verify, wompi_webhook,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Paywalled static area; the middleware is the only gate
    let pro = Router::new()
        .fallback_service(ServeDir::new("static/pro"))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access::require_lifetime,
        ));

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/site", get(site_info))
        // Menu API
        .route("/generate-menu", post(generate_menu))
        // Access lifecycle
        .route("/activate", get(activate))
        .route("/admin/login", post(admin_login))
        .route("/admin/logout", post(admin_logout))
        .route("/admin/grant", post(admin_grant))
        // Payments
        .route("/wompi/recent", get(wompi_recent))
        .route("/wompi/tx", get(wompi_tx))
        .route("/wompi/verify", get(wompi_verify))
        .route("/wompi/webhook", post(wompi_webhook))
        .nest("/pro", pro)
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::util::ServiceExt;

    use platy_auth::cookies::{ACCESS_COOKIE, ADMIN_COOKIE, TRIALS_COOKIE};
    use platy_auth::{Claims, TokenSigner};
    use platy_core::Pricebook;
    use platy_menu::{MenuService, OpenAiChat, OpenAiConfig};
    use platy_payments::WompiClient;

    use crate::config::{ServerConfig, SiteConfig};

    /// A fake gateway answering every transaction lookup with the given
    /// status, for driving the verify/webhook paths without the network.
    async fn spawn_gateway(status: &'static str) -> String {
        let app = Router::new().route(
            "/v1/transactions/{id}",
            get(move |axum::extract::Path(id): axum::extract::Path<String>| async move {
                axum::Json(serde_json::json!({ "data": { "id": id, "status": status } }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// State with an unreachable model and gateway: menu generation always
    /// takes the fallback path, gateway lookups always error.
    fn test_state() -> AppState {
        test_state_with_gateway("http://127.0.0.1:9")
    }

    fn test_state_with_gateway(gateway: &str) -> AppState {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".into(),
            public_domain: "platy.test".into(),
            admin_password: Some("s3cret".into()),
            access_secret: "test-secret".into(),
            wompi_api_base: gateway.into(),
            wompi_private_key: String::new(),
            wompi_events_secret: Some("events-secret".into()),
            checkout_link: None,
            openai: OpenAiConfig {
                api_key: String::new(),
                base_url: "http://127.0.0.1:9".into(),
                ..OpenAiConfig::default()
            },
            site: SiteConfig::default(),
        };

        let signer = Arc::new(TokenSigner::new(&config.access_secret));
        let model = Arc::new(OpenAiChat::from_config(config.openai.clone()));
        let menu = Arc::new(MenuService::new(
            model,
            Arc::new(Pricebook::builtin().unwrap()),
        ));
        let wompi = Arc::new(WompiClient::new(&config.wompi_api_base, ""));

        AppState {
            config: Arc::new(config),
            signer,
            menu,
            wompi,
        }
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_admin_login_rejects_wrong_password() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/admin/login", r#"{"password":"nope"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["ok"], false);
    }

    #[tokio::test]
    async fn test_admin_login_rejects_empty_password_even_if_unconfigured() {
        let mut state = test_state();
        let mut config = (*state.config).clone();
        config.admin_password = None;
        state.config = Arc::new(config);

        let app = build_router(state);
        let response = app
            .oneshot(post_json("/admin/login", r#"{"password":""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_login_sets_admin_cookie() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/admin/login", r#"{"password":"s3cret"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(cookie.starts_with(&format!("{ADMIN_COOKIE}=")));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_grant_requires_admin_cookie() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json("/admin/grant", r#"{"email":"ana@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_grant_mints_activation_link() {
        let state = test_state();
        let admin_token = state.signer.sign(&Claims::admin(0)).unwrap();
        let app = build_router(state);

        let mut request = post_json("/admin/grant", r#"{"email":"ana@example.com"}"#);
        request.headers_mut().insert(
            header::COOKIE,
            format!("{ADMIN_COOKIE}={admin_token}").parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        let link = body["link"].as_str().unwrap();
        assert!(link.starts_with("https://platy.test/activate?token="));
    }

    #[tokio::test]
    async fn test_grant_requires_email() {
        let state = test_state();
        let admin_token = state.signer.sign(&Claims::admin(0)).unwrap();
        let app = build_router(state);

        let mut request = post_json("/admin/grant", r#"{"email":""}"#);
        request.headers_mut().insert(
            header::COOKIE,
            format!("{ADMIN_COOKIE}={admin_token}").parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "email_required");
    }

    #[tokio::test]
    async fn test_activate_sets_access_cookie_and_redirects() {
        let state = test_state();
        let token = state
            .signer
            .sign(&Claims::activation("ana@example.com", chrono::Utc::now().timestamp_millis()))
            .unwrap();
        let app = build_router(state);

        let request = Request::builder()
            .uri(format!("/activate?token={token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/pro");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with(&format!("{ACCESS_COOKIE}={token}")));
    }

    #[tokio::test]
    async fn test_activate_rejects_expired_token() {
        let state = test_state();
        // issued far enough in the past that the 48h window has closed
        let token = state.signer.sign(&Claims::activation("a@b.co", 0)).unwrap();
        let app = build_router(state);

        let request = Request::builder()
            .uri(format!("/activate?token={token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "expired");
    }

    #[tokio::test]
    async fn test_activate_rejects_garbage_token() {
        let app = build_router(test_state());
        let request = Request::builder()
            .uri("/activate?token=not.a.token")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_fourth_trial_is_payment_required() {
        let app = build_router(test_state());
        let mut request = post_json("/generate-menu", "{}");
        request.headers_mut().insert(
            header::COOKIE,
            format!("{TRIALS_COOKIE}=3").parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body_json(response).await["error"], "TRIALS_LIMIT");
    }

    #[tokio::test]
    async fn test_generate_menu_bumps_trial_counter() {
        let app = build_router(test_state());
        let mut request = post_json("/generate-menu", r#"{"ciudad":"Bogotá, CO","personas":2}"#);
        request.headers_mut().insert(
            header::COOKIE,
            format!("{TRIALS_COOKIE}=1").parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-platy-trials"], "1");
        assert_eq!(response.headers()["x-platy-has-access"], "false");

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with(&format!("{TRIALS_COOKIE}=2")));

        // unreachable model: the deterministic fallback came back
        let plan = body_json(response).await;
        assert_eq!(plan["menu"].as_array().unwrap().len(), 7);
        assert!(plan["costos"]["total"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_access_cookie_skips_trial_counting() {
        let app = build_router(test_state());
        let mut request = post_json("/generate-menu", "{}");
        request.headers_mut().insert(
            header::COOKIE,
            format!("{TRIALS_COOKIE}=9; {ACCESS_COOKIE}=anything").parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-platy-has-access"], "true");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_pro_redirects_without_access() {
        let app = build_router(test_state());
        let request = Request::builder().uri("/pro").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/#oferta");
    }

    #[tokio::test]
    async fn test_pro_admits_lifetime_access() {
        let state = test_state();
        let token = state.signer.sign(&Claims::lifetime("a@b.co", 0)).unwrap();
        let app = build_router(state);

        let mut request = Request::builder().uri("/pro").body(Body::empty()).unwrap();
        request.headers_mut().insert(
            header::COOKIE,
            format!("{ACCESS_COOKIE}={token}").parse().unwrap(),
        );
        let response = app.oneshot(request).await.unwrap();

        // no static files on disk in tests; the gate letting us through to
        // the file service is the point
        assert!(!response.status().is_redirection());
    }

    #[tokio::test]
    async fn test_pro_rejects_admin_token() {
        let state = test_state();
        let token = state.signer.sign(&Claims::admin(0)).unwrap();
        let app = build_router(state);

        let mut request = Request::builder().uri("/pro").body(Body::empty()).unwrap();
        request.headers_mut().insert(
            header::COOKIE,
            format!("{ACCESS_COOKIE}={token}").parse().unwrap(),
        );
        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_redirection());
    }

    #[tokio::test]
    async fn test_webhook_rejects_bad_json() {
        let app = build_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/wompi/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad_json");
    }

    #[tokio::test]
    async fn test_webhook_reports_signature_and_still_answers() {
        let app = build_router(test_state());
        // no signature header: reported false, body still processed
        let request = Request::builder()
            .method("POST")
            .uri("/wompi/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"event":"transaction.updated"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["event"], "TRANSACTION.UPDATED");
        assert_eq!(body["signature"], false);
        assert_eq!(body["verified"], false);
    }

    #[tokio::test]
    async fn test_tx_requires_id() {
        let app = build_router(test_state());
        let request = Request::builder()
            .uri("/wompi/tx")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_requires_id() {
        let app = build_router(test_state());
        let request = Request::builder()
            .uri("/wompi/verify")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_approved_sets_access_cookie() {
        let gateway = spawn_gateway("APPROVED").await;
        let state = test_state_with_gateway(&gateway);
        let signer = state.signer.clone();
        let app = build_router(state);

        let request = Request::builder()
            .uri("/wompi/verify?id=123&email=ana@example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .to_string();
        let token = cookie
            .strip_prefix(&format!("{ACCESS_COOKIE}="))
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        let claims: Claims = signer.verify(token).expect("access token verifies");
        assert!(claims.has_lifetime());
        assert_eq!(claims.email.as_deref(), Some("ana@example.com"));

        assert_eq!(body_json(response).await["ok"], true);
    }

    #[tokio::test]
    async fn test_verify_declined_is_payment_required() {
        let gateway = spawn_gateway("DECLINED").await;
        let app = build_router(test_state_with_gateway(&gateway));

        let request = Request::builder()
            .uri("/wompi/verify?id=123")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"], "DECLINED");
    }

    #[tokio::test]
    async fn test_webhook_requeries_even_without_signature() {
        let gateway = spawn_gateway("APPROVED").await;
        let app = build_router(test_state_with_gateway(&gateway));

        let body = r#"{"event":"transaction.updated","data":{"transaction":{"id":"tx-9"}}}"#;
        let request = Request::builder()
            .method("POST")
            .uri("/wompi/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["signature"], false);
        assert_eq!(body["verified"], true);
        assert_eq!(body["id"], "tx-9");
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let app = build_router(test_state());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_configured"], false);
        assert_eq!(body["payments_configured"], false);
    }
}
