//! Platy HTTP Server
//!
//! Axum-based server for the meal-plan funnel: landing/wizard static
//! frontend, menu generation API, Wompi payment integration, activation
//! links and the admin console.

mod access;
mod config;
mod cookies;
mod handlers;
mod router;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use platy_auth::TokenSigner;
use platy_core::Pricebook;
use platy_menu::{MenuService, OpenAiChat};
use platy_payments::WompiClient;

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    if config.model_configured() {
        tracing::info!(model = %config.openai.model, "✓ Model provider configured");
    } else {
        tracing::warn!("⚠ Model provider not configured - every plan will be the fallback week");
    }
    if config.payments_configured() {
        tracing::info!("✓ Wompi configured");
    } else {
        tracing::warn!("⚠ Wompi not configured - gateway lookups will fail");
        tracing::warn!("  Set WOMPI_PRIVATE_KEY (and WOMPI_EVENTS_SECRET) in .env");
    }

    // Static price table, parsed once
    let pricebook = Arc::new(Pricebook::builtin()?);

    // Token signer shared by middleware and handlers
    let signer = Arc::new(TokenSigner::new(&config.access_secret));

    // Menu generation service
    let model = Arc::new(OpenAiChat::from_config(config.openai.clone()));
    let menu = Arc::new(MenuService::new(model, pricebook));

    // Payment gateway client
    let wompi = Arc::new(WompiClient::new(
        &config.wompi_api_base,
        &config.wompi_private_key,
    ));

    let bind_addr = config.bind_addr.clone();

    // Build application state
    let state = AppState {
        config: Arc::new(config),
        signer,
        menu,
        wompi,
    };

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🥗 platy-server running on http://{}", bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  GET  /api/site        - Public site configuration");
    tracing::info!("  POST /generate-menu   - Generate a weekly plan");
    tracing::info!("  GET  /activate        - Redeem an activation token");
    tracing::info!("  POST /admin/login     - Admin console login");
    tracing::info!("  POST /admin/grant     - Mint a manual access link");
    tracing::info!("  GET  /wompi/recent    - Recent gateway transactions");
    tracing::info!("  GET  /wompi/verify    - Verify payment & grant access");
    tracing::info!("  POST /wompi/webhook   - Gateway event notifications");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
