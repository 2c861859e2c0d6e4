//! Server Configuration
//!
//! Every secret and endpoint is read from the environment exactly once at
//! startup into this structure; nothing re-reads ambient state per call.

use platy_menu::OpenAiConfig;
use platy_payments::wompi::DEFAULT_API_BASE;

/// Development-only signing secret, matching the original deployment's
/// fallback so locally-issued tokens stay verifiable
pub const DEV_SECRET: &str = "dev-secret-change-me";

/// Site identity served to the frontend
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub brand: &'static str,
    pub whatsapp: &'static str,
    pub lifetime_usd: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            brand: "PLATY",
            whatsapp: "573001112233",
            lifetime_usd: 9.97,
        }
    }
}

/// Process-wide configuration, immutable for the process lifetime
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Public domain used when minting activation links
    pub public_domain: String,

    /// Admin console password; `None` makes every login fail
    pub admin_password: Option<String>,

    /// HMAC secret for all signed tokens
    pub access_secret: String,

    /// Wompi API base URL
    pub wompi_api_base: String,

    /// Wompi private (bearer) key
    pub wompi_private_key: String,

    /// Shared secret for webhook signatures; `None` reports every
    /// signature as invalid
    pub wompi_events_secret: Option<String>,

    /// Hosted Wompi payment link the checkout page redirects to
    pub checkout_link: Option<String>,

    /// Generative model provider settings
    pub openai: OpenAiConfig,

    /// Static site identity
    pub site: SiteConfig,
}

impl ServerConfig {
    /// Load from environment variables, warning about anything that
    /// degrades a feature rather than failing startup.
    pub fn from_env() -> Self {
        let admin_password = std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());
        if admin_password.is_none() {
            tracing::warn!("ADMIN_PASSWORD not set - admin console is locked out");
        }

        let access_secret = std::env::var("ACCESS_COOKIE_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("ACCESS_COOKIE_SECRET not set - using the development secret");
                DEV_SECRET.into()
            });

        let wompi_events_secret = std::env::var("WOMPI_EVENTS_SECRET")
            .ok()
            .filter(|s| !s.is_empty());
        if wompi_events_secret.is_none() {
            tracing::warn!("WOMPI_EVENTS_SECRET not set - webhook signatures will not verify");
        }

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            public_domain: std::env::var("PUBLIC_DOMAIN").unwrap_or_else(|_| "platy.app".into()),
            admin_password,
            access_secret,
            wompi_api_base: std::env::var("WOMPI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            wompi_private_key: std::env::var("WOMPI_PRIVATE_KEY").unwrap_or_default(),
            wompi_events_secret,
            checkout_link: std::env::var("PUBLIC_WOMPI_LINK").ok().filter(|l| !l.is_empty()),
            openai: OpenAiConfig::from_env(),
            site: SiteConfig::default(),
        }
    }

    /// Whether the model provider has a key
    pub fn model_configured(&self) -> bool {
        !self.openai.api_key.is_empty()
    }

    /// Whether gateway lookups can authenticate
    pub fn payments_configured(&self) -> bool {
        !self.wompi_private_key.is_empty()
    }
}
