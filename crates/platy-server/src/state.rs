//! Application State

use std::sync::Arc;

use platy_auth::TokenSigner;
use platy_menu::MenuService;
use platy_payments::WompiClient;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Process configuration, loaded once at startup
    pub config: Arc<ServerConfig>,

    /// Token signer/verifier shared by middleware and handlers
    pub signer: Arc<TokenSigner>,

    /// Menu generation service
    pub menu: Arc<MenuService>,

    /// Wompi gateway client
    pub wompi: Arc<WompiClient>,
}
