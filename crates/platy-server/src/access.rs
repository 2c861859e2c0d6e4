//! Access Middleware
//!
//! Gates the `/pro` prefix. The access cookie is the whole session: verify
//! it, require the lifetime plan, otherwise send the visitor back to the
//! offer section of the landing page.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use platy_auth::{Claims, cookies::ACCESS_COOKIE};

use crate::state::AppState;

/// Where unauthenticated visitors land
pub const OFFER_REDIRECT: &str = "/#oferta";

pub async fn require_lifetime(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let claims: Option<Claims> = jar
        .get(ACCESS_COOKIE)
        .and_then(|cookie| state.signer.verify(cookie.value()));

    match claims {
        Some(claims) if claims.has_lifetime() => next.run(request).await,
        _ => Redirect::to(OFFER_REDIRECT).into_response(),
    }
}
