use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use time::OffsetDateTime;
use tracing::debug;

use super::jwt::verify_session;
use crate::state::AppState;

/// Resolves the caller from the session cookie and attaches it to the request.
///
/// Missing, invalid and expired tokens all leave the request anonymous; the
/// handlers decide what an anonymous caller may do.
pub async fn resolve_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(&state.config.cookie_name) {
        match verify_session(cookie.value(), &state.jwt, OffsetDateTime::now_utc()) {
            Ok(claims) => {
                req.extensions_mut().insert(claims.identity());
            }
            Err(e) => debug!(error = %e, "session cookie rejected"),
        }
    }
    next.run(req).await
}
