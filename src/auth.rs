use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{
    error::AppError,
    server::AppState,
    session::{session_cookie, session_id_from_headers, SessionContext},
};

/// Session middleware
/// Resumes the caller's session or picks a fresh id, attaches a [`SessionContext`]
/// to the request and sets the cookie once the handler has stored a new session
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = state.sessions.open(session_id_from_headers(req.headers()));
    req.extensions_mut().insert(ctx);

    let mut response = next.run(req).await;

    if ctx.is_new && state.sessions.contains(&ctx.id) {
        match HeaderValue::from_str(&session_cookie(&ctx.id)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Failed to build session cookie"),
        }
    }

    response
}

/// Password gate
/// Rejects requests whose session has not logged in
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = req
        .extensions()
        .get::<SessionContext>()
        .copied()
        .ok_or_else(|| AppError::InternalError("Session middleware not installed".to_string()))?;

    if !state.sessions.is_authenticated(&ctx.id) {
        return Err(AppError::Unauthorized("Login required".to_string()));
    }

    Ok(next.run(req).await)
}

/// Compare a supplied password with the configured one in constant time
pub fn verify_password(expected: &str, supplied: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}
