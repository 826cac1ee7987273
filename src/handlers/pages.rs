use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    auth::verify_password,
    error::AppError,
    render::html::{app_page, login_page},
    server::AppState,
    session::SessionContext,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// GET / - Login form for a gated session, calculator page otherwise
pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Html<String> {
    if !state.sessions.is_authenticated(&ctx.id) {
        return Html(login_page());
    }
    let snapshot = state.catalog.snapshot().await;
    Html(app_page(&snapshot))
}

/// POST /login - Check the shared password and mark the session authenticated
pub async fn login(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    if state.config.auth.is_enabled()
        && !verify_password(&state.config.auth.password, &request.password)
    {
        warn!(session = %ctx.id, "Login rejected");
        return Err(AppError::Unauthorized("Wrong password".to_string()));
    }

    state.sessions.set_authenticated(&ctx.id, true);
    info!(session = %ctx.id, "Session logged in");

    Ok(Json(json!({ "authenticated": true })))
}

/// POST /logout - Clear the login flag
pub async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> StatusCode {
    if state.config.auth.is_enabled() {
        state.sessions.set_authenticated(&ctx.id, false);
        info!(session = %ctx.id, "Session logged out");
    }
    StatusCode::NO_CONTENT
}
