use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Local;
use tracing::info;

use crate::{
    error::AppError,
    manufacturing::{estimate, CostHistory, CostInput, CostRecord},
    server::AppState,
    session::SessionContext,
};

/// POST /api/cost - Compute a factory price and append it to the session history
pub async fn create_estimate(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    payload: Result<Json<CostInput>, JsonRejection>,
) -> Result<Json<CostRecord>, AppError> {
    let Json(input) = payload?;
    let record = estimate(&input, state.config.manufacturing.vat_rate, Local::now())?;

    let entries = state.sessions.with_session_or_create(&ctx.id, |session| {
        session.cost_history.push(record.clone());
        session.cost_history.len()
    });

    info!(
        item = %record.item,
        final_cost = record.final_cost,
        history = entries,
        "Manufacturing cost computed"
    );

    Ok(Json(record))
}

/// GET /api/cost/history - Estimates computed in this session
pub async fn list_history(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Json<Vec<CostRecord>> {
    let records = state
        .sessions
        .with_session(&ctx.id, |session| session.cost_history.records().to_vec())
        .unwrap_or_default();
    Json(records)
}

/// GET /api/cost/history.csv - Download the session history as CSV
pub async fn export_history(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<impl IntoResponse, AppError> {
    let csv = match state
        .sessions
        .with_session(&ctx.id, |session| session.cost_history.to_csv())
    {
        Some(csv) => csv?,
        None => CostHistory::new().to_csv()?,
    };

    let disposition = format!(
        "attachment; filename=\"cost_history_{}.csv\"",
        Local::now().format("%Y%m%d_%H%M")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

/// DELETE /api/cost/history - Clear the session history
pub async fn clear_history(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> StatusCode {
    state
        .sessions
        .update_session(&ctx.id, |session| session.cost_history.clear());
    info!(session = %ctx.id, "Cost history cleared");
    StatusCode::NO_CONTENT
}
