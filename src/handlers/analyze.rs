use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use tracing::info;

use crate::{
    error::AppError,
    pricing::{AnalysisReport, AnalysisRequest},
    render::html::analysis_fragment,
    server::AppState,
};

async fn run_analysis(state: &AppState, request: &AnalysisRequest) -> Result<AnalysisReport, AppError> {
    let catalog = state.catalog.catalog().await;
    let report = request.run(&catalog)?;

    info!(
        products = request.products.len(),
        discounts = report.discounts.len(),
        rows = report.rows.len(),
        "Margin analysis computed"
    );

    Ok(report)
}

/// POST /api/analyze - Margin analysis as JSON rows
pub async fn analyze_json(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, AppError> {
    let Json(request) = payload?;
    let report = run_analysis(&state, &request).await?;
    Ok(Json(report))
}

/// POST /analyze - Margin analysis as a color-coded HTML table fragment
pub async fn analyze_html(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Html<String>, AppError> {
    let Json(request) = payload?;
    let report = run_analysis(&state, &request).await?;
    Ok(Html(analysis_fragment(&report)))
}
