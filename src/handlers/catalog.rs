use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    catalog::{CatalogProduct, CatalogSnapshot},
    error::AppError,
    server::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring filter on the product name
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub total: usize,
    pub products: Vec<CatalogProduct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

impl CatalogResponse {
    fn from_snapshot(snapshot: &CatalogSnapshot, query: Option<&str>) -> Self {
        let products: Vec<CatalogProduct> = match query.map(str::trim) {
            Some(q) if !q.is_empty() => snapshot.catalog.search(q).into_iter().cloned().collect(),
            _ => snapshot.catalog.products().to_vec(),
        };

        Self {
            total: snapshot.catalog.len(),
            products,
            load_error: snapshot.load_error.clone(),
        }
    }
}

/// GET /api/catalog - List catalog products, optionally filtered
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Json<CatalogResponse> {
    let snapshot = state.catalog.snapshot().await;
    Json(CatalogResponse::from_snapshot(&snapshot, params.q.as_deref()))
}

/// POST /api/catalog/reload - Re-read the catalog source
///
/// A broken file is reported as a catalog error; the cache is left empty
/// with the message so the page shows it too.
pub async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<CatalogResponse>, AppError> {
    info!("Catalog reload requested");
    let snapshot = state.catalog.refresh().await?;
    Ok(Json(CatalogResponse::from_snapshot(&snapshot, None)))
}
