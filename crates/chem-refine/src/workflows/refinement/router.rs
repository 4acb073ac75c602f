use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CollectionStatus, IngredientId, RefinementIssue, RefinementStats};
use super::repository::{IngredientPatch, RecordStore, StoreError};
use super::service::{RefinementService, RefinementServiceError};

/// Router builder exposing the refinement endpoints consumed by the grid
/// editor, the issue list, and the dashboard.
pub fn refinement_router<S>(service: Arc<RefinementService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/v1/refinement/stats", get(stats_handler::<S>))
        .route("/api/v1/refinement/products", get(products_handler::<S>))
        .route(
            "/api/v1/refinement/ingredients/:ingredient_id",
            patch(update_ingredient_handler::<S>),
        )
        .route(
            "/api/v1/refinement/ingredients/:ingredient_id/auto-fix",
            post(auto_fix_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductListQuery {
    #[serde(default = "default_limit")]
    pub(crate) limit: usize,
    #[serde(default)]
    pub(crate) offset: usize,
    /// Comma-separated collection statuses; unknown tokens are ignored.
    #[serde(default)]
    pub(crate) status: Option<String>,
}

fn default_limit() -> usize {
    50
}

impl ProductListQuery {
    pub(crate) fn statuses(&self) -> Vec<CollectionStatus> {
        self.status
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(CollectionStatus::parse)
            .collect()
    }
}

pub(crate) async fn stats_handler<S>(
    State(service): State<Arc<RefinementService<S>>>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.refinement_stats().await {
        Ok(stats) => (StatusCode::OK, axum::Json(json!({ "data": stats }))).into_response(),
        Err(error) => {
            // Dashboards render zeroed counters instead of failing the page.
            let payload = json!({
                "data": RefinementStats::default(),
                "error": error.to_string(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn products_handler<S>(
    State(service): State<Arc<RefinementService<S>>>,
    Query(query): Query<ProductListQuery>,
) -> Response
where
    S: RecordStore + 'static,
{
    let statuses = query.statuses();
    match service
        .products_for_refinement(query.limit, query.offset, &statuses)
        .await
    {
        Ok(products) => (StatusCode::OK, axum::Json(json!({ "data": products }))).into_response(),
        Err(error) => {
            let payload = json!({
                "data": [],
                "error": error.to_string(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn update_ingredient_handler<S>(
    State(service): State<Arc<RefinementService<S>>>,
    Path(ingredient_id): Path<String>,
    axum::Json(patch): axum::Json<IngredientPatch>,
) -> Response
where
    S: RecordStore + 'static,
{
    let id = IngredientId(ingredient_id);
    match service.update_ingredient(&id, patch).await {
        Ok(ingredient) => {
            (StatusCode::OK, axum::Json(json!({ "data": ingredient }))).into_response()
        }
        Err(RefinementServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "data": null,
                "error": "ingredient not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "data": null,
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn auto_fix_handler<S>(
    State(service): State<Arc<RefinementService<S>>>,
    Path(ingredient_id): Path<String>,
    axum::Json(issues): axum::Json<Vec<RefinementIssue>>,
) -> Response
where
    S: RecordStore + 'static,
{
    let id = IngredientId(ingredient_id);
    match service.apply_auto_refinement(&id, &issues).await {
        Ok(outcome) => {
            let payload = json!({
                "success": true,
                "applied": outcome.applied,
                "skipped": outcome.skipped,
                "data": outcome.ingredient,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            // The auto-fix surface never rejects; failure is reported in-band
            // so callers can re-offer the fix after a refetch.
            let payload = json!({
                "success": false,
                "applied": 0,
                "error": error.to_string(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
    }
}
