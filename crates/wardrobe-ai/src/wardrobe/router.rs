use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

use super::intake::GarmentSubmission;
use super::repository::{GarmentId, GarmentStore};
use super::service::{OutfitRequest, WardrobeService, WardrobeServiceError};
use super::validation::ValidationReport;

/// Body of a batch ingest.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub garments: Vec<GarmentSubmission>,
}

/// Router exposing garment intake, wardrobe queries and outfit recommendation.
pub fn wardrobe_router<S>(service: Arc<WardrobeService<S>>) -> Router
where
    S: GarmentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/garments",
            post(ingest_handler::<S>).get(list_handler::<S>),
        )
        // Static segment outranks `:garment_id`; GET here is a 405, never a lookup.
        .route("/api/v1/garments/derive", post(derive_handler::<S>))
        .route(
            "/api/v1/garments/:garment_id",
            get(garment_handler::<S>).delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/garments/:garment_id/validation",
            get(validation_handler::<S>),
        )
        .route("/api/v1/wardrobe/stats", get(stats_handler::<S>))
        .route("/api/v1/outfits/recommend", post(recommend_handler::<S>))
        .route(
            "/api/v1/outfits/alternatives",
            post(alternatives_handler::<S>),
        )
        .with_state(service)
}

fn error_response(error: WardrobeServiceError) -> Response {
    AppError::from(error).into_response()
}

pub(crate) async fn ingest_handler<S>(
    State(service): State<Arc<WardrobeService<S>>>,
    axum::Json(request): axum::Json<IngestRequest>,
) -> Response
where
    S: GarmentStore + 'static,
{
    let batch = service.ingest(request.garments);
    (StatusCode::OK, axum::Json(batch)).into_response()
}

pub(crate) async fn derive_handler<S>(
    State(service): State<Arc<WardrobeService<S>>>,
    axum::Json(submission): axum::Json<GarmentSubmission>,
) -> Response
where
    S: GarmentStore + 'static,
{
    let outcome = service.preview(&submission);
    let payload = json!({
        "profile": outcome.validated,
        "validation_report": ValidationReport::from_profile(&outcome.validated),
        "confidence_adjustment": outcome.confidence_adjustment,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn list_handler<S>(State(service): State<Arc<WardrobeService<S>>>) -> Response
where
    S: GarmentStore + 'static,
{
    match service.list() {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn garment_handler<S>(
    State(service): State<Arc<WardrobeService<S>>>,
    Path(garment_id): Path<String>,
) -> Response
where
    S: GarmentStore + 'static,
{
    match service.get(&GarmentId(garment_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<WardrobeService<S>>>,
    Path(garment_id): Path<String>,
) -> Response
where
    S: GarmentStore + 'static,
{
    let id = GarmentId(garment_id);
    match service.delete(&id) {
        Ok(()) => {
            let payload = json!({
                "success": true,
                "message": format!("Garment {id} deleted successfully"),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn validation_handler<S>(
    State(service): State<Arc<WardrobeService<S>>>,
    Path(garment_id): Path<String>,
) -> Response
where
    S: GarmentStore + 'static,
{
    match service.validation_report(&GarmentId(garment_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<S>(State(service): State<Arc<WardrobeService<S>>>) -> Response
where
    S: GarmentStore + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommend_handler<S>(
    State(service): State<Arc<WardrobeService<S>>>,
    axum::Json(request): axum::Json<OutfitRequest>,
) -> Response
where
    S: GarmentStore + 'static,
{
    match service.recommend(&request) {
        Ok(recommendation) => (StatusCode::OK, axum::Json(recommendation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn alternatives_handler<S>(
    State(service): State<Arc<WardrobeService<S>>>,
    axum::Json(request): axum::Json<OutfitRequest>,
) -> Response
where
    S: GarmentStore + 'static,
{
    match service.alternatives(&request) {
        Ok(alternatives) => {
            let payload = json!({ "alternatives": alternatives });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
