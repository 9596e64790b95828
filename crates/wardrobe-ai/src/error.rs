//! Errors surfaced by the service entry points and the JSON error body the
//! wardrobe routes answer with.

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::wardrobe::{RecommendationError, StoreError, WardrobeServiceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("http server failed: {0}")]
    Server(#[from] io::Error),
    #[error("cannot read wardrobe file {}: {source}", path.display())]
    WardrobeFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("wardrobe file {} is not a garment list: {source}", path.display())]
    WardrobeFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot render recommendation: {0}")]
    Render(#[source] serde_json::Error),
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No garments in wardrobe")]
    EmptyWardrobe,
}

impl AppError {
    /// Remedy to show alongside the message, when one exists.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AppError::Recommendation(err) => err.suggestion(),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Recommendation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotFound) | AppError::EmptyWardrobe => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WardrobeServiceError> for AppError {
    fn from(value: WardrobeServiceError) -> Self {
        match value {
            WardrobeServiceError::Store(err) => Self::Store(err),
            WardrobeServiceError::Recommendation(err) => Self::Recommendation(err),
            WardrobeServiceError::EmptyWardrobe => Self::EmptyWardrobe,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let payload = match &self {
            AppError::Recommendation(err) => json!({
                "error": err.to_string(),
                "suggestion": err.suggestion(),
            }),
            AppError::Store(StoreError::NotFound) => json!({ "error": "Garment not found" }),
            _ => json!({ "error": self.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "wardrobe request failed");
        }
        (status, Json(payload)).into_response()
    }
}
