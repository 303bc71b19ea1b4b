//! Read-only HTTP API.
//!
//! - `GET /puzzle/today`  today's puzzle via the fallback chain
//! - `GET /puzzle/{date}` the puzzle stored for `YYYY-MM-DD`
//!
//! Both return the projected record (`id` and `grid`); the solution is never
//! served.

use crate::core::query::PuzzleQueryService;
use crate::domain::model::PuzzleView;
use crate::domain::ports::{Clock, PuzzleStore};
use crate::utils::error::JumbleError;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono_tz::Tz;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiState<S: PuzzleStore> {
    service: Arc<PuzzleQueryService<S>>,
    clock: Arc<dyn Clock>,
    zone: Tz,
}

impl<S: PuzzleStore> ApiState<S> {
    pub fn new(service: PuzzleQueryService<S>, clock: Arc<dyn Clock>, zone: Tz) -> Self {
        Self {
            service: Arc::new(service),
            clock,
            zone,
        }
    }
}

impl<S: PuzzleStore> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            clock: Arc::clone(&self.clock),
            zone: self.zone,
        }
    }
}

pub struct ApiError(JumbleError);

impl From<JumbleError> for ApiError {
    fn from(err: JumbleError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            JumbleError::NotFoundError { id } => {
                tracing::debug!("Puzzle not found: {}", id);
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
            }
            err => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

async fn get_today<S: PuzzleStore + 'static>(
    State(state): State<ApiState<S>>,
) -> Result<Json<PuzzleView>, ApiError> {
    let now = state.clock.now();
    let view = state.service.today_view(state.zone, now).await?;
    Ok(Json(view))
}

async fn get_by_date<S: PuzzleStore + 'static>(
    State(state): State<ApiState<S>>,
    Path(date): Path<String>,
) -> Result<Json<PuzzleView>, ApiError> {
    let view = state.service.date_view(&date).await?;
    Ok(Json(view))
}

/// `*` in `allowed_origins` allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

pub fn build_router<S: PuzzleStore + 'static>(
    state: ApiState<S>,
    allowed_origins: &[String],
) -> Router {
    // `/puzzle/today` is a static segment, so it wins over `/puzzle/:date`
    Router::new()
        .route("/puzzle/today", get(get_today::<S>))
        .route("/puzzle/:date", get(get_by_date::<S>))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
