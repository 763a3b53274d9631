mod cashback;
mod locations;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use coffeedrop_postcodes::PostcodesClient;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub postcodes: PostcodesClient,
}

/// Legacy error body: `{"statusCode": N, "error": "..."}`. The HTTP status
/// mirrors `statusCode` except on the nearest-location route, which always
/// answers 200 (preserved legacy inconsistency — see `locations.rs`).
#[derive(Debug, Serialize)]
pub struct LegacyError {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub error: String,
}

impl LegacyError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            error: message.into(),
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            error: message.into(),
        }
    }
}

impl IntoResponse for LegacyError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: &str, error: &coffeedrop_db::DbError) -> LegacyError {
    tracing::error!(request_id, error = %error, "database query failed");
    LegacyError::server_error("Something went wrong. Please try again.")
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/CreateNewLocation", post(locations::create_location))
        .route(
            "/GetNearestLocation/{postcode}",
            get(locations::get_nearest_location),
        )
        .route("/CalculateCashback", post(cashback::calculate_cashback))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match coffeedrop_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
