//! Location registration and nearest-store lookup handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use coffeedrop_core::{geo, merge_opening_hours};
use coffeedrop_db::{LocationWithTimes, NewOpeningTime};

use crate::middleware::RequestId;

use super::{map_db_error, AppState, LegacyError};

#[derive(Debug, Deserialize)]
pub(super) struct CreateLocationRequest {
    pub postcode: String,
    #[serde(default)]
    pub opening_times: HashMap<String, String>,
    #[serde(default)]
    pub closing_times: HashMap<String, String>,
}

/// A ranked location: the stored row plus its distance from the queried
/// postcode in miles.
#[derive(Debug, Serialize)]
pub(super) struct NearestLocation {
    #[serde(flatten)]
    pub location: LocationWithTimes,
    pub distance: f64,
}

/// POST /CreateNewLocation — register a store with its weekly schedule.
pub(super) async fn create_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationWithTimes>), LegacyError> {
    if body.opening_times.is_empty() || body.closing_times.is_empty() {
        return Err(LegacyError::bad_request(
            "Please provide opening and closing times.",
        ));
    }

    if !state.postcodes.is_valid(&body.postcode).await {
        return Err(LegacyError::bad_request("The postcode is not valid."));
    }

    // Schedule errors are 400s and must surface before geocoding or any
    // database write.
    let merged = merge_opening_hours(&body.opening_times, &body.closing_times)
        .map_err(|e| LegacyError::bad_request(e.to_string()))?;
    let times: Vec<NewOpeningTime> = merged
        .into_iter()
        .map(|(day, hours)| NewOpeningTime {
            day,
            open_time: hours.open,
            close_time: hours.close,
        })
        .collect();

    let coordinate = match state.postcodes.lookup(&body.postcode).await {
        Ok(coord) => coord,
        Err(e) => {
            tracing::error!(request_id = %req_id.0, postcode = %body.postcode, error = %e, "geocoding failed");
            return Err(LegacyError::server_error(
                "We couldn't check the postcode. Please try again.",
            ));
        }
    };

    let created = coffeedrop_db::create_location_with_times(
        &state.pool,
        &body.postcode,
        Some(coordinate),
        &times,
    )
    .await
    .map_err(|e| {
        if e.is_unique_violation() {
            LegacyError::bad_request("The postcode is already registered.")
        } else {
            map_db_error(&req_id.0, &e)
        }
    })?;

    tracing::info!(
        request_id = %req_id.0,
        location_id = created.location.id,
        postcode = %created.location.postcode,
        "registered new location"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /GetNearestLocation/{postcode} — nearest store by great-circle
/// distance.
///
/// Legacy contract: validation and geocoding failures answer HTTP 200 with
/// a `{"statusCode": 400, "error": …}` body; only genuine server faults use
/// a real error status.
pub(super) async fn get_nearest_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(postcode): Path<String>,
) -> Result<Response, LegacyError> {
    if !state.postcodes.is_valid(&postcode).await {
        return Ok(legacy_ok_error("Please provide a valid postcode!"));
    }

    let origin = match state.postcodes.lookup(&postcode).await {
        Ok(coord) => coord,
        Err(e) => {
            tracing::error!(request_id = %req_id.0, postcode = %postcode, error = %e, "geocoding failed");
            return Ok(legacy_ok_error(
                "We couldn't process your query. Please try again.",
            ));
        }
    };

    let locations = coffeedrop_db::list_geocoded_locations(&state.pool)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    let candidates = locations
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.location.coordinate().map(|coord| (index, coord)));

    let nearest = geo::nearest(origin, candidates).map(|(index, distance)| NearestLocation {
        location: locations[index].clone(),
        distance,
    });

    // `null` body when no geocoded locations exist, matching the legacy
    // first-or-null response.
    Ok(Json(nearest).into_response())
}

fn legacy_ok_error(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(LegacyError::bad_request(message)),
    )
        .into_response()
}
