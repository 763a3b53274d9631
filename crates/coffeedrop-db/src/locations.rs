//! Database operations for the `locations` and `opening_times` tables.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use coffeedrop_core::geo::Coordinate;
use coffeedrop_core::schedule::Day;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `locations` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub postcode: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl LocationRow {
    /// The location's coordinate, when both lat and lng are populated.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }),
            _ => None,
        }
    }
}

/// A row from the `opening_times` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OpeningTimeRow {
    pub id: i64,
    pub location_id: i64,
    pub day: String,
    pub open_time: String,
    pub close_time: String,
}

/// A location with its weekly opening times attached.
#[derive(Debug, Clone, Serialize)]
pub struct LocationWithTimes {
    #[serde(flatten)]
    pub location: LocationRow,
    pub opening_times: Vec<OpeningTimeRow>,
}

/// An opening-time entry to persist alongside a new location.
#[derive(Debug, Clone)]
pub struct NewOpeningTime {
    pub day: Day,
    pub open_time: String,
    pub close_time: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a location and its opening-time rows in a single transaction.
///
/// A failure anywhere rolls the whole batch back, so a location can never
/// exist without its schedule.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; a duplicate postcode
/// surfaces as a unique violation (see [`DbError::is_unique_violation`]).
pub async fn create_location_with_times(
    pool: &PgPool,
    postcode: &str,
    coordinate: Option<Coordinate>,
    times: &[NewOpeningTime],
) -> Result<LocationWithTimes, DbError> {
    let mut tx = pool.begin().await?;

    let location = sqlx::query_as::<_, LocationRow>(
        "INSERT INTO locations (postcode, lat, lng) \
         VALUES ($1, $2, $3) \
         RETURNING id, postcode, lat, lng, created_at",
    )
    .bind(postcode)
    .bind(coordinate.map(|c| c.lat))
    .bind(coordinate.map(|c| c.lng))
    .fetch_one(&mut *tx)
    .await?;

    let mut opening_times = Vec::with_capacity(times.len());
    for entry in times {
        let row = sqlx::query_as::<_, OpeningTimeRow>(
            "INSERT INTO opening_times (location_id, day, open_time, close_time) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, location_id, day, open_time, close_time",
        )
        .bind(location.id)
        .bind(entry.day.as_str())
        .bind(&entry.open_time)
        .bind(&entry.close_time)
        .fetch_one(&mut *tx)
        .await?;
        opening_times.push(row);
    }

    tx.commit().await?;

    Ok(LocationWithTimes {
        location,
        opening_times,
    })
}

/// Returns all locations with non-null coordinates, opening times attached,
/// ordered by id so distance ties resolve deterministically.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails.
pub async fn list_geocoded_locations(pool: &PgPool) -> Result<Vec<LocationWithTimes>, DbError> {
    let locations = sqlx::query_as::<_, LocationRow>(
        "SELECT id, postcode, lat, lng, created_at \
         FROM locations \
         WHERE lat IS NOT NULL AND lng IS NOT NULL \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    if locations.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = locations.iter().map(|l| l.id).collect();
    let times = sqlx::query_as::<_, OpeningTimeRow>(
        "SELECT id, location_id, day, open_time, close_time \
         FROM opening_times \
         WHERE location_id = ANY($1) \
         ORDER BY location_id, id",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut by_location: std::collections::HashMap<i64, Vec<OpeningTimeRow>> =
        std::collections::HashMap::new();
    for row in times {
        by_location.entry(row.location_id).or_default().push(row);
    }

    Ok(locations
        .into_iter()
        .map(|location| {
            let opening_times = by_location.remove(&location.id).unwrap_or_default();
            LocationWithTimes {
                location,
                opening_times,
            }
        })
        .collect())
}
