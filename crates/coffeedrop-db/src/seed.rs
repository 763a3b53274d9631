//! Batch import of locations from the legacy CSV export.

use sqlx::PgPool;

use coffeedrop_core::geo::Coordinate;

use crate::locations::NewOpeningTime;
use crate::DbError;

/// One parsed CSV row, ready to insert. Coordinates are `None` when
/// geocoding failed for the postcode; the row is still stored (legacy
/// seeder behavior) and simply never ranks in nearest-location queries.
#[derive(Debug, Clone)]
pub struct SeedLocation {
    pub postcode: String,
    pub coordinate: Option<Coordinate>,
    pub times: Vec<NewOpeningTime>,
}

/// Inserts seed locations, skipping postcodes that already exist.
///
/// Returns `(inserted, skipped)`. Each location and its opening times are
/// written in their own transaction so one bad row does not abort the rest
/// of the import.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if an insert fails for a reason other than a
/// duplicate postcode.
pub async fn seed_locations(
    pool: &PgPool,
    rows: &[SeedLocation],
) -> Result<(usize, usize), DbError> {
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    for row in rows {
        match crate::locations::create_location_with_times(
            pool,
            &row.postcode,
            row.coordinate,
            &row.times,
        )
        .await
        {
            Ok(_) => inserted += 1,
            Err(e) if e.is_unique_violation() => skipped += 1,
            Err(e) => return Err(e),
        }
    }

    Ok((inserted, skipped))
}
