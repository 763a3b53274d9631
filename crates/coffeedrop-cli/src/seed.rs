//! `seed` command: import locations from the legacy CSV export.
//!
//! CSV layout (after the header row): `postcode`, then Monday–Sunday
//! opening times in columns 1–7 and Monday–Sunday closing times in columns
//! 8–14. Days with an empty opening or closing cell are skipped for that
//! location. Postcodes that fail geocoding are stored without coordinates,
//! matching the legacy seeder.

use std::path::Path;

use thiserror::Error;

use coffeedrop_core::schedule::Day;
use coffeedrop_db::{NewOpeningTime, SeedLocation};
use coffeedrop_postcodes::PostcodesClient;

const COLUMNS: usize = 15;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("line {line}: expected {COLUMNS} columns, got {got}")]
    BadColumnCount { line: usize, got: usize },
    #[error("line {line}: empty postcode")]
    EmptyPostcode { line: usize },
}

/// A CSV row parsed into a postcode and its per-day schedule, before
/// geocoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLocation {
    pub postcode: String,
    pub times: Vec<(Day, String, String)>,
}

/// Parses the CSV body, skipping the header row and blank lines.
///
/// # Errors
///
/// Returns [`SeedError`] on a malformed row; the import is all-or-nothing
/// at the parse stage so a truncated file is caught before any geocoding.
pub fn parse_csv(contents: &str) -> Result<Vec<CsvLocation>, SeedError> {
    let mut rows = Vec::new();

    for (index, raw) in contents.lines().enumerate().skip(1) {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if fields.len() != COLUMNS {
            return Err(SeedError::BadColumnCount {
                line,
                got: fields.len(),
            });
        }

        let postcode = fields[0];
        if postcode.is_empty() {
            return Err(SeedError::EmptyPostcode { line });
        }

        // Opening columns 1-7, closing columns 8-14, both Monday-first.
        let times = Day::ALL
            .iter()
            .enumerate()
            .filter_map(|(i, day)| {
                let open = fields[1 + i];
                let close = fields[8 + i];
                if open.is_empty() || close.is_empty() {
                    None
                } else {
                    Some((*day, open.to_owned(), close.to_owned()))
                }
            })
            .collect();

        rows.push(CsvLocation {
            postcode: postcode.to_owned(),
            times,
        });
    }

    Ok(rows)
}

/// Geocodes a parsed row and converts it into a [`SeedLocation`].
async fn geocode_row(client: &PostcodesClient, row: CsvLocation) -> SeedLocation {
    let coordinate = match client.lookup(&row.postcode).await {
        Ok(coord) => Some(coord),
        Err(e) => {
            tracing::warn!(postcode = %row.postcode, error = %e, "geocoding failed; seeding without coordinates");
            None
        }
    };

    SeedLocation {
        postcode: row.postcode,
        coordinate,
        times: row
            .times
            .into_iter()
            .map(|(day, open_time, close_time)| NewOpeningTime {
                day,
                open_time,
                close_time,
            })
            .collect(),
    }
}

/// Runs the full import: parse, geocode, insert.
pub async fn run(file: &Path) -> anyhow::Result<()> {
    let config = coffeedrop_core::load_app_config()?;
    let pool_config = coffeedrop_db::PoolConfig::from_app_config(&config);
    let pool = coffeedrop_db::connect_pool(&config.database_url, pool_config).await?;
    coffeedrop_db::run_migrations(&pool).await?;

    let client = PostcodesClient::new(&config.postcodes_endpoint, config.postcodes_timeout_secs)?;

    let contents = std::fs::read_to_string(file)?;
    let rows = parse_csv(&contents)?;
    tracing::info!(count = rows.len(), file = %file.display(), "parsed seed file");

    let mut seeds = Vec::with_capacity(rows.len());
    for row in rows {
        seeds.push(geocode_row(&client, row).await);
    }

    let (inserted, skipped) = coffeedrop_db::seed_locations(&pool, &seeds).await?;
    tracing::info!(inserted, skipped, "seed complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "postcode,mon_open,tue_open,wed_open,thu_open,fri_open,sat_open,sun_open,mon_close,tue_close,wed_close,thu_close,fri_close,sat_close,sun_close";

    #[test]
    fn parses_full_week_row() {
        let csv = format!(
            "{HEADER}\nN77TJ,09:00,09:00,09:00,09:00,09:00,10:00,10:00,17:00,17:00,17:00,17:00,17:00,16:00,16:00"
        );
        let rows = parse_csv(&csv).expect("parse");

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.postcode, "N77TJ");
        assert_eq!(row.times.len(), 7);
        assert_eq!(row.times[0], (Day::Mon, "09:00".to_owned(), "17:00".to_owned()));
        assert_eq!(row.times[6], (Day::Sun, "10:00".to_owned(), "16:00".to_owned()));
    }

    #[test]
    fn skips_days_with_missing_times() {
        // Saturday has no closing time, Sunday no opening time: both dropped.
        let csv = format!(
            "{HEADER}\nN77TJ,09:00,09:00,09:00,09:00,09:00,10:00,,17:00,17:00,17:00,17:00,17:00,,16:00"
        );
        let rows = parse_csv(&csv).expect("parse");

        let days: Vec<Day> = rows[0].times.iter().map(|(day, _, _)| *day).collect();
        assert_eq!(days, [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri]);
    }

    #[test]
    fn skips_header_and_blank_lines() {
        let csv = format!(
            "{HEADER}\n\nN77TJ,09:00,,,,,,,17:00,,,,,,\n"
        );
        let rows = parse_csv(&csv).expect("parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].times.len(), 1);
    }

    #[test]
    fn rejects_short_rows() {
        let csv = format!("{HEADER}\nN77TJ,09:00,17:00");
        let err = parse_csv(&csv).expect_err("should fail");
        assert!(matches!(err, SeedError::BadColumnCount { line: 2, got: 3 }));
    }

    #[test]
    fn rejects_empty_postcode() {
        let csv = format!("{HEADER}\n,09:00,,,,,,,17:00,,,,,,");
        let err = parse_csv(&csv).expect_err("should fail");
        assert!(matches!(err, SeedError::EmptyPostcode { line: 2 }));
    }
}
