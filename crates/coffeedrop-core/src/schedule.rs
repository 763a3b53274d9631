//! Day-name mapping and opening-hours merging.
//!
//! Clients submit opening and closing times keyed by full English day names;
//! storage uses the three-letter codes from the `opening_times.day` enum.
//! [`merge_opening_hours`] folds the two maps into one record per day.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Day of the week, ordered Monday first to match the weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Three-letter code used in the database enum and API responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// Parses a full English day name, case-insensitively.
    ///
    /// The legacy lookup table was case-sensitive and carried one
    /// inconsistently capitalized key (`Sunday`); matching is normalized
    /// here so both spellings resolve.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownDay`] for anything that is not a
    /// full day name.
    pub fn parse_full_name(name: &str) -> Result<Self, ScheduleError> {
        match name.to_ascii_lowercase().as_str() {
            "monday" => Ok(Day::Mon),
            "tuesday" => Ok(Day::Tue),
            "wednesday" => Ok(Day::Wed),
            "thursday" => Ok(Day::Thu),
            "friday" => Ok(Day::Fri),
            "saturday" => Ok(Day::Sat),
            "sunday" => Ok(Day::Sun),
            _ => Err(ScheduleError::UnknownDay(name.to_owned())),
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ScheduleError;

    /// Parses the three-letter code (`"Mon"`), as stored in the database.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mon" => Ok(Day::Mon),
            "Tue" => Ok(Day::Tue),
            "Wed" => Ok(Day::Wed),
            "Thu" => Ok(Day::Thu),
            "Fri" => Ok(Day::Fri),
            "Sat" => Ok(Day::Sat),
            "Sun" => Ok(Day::Sun),
            _ => Err(ScheduleError::UnknownDay(s.to_owned())),
        }
    }
}

/// Opening and closing time for a single day. Times are opaque strings
/// (legacy contract, typically `"09:00"`); no format validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("unknown day name: '{0}'")]
    UnknownDay(String),

    /// A day appears in only one of the opening/closing maps. The legacy
    /// system silently stored partial rows; this rewrite rejects them.
    #[error("day '{day}' must appear in both opening and closing times")]
    MismatchedDays { day: Day },
}

/// Merges per-day opening and closing times into one [`DayHours`] per day.
///
/// Both maps are keyed by full day names; the result is keyed by [`Day`] in
/// weekday order.
///
/// # Errors
///
/// - [`ScheduleError::UnknownDay`] if any key is not a full day name.
/// - [`ScheduleError::MismatchedDays`] if the two maps do not cover the
///   same set of days.
pub fn merge_opening_hours<S: BuildHasher>(
    opening: &HashMap<String, String, S>,
    closing: &HashMap<String, String, S>,
) -> Result<BTreeMap<Day, DayHours>, ScheduleError> {
    let mut opens: BTreeMap<Day, &str> = BTreeMap::new();
    for (name, time) in opening {
        opens.insert(Day::parse_full_name(name)?, time.as_str());
    }

    let mut closes: BTreeMap<Day, &str> = BTreeMap::new();
    for (name, time) in closing {
        closes.insert(Day::parse_full_name(name)?, time.as_str());
    }

    if let Some(day) = opens.keys().find(|d| !closes.contains_key(d)) {
        return Err(ScheduleError::MismatchedDays { day: *day });
    }
    if let Some(day) = closes.keys().find(|d| !opens.contains_key(d)) {
        return Err(ScheduleError::MismatchedDays { day: *day });
    }

    Ok(opens
        .into_iter()
        .map(|(day, open)| {
            let close = closes[&day];
            (
                day,
                DayHours {
                    open: open.to_owned(),
                    close: close.to_owned(),
                },
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn merges_single_day_into_short_code() {
        let merged = merge_opening_hours(
            &map(&[("monday", "09:00")]),
            &map(&[("monday", "17:00")]),
        )
        .expect("merge");

        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[&Day::Mon],
            DayHours {
                open: "09:00".to_owned(),
                close: "17:00".to_owned(),
            }
        );
    }

    #[test]
    fn merges_full_week_in_weekday_order() {
        let names = [
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ];
        let opening = map(&names.map(|n| (n, "08:00")));
        let closing = map(&names.map(|n| (n, "18:00")));

        let merged = merge_opening_hours(&opening, &closing).expect("merge");
        let days: Vec<Day> = merged.keys().copied().collect();
        assert_eq!(days, Day::ALL);
    }

    #[test]
    fn day_names_match_case_insensitively() {
        // The legacy table only accepted capitalized 'Sunday'; both casings
        // must resolve here.
        let merged = merge_opening_hours(
            &map(&[("Sunday", "10:00")]),
            &map(&[("sunday", "16:00")]),
        )
        .expect("merge");
        assert!(merged.contains_key(&Day::Sun));
    }

    #[test]
    fn unknown_day_name_is_an_error() {
        let err = merge_opening_hours(&map(&[("funday", "09:00")]), &map(&[]))
            .expect_err("should reject unknown day");
        assert_eq!(err, ScheduleError::UnknownDay("funday".to_owned()));
    }

    #[test]
    fn opening_without_closing_is_rejected() {
        let err = merge_opening_hours(
            &map(&[("monday", "09:00"), ("tuesday", "09:00")]),
            &map(&[("monday", "17:00")]),
        )
        .expect_err("should reject mismatched day sets");
        assert_eq!(err, ScheduleError::MismatchedDays { day: Day::Tue });
    }

    #[test]
    fn closing_without_opening_is_rejected() {
        let err = merge_opening_hours(
            &map(&[("monday", "09:00")]),
            &map(&[("monday", "17:00"), ("friday", "17:00")]),
        )
        .expect_err("should reject mismatched day sets");
        assert_eq!(err, ScheduleError::MismatchedDays { day: Day::Fri });
    }

    #[test]
    fn short_code_round_trips_through_from_str() {
        for day in Day::ALL {
            assert_eq!(day.as_str().parse::<Day>(), Ok(day));
        }
    }
}
