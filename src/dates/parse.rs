// src/dates/parse.rs
// =============================================================================
// Parses submission dates.
//
// Accepted shapes:
//   2023-12-01T10:30:00Z          (Z is read as +00:00)
//   2023-12-01T10:30:00.123+02:00
//   2025-10-13T14:10:42           (no offset)
//   2023-12-01
//
// The calendar day is taken in the date's own offset, so
// "2023-12-01T23:59:00-05:00" is still December 1st.
// =============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTime {
    /// Point in time used for ordering (UTC when an offset was given)
    pub instant: NaiveDateTime,
    /// Calendar day as written, used for filtering and display
    pub day: NaiveDate,
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn parse_submission_date(raw: &str) -> Option<SubmissionTime> {
    let raw = raw.trim();

    if raw.contains('T') {
        let normalized = raw.replace('Z', "+00:00");
        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
            return Some(SubmissionTime {
                instant: dt.naive_utc(),
                day: dt.date_naive(),
            });
        }
        return NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|instant| SubmissionTime {
                instant,
                day: instant.date(),
            });
    }

    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(SubmissionTime {
        instant: day.and_hms_opt(0, 0, 0)?,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_iso_with_z() {
        let t = parse_submission_date("2023-12-01T23:59:00Z").unwrap();
        assert_eq!(t.day, day("2023-12-01"));
        assert_eq!(t.instant.to_string(), "2023-12-01 23:59:00");
    }

    #[test]
    fn test_parse_iso_keeps_own_calendar_day() {
        let t = parse_submission_date("2023-12-01T23:30:00.000-05:00").unwrap();
        assert_eq!(t.day, day("2023-12-01"));
        assert_eq!(t.instant.date(), day("2023-12-02"));
    }

    #[test]
    fn test_parse_naive_iso_and_plain_date() {
        let t = parse_submission_date("2025-10-13T14:10:42").unwrap();
        assert_eq!(t.day, day("2025-10-13"));

        let t = parse_submission_date("2023-01-05").unwrap();
        assert_eq!(t.day, day("2023-01-05"));
        assert_eq!(t.instant, day("2023-01-05").and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_submission_date("yesterday").is_none());
        assert!(parse_submission_date("2023-13-01").is_none());
        assert!(parse_submission_date("Tuesday").is_none());
        assert!(parse_submission_date("").is_none());
    }
}
