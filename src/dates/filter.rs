// src/dates/filter.rs
// =============================================================================
// Keeps submissions whose calendar date falls inside [start, end].
//
// Both bounds are inclusive and optional. Time of day is ignored. With no
// bounds at all the input comes back untouched, including records whose
// date is missing or unreadable. With a bound, such records are dropped and
// a warning is logged.
// =============================================================================

use chrono::NaiveDate;
use tracing::warn;

use super::parse::parse_submission_date;
use crate::submission::Submission;

pub fn filter_by_date(
    submissions: &[Submission],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Submission> {
    if start.is_none() && end.is_none() {
        return submissions.to_vec();
    }

    submissions
        .iter()
        .filter(|submission| {
            let Some(raw) = submission.submission_date.as_deref() else {
                warn!(student = %submission.student, "submission has no date, skipping");
                return false;
            };
            let Some(time) = parse_submission_date(raw) else {
                warn!(date = raw, "invalid date format for submission, skipping");
                return false;
            };

            start.map_or(true, |start| time.day >= start) && end.map_or(true, |end| time.day <= end)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::Issue;
    use crate::submission::{Attribution, CommentId, Placement};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dated(date: Option<&str>) -> Submission {
        let who = Attribution {
            student: "alice".into(),
            owner_name: "alice".into(),
            repo_name: "chatbox".into(),
        };
        Submission::comment(
            &who,
            Placement::fork("alice/chatbox"),
            &Issue::default(),
            CommentId::Note(1),
            None,
            date,
        )
        .validated()
    }

    #[test]
    fn test_inclusive_bounds_on_calendar_date() {
        let subs = vec![
            dated(Some("2023-11-30")),
            dated(Some("2023-12-01T23:59:00Z")),
            dated(Some("2023-12-31")),
            dated(Some("2024-01-01T00:00:00Z")),
        ];

        let kept = filter_by_date(&subs, Some(day("2023-12-01")), Some(day("2023-12-31")));
        let dates: Vec<_> = kept
            .iter()
            .map(|s| s.submission_date.as_deref().unwrap())
            .collect();
        assert_eq!(dates, vec!["2023-12-01T23:59:00Z", "2023-12-31"]);
    }

    #[test]
    fn test_single_bound() {
        let subs = vec![dated(Some("2023-11-30")), dated(Some("2023-12-02"))];
        assert_eq!(filter_by_date(&subs, Some(day("2023-12-01")), None).len(), 1);
        assert_eq!(filter_by_date(&subs, None, Some(day("2023-12-01"))).len(), 1);
    }

    #[test]
    fn test_no_bounds_is_identity() {
        let subs = vec![
            dated(Some("not a date")),
            dated(None),
            dated(Some("2023-12-02")),
        ];
        assert_eq!(filter_by_date(&subs, None, None), subs);
    }

    #[test]
    fn test_unparseable_dates_dropped_when_bounded() {
        let subs = vec![dated(Some("not a date")), dated(None), dated(Some("2023-12-02"))];
        let kept = filter_by_date(&subs, Some(day("2023-01-01")), None);
        assert_eq!(kept.len(), 1);
        // The source list is untouched
        assert_eq!(subs.len(), 3);
    }
}
