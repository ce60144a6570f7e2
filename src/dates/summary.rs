// src/dates/summary.rs
// =============================================================================
// Per-student activity window: earliest and latest submission plus a count.
//
// Submissions without a readable date are left out. Ties keep the first
// submission seen, since the running min/max only move on a strict
// improvement.
// =============================================================================

use std::collections::BTreeMap;

use super::parse::{parse_submission_date, SubmissionTime};
use crate::submission::Submission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub earliest: SubmissionTime,
    pub latest: SubmissionTime,
    pub count: usize,
}

pub fn summarize(submissions: &[Submission]) -> BTreeMap<String, DateRange> {
    let mut ranges: BTreeMap<String, DateRange> = BTreeMap::new();

    for submission in submissions {
        let Some(time) = submission
            .submission_date
            .as_deref()
            .and_then(parse_submission_date)
        else {
            continue;
        };

        let range = ranges
            .entry(submission.student.clone())
            .or_insert(DateRange {
                earliest: time,
                latest: time,
                count: 0,
            });

        range.count += 1;
        if time.instant < range.earliest.instant {
            range.earliest = time;
        }
        if time.instant > range.latest.instant {
            range.latest = time;
        }
    }

    ranges
}
