// src/report/group.rs
// =============================================================================
// Groups submissions by project, then by student.
//
// Project key precedence:
//   1. last path segment of source_repository
//   2. last path segment of repository
//   3. repo_name
// A repository value without a '/' is not a path, so it falls through to
// repo_name.
//
// Projects and students come out sorted (BTreeMap). Within a student,
// submissions are sorted by the raw submission_date string, which orders
// correctly as long as every date uses the same ISO-8601 shape.
// =============================================================================

use std::collections::BTreeMap;

use crate::submission::Submission;

pub type Grouped<'a> = BTreeMap<String, BTreeMap<String, Vec<&'a Submission>>>;

pub fn project_key(submission: &Submission) -> String {
    let repo_full = if !submission.source_repository.is_empty() {
        submission.source_repository.as_str()
    } else {
        submission.repository.as_str()
    };

    match repo_full.rsplit_once('/') {
        Some((_, name)) => name.to_string(),
        None if !submission.repo_name.is_empty() => submission.repo_name.clone(),
        None => "unknown".to_string(),
    }
}

pub fn group_submissions(submissions: &[Submission]) -> Grouped<'_> {
    let mut grouped: Grouped<'_> = BTreeMap::new();

    for submission in submissions {
        grouped
            .entry(project_key(submission))
            .or_default()
            .entry(submission.student.clone())
            .or_default()
            .push(submission);
    }

    for students in grouped.values_mut() {
        for entries in students.values_mut() {
            entries.sort_by(|a, b| {
                let a = a.submission_date.as_deref().unwrap_or("");
                let b = b.submission_date.as_deref().unwrap_or("");
                a.cmp(b)
            });
        }
    }

    grouped
}
