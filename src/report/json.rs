// src/report/json.rs
// =============================================================================
// JSON output for --json.
//
// The derived fields (is_codepath_submission, validity_status) are computed
// at serialization time; they are never stored on the record.
// =============================================================================

use serde::Serialize;
use std::io::Write;

use crate::submission::Submission;

#[derive(Serialize)]
struct SubmissionView<'a> {
    #[serde(flatten)]
    submission: &'a Submission,
    is_codepath_submission: bool,
    validity_status: &'static str,
}

#[derive(Serialize)]
struct Report<'a> {
    success: bool,
    count: usize,
    submissions: Vec<SubmissionView<'a>>,
}

pub fn write_json<W: Write>(out: &mut W, submissions: &[Submission]) -> anyhow::Result<()> {
    let report = Report {
        success: true,
        count: submissions.len(),
        submissions: submissions
            .iter()
            .map(|submission| SubmissionView {
                submission,
                is_codepath_submission: submission.is_codepath_submission(),
                validity_status: submission.validity_status(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::MergeRequest;
    use crate::submission::{Attribution, Placement};

    #[test]
    fn test_json_includes_derived_fields() {
        let who = Attribution {
            student: "alice".into(),
            owner_name: "alice".into(),
            repo_name: "chatbox".into(),
        };
        let mr = MergeRequest {
            number: 9,
            title: "Feature".into(),
            description: Some("closes #2 ![d](d.mp4)".into()),
            ..MergeRequest::default()
        };
        let s = Submission::pull_request(
            &who,
            Placement::master("codepath/chatbox", "alice/chatbox"),
            &mr,
        )
        .validated();

        let mut out = Vec::new();
        write_json(&mut out, &[s]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["count"], 1);
        let first = &value["submissions"][0];
        assert_eq!(first["submission_type"], "PULL_REQUEST");
        assert_eq!(first["pr_number"], 9);
        assert_eq!(first["repo_type"], "codepath_repo");
        assert_eq!(first["is_codepath_submission"], true);
        assert_eq!(first["validity_status"], "VALID");
        assert_eq!(first["validity_reasons"][1], "References issues: #2");
    }
}
