// src/submission/validate.rs
// =============================================================================
// Grading rules.
//
// COMMENT:
//   valid iff the comment text carries a media attachment.
//   Reasons: "Has attachment" / "Missing attachment", then the referenced
//   issues (informational), then the issue it was posted on (informational).
//
// PULL_REQUEST:
//   valid iff the description has a media attachment AND references at least
//   one issue. Both checks are always reported.
// =============================================================================

use super::model::{Submission, SubmissionKind, Validity};
use crate::detect::{detect_issue_references, detect_media};

const HAS_ATTACHMENT: &str = "Has attachment";
const MISSING_ATTACHMENT: &str = "Missing attachment";
const NO_ISSUE_REFERENCES: &str = "No issue references";

pub fn assess(kind: &SubmissionKind) -> Validity {
    match kind {
        SubmissionKind::Comment {
            issue_number,
            comment_text,
            ..
        } => {
            let text = comment_text.as_deref();
            let (has_media, _) = detect_media(text);
            let (has_refs, refs) = detect_issue_references(text);

            let mut reasons = vec![attachment_reason(has_media)];
            if has_refs {
                reasons.push(references_reason(&refs));
            }
            reasons.push(format!("Linked to issue #{issue_number}"));

            Validity {
                is_valid: has_media,
                validity_reasons: reasons,
            }
        }
        SubmissionKind::PullRequest { pr_description, .. } => {
            let text = pr_description.as_deref();
            let (has_media, _) = detect_media(text);
            let (has_refs, refs) = detect_issue_references(text);

            let refs_reason = if has_refs {
                references_reason(&refs)
            } else {
                NO_ISSUE_REFERENCES.to_string()
            };

            Validity {
                is_valid: has_media && has_refs,
                validity_reasons: vec![attachment_reason(has_media), refs_reason],
            }
        }
    }
}

fn attachment_reason(has_media: bool) -> String {
    let reason = if has_media { HAS_ATTACHMENT } else { MISSING_ATTACHMENT };
    reason.to_string()
}

fn references_reason(refs: &[u64]) -> String {
    let list: Vec<String> = refs.iter().map(|n| format!("#{n}")).collect();
    format!("References issues: {}", list.join(", "))
}

impl Submission {
    /// Runs the grading rules and records the outcome.
    pub fn validated(mut self) -> Self {
        self.validity = assess(&self.kind);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::model::CommentId;
    use rstest::rstest;

    fn comment(text: Option<&str>) -> SubmissionKind {
        SubmissionKind::Comment {
            issue_number: 4,
            issue_title: "Add a screenshot".into(),
            comment_id: CommentId::Note(99),
            comment_text: text.map(str::to_string),
        }
    }

    fn pull_request(description: &str) -> SubmissionKind {
        SubmissionKind::PullRequest {
            pr_number: 2,
            pr_title: "Feature".into(),
            pr_description: Some(description.to_string()),
        }
    }

    #[test]
    fn test_comment_with_attachment_is_valid() {
        let v = assess(&comment(Some("done ![demo](/uploads/a/demo.gif)")));
        assert!(v.is_valid);
        assert_eq!(v.status(), "VALID");
        assert_eq!(v.validity_reasons, vec!["Has attachment", "Linked to issue #4"]);
    }

    #[test]
    fn test_comment_without_attachment_is_invalid() {
        let v = assess(&comment(Some("finished, see #2 and #3")));
        assert!(!v.is_valid);
        assert_eq!(v.status(), "INVALID");
        assert_eq!(
            v.validity_reasons,
            vec![
                "Missing attachment",
                "References issues: #2, #3",
                "Linked to issue #4"
            ]
        );

        let empty = assess(&comment(None));
        assert!(!empty.is_valid);
        assert!(empty.validity_reasons.contains(&"Missing attachment".to_string()));
    }

    #[rstest]
    #[case("closes #1 ![shot](shot.png)", true, "Has attachment", "References issues: #1")]
    #[case("closes #1", false, "Missing attachment", "References issues: #1")]
    #[case("https://x.io/demo.mp4", false, "Has attachment", "No issue references")]
    #[case("nothing here", false, "Missing attachment", "No issue references")]
    fn test_pull_request_truth_table(
        #[case] description: &str,
        #[case] valid: bool,
        #[case] media_reason: &str,
        #[case] refs_reason: &str,
    ) {
        let v = assess(&pull_request(description));
        assert_eq!(v.is_valid, valid);
        assert_eq!(v.validity_reasons, vec![media_reason, refs_reason]);
    }
}
