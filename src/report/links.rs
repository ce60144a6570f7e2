// src/report/links.rs
// =============================================================================
// Web links and one-line titles for submissions.
//
//   GitLab: <web>/<repo>/-/issues/<n>#note_<id>, <web>/<repo>/-/merge_requests/<n>
//   GitHub: <web>/<repo>/issues/<n>#issuecomment-<id>, <web>/<repo>/pull/<n>
// =============================================================================

use crate::forge::Provider;
use crate::submission::{CommentId, Submission, SubmissionKind};

pub fn submission_url(provider: Provider, web_base: &str, submission: &Submission) -> String {
    let web_base = web_base.trim_end_matches('/');
    let repository = &submission.repository;

    match (&submission.kind, provider) {
        (
            SubmissionKind::Comment {
                issue_number,
                comment_id,
                ..
            },
            Provider::Gitlab,
        ) => match comment_id {
            CommentId::Note(id) => {
                format!("{web_base}/{repository}/-/issues/{issue_number}#note_{id}")
            }
            CommentId::Description => format!("{web_base}/{repository}/-/issues/{issue_number}"),
        },
        (
            SubmissionKind::Comment {
                issue_number,
                comment_id,
                ..
            },
            Provider::Github,
        ) => match comment_id {
            CommentId::Note(id) => {
                format!("{web_base}/{repository}/issues/{issue_number}#issuecomment-{id}")
            }
            CommentId::Description => format!("{web_base}/{repository}/issues/{issue_number}"),
        },
        (SubmissionKind::PullRequest { pr_number, .. }, Provider::Gitlab) => {
            format!("{web_base}/{repository}/-/merge_requests/{pr_number}")
        }
        (SubmissionKind::PullRequest { pr_number, .. }, Provider::Github) => {
            format!("{web_base}/{repository}/pull/{pr_number}")
        }
    }
}

pub fn submission_title(provider: Provider, submission: &Submission) -> String {
    match &submission.kind {
        SubmissionKind::Comment {
            issue_number,
            issue_title,
            ..
        } => format!("#{issue_number} - {}", or_unknown(issue_title)),
        SubmissionKind::PullRequest {
            pr_number,
            pr_title,
            ..
        } => match provider {
            Provider::Gitlab => format!("MR !{pr_number} - {}", or_unknown(pr_title)),
            Provider::Github => format!("PR #{pr_number} - {}", or_unknown(pr_title)),
        },
    }
}

fn or_unknown(title: &str) -> &str {
    if title.trim().is_empty() {
        "Unknown"
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::{Issue, MergeRequest};
    use crate::submission::{Attribution, Placement};

    fn who() -> Attribution {
        Attribution {
            student: "alice".into(),
            owner_name: "alice".into(),
            repo_name: "chatbox".into(),
        }
    }

    fn note_comment() -> Submission {
        let issue = Issue {
            number: 4,
            title: "Start a chat".into(),
            ..Issue::default()
        };
        Submission::comment(
            &who(),
            Placement::fork("alice/chatbox"),
            &issue,
            CommentId::Note(77),
            None,
            None,
        )
    }

    #[test]
    fn test_gitlab_urls() {
        assert_eq!(
            submission_url(Provider::Gitlab, "https://gitlab.com/", &note_comment()),
            "https://gitlab.com/alice/chatbox/-/issues/4#note_77"
        );

        let mr = MergeRequest {
            number: 2,
            ..MergeRequest::default()
        };
        let s = Submission::pull_request(
            &who(),
            Placement::master("codepath/chatbox", "alice/chatbox"),
            &mr,
        );
        assert_eq!(
            submission_url(Provider::Gitlab, "https://gitlab.com", &s),
            "https://gitlab.com/codepath/chatbox/-/merge_requests/2"
        );
    }

    #[test]
    fn test_github_urls_and_titles() {
        let s = note_comment();
        assert_eq!(
            submission_url(Provider::Github, "https://github.com", &s),
            "https://github.com/alice/chatbox/issues/4#issuecomment-77"
        );
        assert_eq!(submission_title(Provider::Github, &s), "#4 - Start a chat");

        let mr = MergeRequest {
            number: 8,
            ..MergeRequest::default()
        };
        let pr = Submission::pull_request(&who(), Placement::fork("alice/chatbox"), &mr);
        assert_eq!(submission_title(Provider::Github, &pr), "PR #8 - Unknown");
        assert_eq!(submission_title(Provider::Gitlab, &pr), "MR !8 - Unknown");
    }
}
