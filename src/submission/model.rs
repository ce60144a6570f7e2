// src/submission/model.rs
// =============================================================================
// A submission is one unit of student activity: an issue comment or a merge
// request, together with where it lives and whether it meets the grading
// requirements.
//
// The type-specific fields live in `SubmissionKind`, so a record can never
// carry both comment and merge request fields. `is_codepath_submission` is
// not stored at all; it is computed from `repo_type`.
//
// Records are built once during extraction. Validity is only ever filled in
// by the validation pass (see validate.rs).
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;

use crate::forge::{Issue, MergeRequest};

// Where the activity was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoType {
    /// In the student's own fork
    StudentFork,
    /// In the shared master repository
    CodepathRepo,
}

// Identifies a comment: a note id, or the issue description itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentId {
    Note(u64),
    Description,
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Note(id) => write!(f, "{id}"),
            CommentId::Description => f.write_str("description"),
        }
    }
}

impl Serialize for CommentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CommentId::Note(id) => serializer.serialize_u64(*id),
            CommentId::Description => serializer.serialize_str("description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "submission_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionKind {
    Comment {
        issue_number: u64,
        issue_title: String,
        comment_id: CommentId,
        comment_text: Option<String>,
    },
    PullRequest {
        pr_number: u64,
        pr_title: String,
        pr_description: Option<String>,
    },
}

impl SubmissionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            SubmissionKind::Comment { .. } => "COMMENT",
            SubmissionKind::PullRequest { .. } => "PULL_REQUEST",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub is_valid: bool,
    pub validity_reasons: Vec<String>,
}

impl Validity {
    pub fn status(&self) -> &'static str {
        if self.is_valid {
            "VALID"
        } else {
            "INVALID"
        }
    }
}

// Where a submission is recorded vs. where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub repository: String,
    pub source_repository: String,
    pub repo_type: RepoType,
}

impl Placement {
    /// Activity inside the student's fork
    pub fn fork(fork_path: &str) -> Self {
        Self {
            repository: fork_path.to_string(),
            source_repository: fork_path.to_string(),
            repo_type: RepoType::StudentFork,
        }
    }

    /// Activity recorded in the master repository
    ///
    /// `source_path` is the fork for merge requests and the master path for
    /// comments made directly on master issues.
    pub fn master(master_path: &str, source_path: &str) -> Self {
        Self {
            repository: master_path.to_string(),
            source_repository: source_path.to_string(),
            repo_type: RepoType::CodepathRepo,
        }
    }
}

// Who a submission belongs to; shared by every record of one fork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub student: String,
    pub owner_name: String,
    /// Last path segment of the master project
    pub repo_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub student: String,
    pub repository: String,
    pub source_repository: String,
    pub repo_name: String,
    pub owner_name: String,
    #[serde(flatten)]
    pub kind: SubmissionKind,
    pub submission_date: Option<String>,
    pub repo_type: RepoType,
    #[serde(flatten)]
    pub(super) validity: Validity,
    pub addressed_issues: Vec<String>,
}

impl Submission {
    fn new(
        who: &Attribution,
        placement: Placement,
        kind: SubmissionKind,
        submission_date: Option<String>,
    ) -> Self {
        Self {
            student: who.student.clone(),
            repository: placement.repository,
            source_repository: placement.source_repository,
            repo_name: who.repo_name.clone(),
            owner_name: who.owner_name.clone(),
            kind,
            submission_date,
            repo_type: placement.repo_type,
            validity: Validity::default(),
            addressed_issues: Vec::new(),
        }
    }

    /// A comment on an issue (a note, or the issue description)
    pub fn comment(
        who: &Attribution,
        placement: Placement,
        issue: &Issue,
        comment_id: CommentId,
        text: Option<&str>,
        date: Option<&str>,
    ) -> Self {
        let kind = SubmissionKind::Comment {
            issue_number: issue.number,
            issue_title: issue.title.clone(),
            comment_id,
            comment_text: text.map(str::to_string),
        };
        Self::new(who, placement, kind, date.map(str::to_string))
    }

    pub fn pull_request(who: &Attribution, placement: Placement, mr: &MergeRequest) -> Self {
        let kind = SubmissionKind::PullRequest {
            pr_number: mr.number,
            pr_title: mr.title.clone(),
            pr_description: mr.description.clone(),
        };
        Self::new(who, placement, kind, mr.created_at.clone())
    }

    pub fn is_codepath_submission(&self) -> bool {
        self.repo_type == RepoType::CodepathRepo
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity.is_valid
    }

    pub fn validity_status(&self) -> &'static str {
        self.validity.status()
    }

    pub fn submission_type(&self) -> &'static str {
        self.kind.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn who() -> Attribution {
        Attribution {
            student: "alice".into(),
            owner_name: "alice".into(),
            repo_name: "chatbox".into(),
        }
    }

    #[test]
    fn test_codepath_flag_follows_repo_type() {
        let mr = MergeRequest {
            number: 3,
            title: "Add login".into(),
            ..MergeRequest::default()
        };
        let own = Submission::pull_request(&who(), Placement::fork("alice/chatbox"), &mr);
        assert!(!own.is_codepath_submission());

        let to_master = Submission::pull_request(
            &who(),
            Placement::master("codepath/chatbox", "alice/chatbox"),
            &mr,
        );
        assert!(to_master.is_codepath_submission());
        assert_eq!(to_master.repository, "codepath/chatbox");
        assert_eq!(to_master.source_repository, "alice/chatbox");
    }

    #[test]
    fn test_serializes_flat_record() {
        let issue = Issue {
            number: 1,
            title: "Start a chat".into(),
            ..Issue::default()
        };
        let s = Submission::comment(
            &who(),
            Placement::fork("alice/chatbox"),
            &issue,
            CommentId::Description,
            Some("body"),
            Some("2025-09-28T22:45:28Z"),
        );

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["submission_type"], "COMMENT");
        assert_eq!(json["comment_id"], "description");
        assert_eq!(json["issue_number"], 1);
        assert_eq!(json["repo_type"], "student_fork");
        assert_eq!(json["is_valid"], false);
        assert!(json.get("pr_number").is_none());
    }
}
