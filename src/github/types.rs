// src/github/types.rs
// =============================================================================
// GitHub API response shapes and their conversion to forge records.
// =============================================================================

use serde::Deserialize;

use crate::forge::{Issue, MergeRequest, Note, Project};

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub id: Option<u64>,
    #[serde(default)]
    pub full_name: String,
    pub owner: Option<GitHubUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub body: Option<String>,
    pub user: Option<GitHubUser>,
    pub created_at: Option<String>,
    /// Present when the "issue" is really a pull request
    pub pull_request: Option<serde_json::Value>,
}

impl GitHubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubComment {
    pub id: u64,
    pub body: Option<String>,
    pub user: Option<GitHubUser>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepoRef {
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubBranchRef {
    /// Null when the head repository has been deleted
    pub repo: Option<GitHubRepoRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPull {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub body: Option<String>,
    pub created_at: Option<String>,
    pub head: Option<GitHubBranchRef>,
    pub base: Option<GitHubBranchRef>,
}

fn login(user: Option<GitHubUser>) -> Option<String> {
    user.and_then(|u| u.login)
}

fn repo_id(branch: Option<GitHubBranchRef>) -> Option<u64> {
    branch.and_then(|b| b.repo).and_then(|r| r.id)
}

impl From<GitHubRepo> for Project {
    fn from(r: GitHubRepo) -> Self {
        Project {
            id: r.id,
            path: r.full_name,
            owner: login(r.owner),
            namespace: None,
            creator: None,
        }
    }
}

impl From<GitHubIssue> for Issue {
    fn from(i: GitHubIssue) -> Self {
        Issue {
            number: i.number,
            title: i.title,
            description: i.body,
            author: login(i.user),
            created_at: i.created_at,
        }
    }
}

impl From<GitHubComment> for Note {
    fn from(c: GitHubComment) -> Self {
        Note {
            id: c.id,
            body: c.body,
            author: login(c.user),
            system: false,
            created_at: c.created_at,
        }
    }
}

impl From<GitHubPull> for MergeRequest {
    fn from(p: GitHubPull) -> Self {
        MergeRequest {
            number: p.number,
            title: p.title,
            description: p.body,
            source_project_id: repo_id(p.head),
            target_project_id: repo_id(p.base),
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pull_maps_head_and_base_repos() {
        let raw: GitHubPull = serde_json::from_value(json!({
            "number": 8,
            "title": "added text file recording",
            "body": null,
            "created_at": "2025-10-13T14:10:42Z",
            "head": { "repo": { "id": 5 } },
            "base": { "repo": { "id": 1 } }
        }))
        .unwrap();

        let mr = MergeRequest::from(raw);
        assert_eq!(mr.source_project_id, Some(5));
        assert_eq!(mr.target_project_id, Some(1));
        assert!(mr.description.is_none());
    }

    #[test]
    fn test_deleted_head_repo() {
        let raw: GitHubPull = serde_json::from_value(json!({
            "number": 2,
            "title": "gone",
            "head": { "repo": null },
            "base": { "repo": { "id": 1 } }
        }))
        .unwrap();
        assert_eq!(MergeRequest::from(raw).source_project_id, None);
    }

    #[test]
    fn test_issue_that_is_a_pull_request() {
        let raw: GitHubIssue = serde_json::from_value(json!({
            "number": 3,
            "title": "PR in disguise",
            "pull_request": { "url": "https://api.github.com/repos/a/b/pulls/3" }
        }))
        .unwrap();
        assert!(raw.is_pull_request());
    }
}
