// src/gitlab/types.rs
// =============================================================================
// GitLab API response shapes and their conversion to forge records.
//
// Every field GitLab may leave out is optional or defaulted, so an odd record
// degrades to fallbacks instead of failing the whole page.
// =============================================================================

use serde::Deserialize;

use crate::forge::{Issue, MergeRequest, Note, Project};

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabUser {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabNamespace {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    pub id: Option<u64>,
    #[serde(default)]
    pub path_with_namespace: String,
    pub owner: Option<GitLabUser>,
    pub namespace: Option<GitLabNamespace>,
    pub creator: Option<GitLabUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabIssue {
    pub iid: u64,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub author: Option<GitLabUser>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabNote {
    pub id: u64,
    pub body: Option<String>,
    pub author: Option<GitLabUser>,
    #[serde(default)]
    pub system: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitLabMergeRequest {
    pub iid: u64,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub source_project_id: Option<u64>,
    pub target_project_id: Option<u64>,
    pub created_at: Option<String>,
}

fn username(user: Option<GitLabUser>) -> Option<String> {
    user.and_then(|u| u.username)
}

impl From<GitLabProject> for Project {
    fn from(p: GitLabProject) -> Self {
        Project {
            id: p.id,
            path: p.path_with_namespace,
            owner: username(p.owner),
            namespace: p.namespace.and_then(|n| n.name),
            creator: username(p.creator),
        }
    }
}

impl From<GitLabIssue> for Issue {
    fn from(i: GitLabIssue) -> Self {
        Issue {
            number: i.iid,
            title: i.title,
            description: i.description,
            author: username(i.author),
            created_at: i.created_at,
        }
    }
}

impl From<GitLabNote> for Note {
    fn from(n: GitLabNote) -> Self {
        Note {
            id: n.id,
            body: n.body,
            author: username(n.author),
            system: n.system,
            created_at: n.created_at,
        }
    }
}

impl From<GitLabMergeRequest> for MergeRequest {
    fn from(mr: GitLabMergeRequest) -> Self {
        MergeRequest {
            number: mr.iid,
            title: mr.title,
            description: mr.description,
            source_project_id: mr.source_project_id,
            target_project_id: mr.target_project_id,
            created_at: mr.created_at,
        }
    }
}
