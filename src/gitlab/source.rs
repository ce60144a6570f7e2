// src/gitlab/source.rs
// =============================================================================
// ForgeSource for GitLab.
//
// Endpoints used:
//   GET /projects/:path                      (master project lookup)
//   GET /projects/:id/forks
//   GET /projects/:id/issues
//   GET /projects/:id/issues/:iid/notes
//   GET /projects/:id/merge_requests
//
// Project paths are URL-encoded ("group/repo" -> "group%2Frepo").
// =============================================================================

use async_trait::async_trait;
use reqwest::header::HeaderName;
use url::form_urlencoded;

use super::types::{GitLabIssue, GitLabMergeRequest, GitLabNote, GitLabProject};
use crate::api::{ApiClient, ApiError, PageScheme};
use crate::forge::{ForgeSource, Issue, ItemState, MergeRequest, Note, Project, Provider};

pub struct GitLabSource {
    api: ApiClient,
}

impl GitLabSource {
    // Parameters:
    //   base_url: instance URL, e.g. "https://gitlab.com"
    //   token: personal access token with read_api scope (optional)
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ApiError> {
        let api_base = format!("{}/api/v4", base_url.trim_end_matches('/'));
        let auth = token.map(|t| (HeaderName::from_static("private-token"), t.to_string()));
        Ok(Self {
            api: ApiClient::new(&api_base, auth, PageScheme::NextPageHeader)?,
        })
    }
}

fn encode_path(path: &str) -> String {
    form_urlencoded::byte_serialize(path.as_bytes()).collect()
}

// Prefer the numeric id; fall back to the encoded path
fn project_ref(project: &Project) -> String {
    match project.id {
        Some(id) => id.to_string(),
        None => encode_path(&project.path),
    }
}

fn issue_state(state: ItemState) -> &'static [(&'static str, &'static str)] {
    match state {
        ItemState::Open => &[("state", "opened")],
        ItemState::All => &[],
    }
}

fn merge_request_state(state: ItemState) -> &'static [(&'static str, &'static str)] {
    match state {
        ItemState::Open => &[("state", "opened")],
        ItemState::All => &[("state", "all")],
    }
}

#[async_trait]
impl ForgeSource for GitLabSource {
    fn provider(&self) -> Provider {
        Provider::Gitlab
    }

    async fn project(&self, path: &str) -> Result<Project, ApiError> {
        let raw: GitLabProject = self
            .api
            .get_json(&format!("projects/{}", encode_path(path)))
            .await?;
        Ok(raw.into())
    }

    async fn forks(&self, project: &Project) -> Vec<Project> {
        self.api
            .collect_all::<GitLabProject>(&format!("projects/{}/forks", project_ref(project)), &[])
            .await
            .into_iter()
            .map(Project::from)
            .collect()
    }

    async fn issues(&self, project: &Project, state: ItemState) -> Vec<Issue> {
        self.api
            .collect_all::<GitLabIssue>(
                &format!("projects/{}/issues", project_ref(project)),
                issue_state(state),
            )
            .await
            .into_iter()
            .map(Issue::from)
            .collect()
    }

    async fn issue_notes(&self, project: &Project, issue: &Issue) -> Vec<Note> {
        self.api
            .collect_all::<GitLabNote>(
                &format!(
                    "projects/{}/issues/{}/notes",
                    project_ref(project),
                    issue.number
                ),
                &[],
            )
            .await
            .into_iter()
            .map(Note::from)
            .collect()
    }

    async fn merge_requests(&self, project: &Project, state: ItemState) -> Vec<MergeRequest> {
        self.api
            .collect_all::<GitLabMergeRequest>(
                &format!("projects/{}/merge_requests", project_ref(project)),
                merge_request_state(state),
            )
            .await
            .into_iter()
            .map(MergeRequest::from)
            .collect()
    }
}
