// src/github/source.rs
// =============================================================================
// ForgeSource for GitHub.
//
// Endpoints used:
//   GET /repos/:owner/:repo
//   GET /repos/:owner/:repo/forks
//   GET /repos/:owner/:repo/issues?state=open|all
//   GET /repos/:owner/:repo/issues/:number/comments
//   GET /repos/:owner/:repo/pulls?state=open|all
// =============================================================================

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use super::types::{GitHubComment, GitHubIssue, GitHubPull, GitHubRepo};
use crate::api::{ApiClient, ApiError, PageScheme};
use crate::forge::{ForgeSource, Issue, ItemState, MergeRequest, Note, Project, Provider};

pub struct GitHubSource {
    api: ApiClient,
}

impl GitHubSource {
    // Parameters:
    //   base_url: API root, "https://api.github.com" or
    //             "https://ghe.example.com/api/v3" for GitHub Enterprise
    //   token: personal access token (optional, but unauthenticated
    //          requests are heavily rate limited)
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ApiError> {
        let auth = token.map(|t| (AUTHORIZATION, format!("Bearer {t}")));
        Ok(Self {
            api: ApiClient::new(base_url, auth, PageScheme::LinkHeader)?,
        })
    }
}

fn state_param(state: ItemState) -> &'static [(&'static str, &'static str)] {
    match state {
        ItemState::Open => &[("state", "open")],
        ItemState::All => &[("state", "all")],
    }
}

#[async_trait]
impl ForgeSource for GitHubSource {
    fn provider(&self) -> Provider {
        Provider::Github
    }

    async fn project(&self, path: &str) -> Result<Project, ApiError> {
        let raw: GitHubRepo = self.api.get_json(&format!("repos/{path}")).await?;
        Ok(raw.into())
    }

    async fn forks(&self, project: &Project) -> Vec<Project> {
        self.api
            .collect_all::<GitHubRepo>(&format!("repos/{}/forks", project.path), &[])
            .await
            .into_iter()
            .map(Project::from)
            .collect()
    }

    async fn issues(&self, project: &Project, state: ItemState) -> Vec<Issue> {
        self.api
            .collect_all::<GitHubIssue>(&format!("repos/{}/issues", project.path), state_param(state))
            .await
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .map(Issue::from)
            .collect()
    }

    async fn issue_notes(&self, project: &Project, issue: &Issue) -> Vec<Note> {
        self.api
            .collect_all::<GitHubComment>(
                &format!("repos/{}/issues/{}/comments", project.path, issue.number),
                &[],
            )
            .await
            .into_iter()
            .map(Note::from)
            .collect()
    }

    async fn merge_requests(&self, project: &Project, state: ItemState) -> Vec<MergeRequest> {
        self.api
            .collect_all::<GitHubPull>(&format!("repos/{}/pulls", project.path), state_param(state))
            .await
            .into_iter()
            .map(MergeRequest::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo() -> Project {
        Project {
            id: Some(1),
            path: "codepath/puter".into(),
            ..Project::default()
        }
    }

    #[tokio::test]
    async fn test_issues_skip_pull_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/codepath/puter/issues"))
            .and(query_param("state", "all"))
            .and(header("authorization", "Bearer ghp-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "number": 1, "title": "Real issue", "user": { "login": "alice" } },
                { "number": 2, "title": "A PR", "pull_request": {} }
            ])))
            .mount(&server)
            .await;

        let source = GitHubSource::new(&server.uri(), Some("ghp-test")).unwrap();
        let issues = source.issues(&repo(), ItemState::All).await;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].author.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_forks_follow_link_header() {
        let server = MockServer::start().await;
        let next = format!(
            "<{}/repos/codepath/puter/forks?page=2>; rel=\"next\"",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/repos/codepath/puter/forks"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([
                        { "id": 5, "full_name": "alice/puter", "owner": { "login": "alice" } }
                    ]))
                    .insert_header("link", next.as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/codepath/puter/forks"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 6, "full_name": "bob/puter", "owner": { "login": "bob" } }
            ])))
            .mount(&server)
            .await;

        let source = GitHubSource::new(&server.uri(), None).unwrap();
        let forks = source.forks(&repo()).await;
        let owners: Vec<String> = forks.iter().map(Project::resolve_owner).collect();
        assert_eq!(owners, vec!["alice", "bob"]);
    }
}
