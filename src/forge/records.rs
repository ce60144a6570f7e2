// src/forge/records.rs
// =============================================================================
// Platform-neutral records produced by the adapters.
//
// Only the fields the submission pipeline reads are kept. Anything a
// platform may omit is an Option, and fallbacks are applied here rather than
// in each adapter.
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    /// Only open issues / merge requests
    Open,
    /// Open, closed and merged
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub id: Option<u64>,
    /// Full path, e.g. "alice/chatbox"
    pub path: String,
    pub owner: Option<String>,
    pub namespace: Option<String>,
    pub creator: Option<String>,
}

impl Project {
    // Attributes the project to a username
    //
    // Fallback order: owner username, namespace name, creator username,
    // first segment of the path, then "unknown".
    pub fn resolve_owner(&self) -> String {
        [&self.owner, &self.namespace, &self.creator]
            .into_iter()
            .flatten()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| path_prefix(&self.path))
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Last path segment, e.g. "chatbox" for "alice/chatbox"
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

fn path_prefix(path: &str) -> Option<String> {
    let (prefix, _) = path.split_once('/')?;
    (!prefix.is_empty()).then(|| prefix.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issue {
    /// Per-project number (GitLab iid, GitHub number)
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub id: u64,
    pub body: Option<String>,
    pub author: Option<String>,
    /// Platform-generated notes ("changed the description", ...)
    pub system: bool,
    pub created_at: Option<String>,
}

impl Note {
    pub fn is_authored_by(&self, username: &str) -> bool {
        same_user(self.author.as_deref(), username)
    }
}

impl Issue {
    pub fn is_authored_by(&self, username: &str) -> bool {
        same_user(self.author.as_deref(), username)
    }
}

fn same_user(author: Option<&str>, username: &str) -> bool {
    author.is_some_and(|author| author.to_lowercase() == username.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRequest {
    /// Per-project number (GitLab iid, GitHub number)
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub source_project_id: Option<u64>,
    pub target_project_id: Option<u64>,
    pub created_at: Option<String>,
}
