// src/forge/mod.rs
// =============================================================================
// The seam between the hosting platforms and the submission pipeline.
//
// Each platform adapter (gitlab/, github/) maps its own JSON shapes onto the
// platform-neutral records defined in `records` and implements `ForgeSource`.
// The extractor only ever talks to this trait, so it can be tested with an
// in-memory source and no network.
// =============================================================================

mod provider;
mod records;

pub use provider::Provider;
pub use records::{Issue, ItemState, MergeRequest, Note, Project};

use async_trait::async_trait;

use crate::api::ApiError;

// Everything the extractor needs from a hosting platform
//
// Listing methods never fail: the adapters log errors and return whatever
// was fetched (possibly nothing). Only looking up a single project by path
// reports an error, because a missing master project is fatal.
#[async_trait]
pub trait ForgeSource: Send + Sync {
    fn provider(&self) -> Provider;

    async fn project(&self, path: &str) -> Result<Project, ApiError>;

    async fn forks(&self, project: &Project) -> Vec<Project>;

    async fn issues(&self, project: &Project, state: ItemState) -> Vec<Issue>;

    async fn issue_notes(&self, project: &Project, issue: &Issue) -> Vec<Note>;

    async fn merge_requests(&self, project: &Project, state: ItemState) -> Vec<MergeRequest>;
}
