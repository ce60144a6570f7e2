// src/gitlab/mod.rs
// =============================================================================
// GitLab adapter (REST API v4).
//
// - types: the JSON shapes GitLab returns, only the fields we read
// - source: ForgeSource implementation on top of the shared API client
//
// Authentication uses the PRIVATE-TOKEN header. Pagination follows the
// `x-next-page` response header.
// =============================================================================

mod source;
mod types;

pub use source::GitLabSource;
