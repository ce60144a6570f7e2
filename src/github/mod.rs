// src/github/mod.rs
// =============================================================================
// GitHub adapter (REST API v3).
//
// GitHub's vocabulary maps onto ours as:
// - issue comments -> notes (GitHub has no system comments)
// - pull requests  -> merge requests (source = head repo, target = base repo)
//
// The issues endpoint also returns pull requests; those are filtered out so
// they are only counted once, as merge requests.
//
// Authentication uses a bearer token. Pagination follows the `Link` header.
// =============================================================================

mod source;
mod types;

pub use source::GitHubSource;
