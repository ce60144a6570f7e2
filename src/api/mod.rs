// src/api/mod.rs
// =============================================================================
// The HTTP boundary: a small paginated JSON client shared by the GitLab and
// GitHub adapters.
//
// Submodules:
// - client: authenticated GET requests and page-by-page listing
// - error: typed errors with status-specific hints (401/403/404/other)
//
// No business logic lives here. Listing endpoints never fail outright: a
// failed page is logged and the caller gets whatever was collected so far.
// =============================================================================

mod client;
mod error;

pub use client::{log_api_error, ApiClient, PageScheme};
pub use error::ApiError;
