// src/submission/mod.rs
// =============================================================================
// The submission pipeline: turning forks, issues, comments and merge requests
// into graded submission records.
//
// Submodules:
// - model: the Submission record and its variants
// - validate: attachment / issue-reference rules that decide validity
// - extract: walks a master project's forks and emits submissions
// =============================================================================

mod extract;
mod model;
mod validate;

pub use extract::{extract_submissions, ExtractOptions, ForkScan, MasterProject};
pub use model::{Attribution, CommentId, Placement, Submission, SubmissionKind};
