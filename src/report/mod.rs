// src/report/mod.rs
// =============================================================================
// Presentation of the final submission list.
//
// Submodules:
// - group: project/student grouping and the grouping key
// - links: web URLs and titles for each submission
// - text: the human-readable report
// - json: machine-readable output (--json)
//
// Everything writes to an `io::Write`, so the CLI passes stdout and tests
// pass a Vec<u8>.
// =============================================================================

mod group;
mod json;
mod links;
mod text;

pub use json::write_json;
pub use text::{write_text, ReportContext};
