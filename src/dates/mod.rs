// src/dates/mod.rs
// =============================================================================
// Date handling for submissions.
//
// Submodules:
// - parse: understands the two date shapes the APIs hand us
// - filter: inclusive start/end filtering on the calendar date
// - summary: per-student earliest/latest/count
// =============================================================================

mod filter;
mod parse;
mod summary;

pub use filter::filter_by_date;
pub use summary::summarize;
