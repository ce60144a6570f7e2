// src/detect/mod.rs
// =============================================================================
// Pure text analysis used to grade submissions.
//
// Submodules:
// - media: finds images and videos embedded in comment or MR text
// - references: finds `#123`-style issue references
//
// Nothing in here does I/O. Absent or empty text simply yields no matches.
// =============================================================================

mod media;
mod references;

pub use media::detect_media;
pub use references::detect_issue_references;
