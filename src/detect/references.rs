// src/detect/references.rs
// =============================================================================
// Detects issue cross-references such as "fixes #3" in free text.
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

fn issue_reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#(\d+)").expect("issue reference pattern is valid"))
}

// Returns every `#<digits>` occurrence as a number, in order of appearance.
// Duplicates are kept. Numbers too large for u64 are ignored.
pub fn detect_issue_references(text: Option<&str>) -> (bool, Vec<u64>) {
    let Some(text) = text else {
        return (false, Vec::new());
    };

    let numbers: Vec<u64> = issue_reference_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|digits| digits.as_str().parse().ok())
        .collect();

    (!numbers.is_empty(), numbers)
}
