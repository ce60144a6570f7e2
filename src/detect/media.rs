// src/detect/media.rs
// =============================================================================
// Detects media attachments (screenshots, screen recordings) in free text.
//
// Three rules are applied independently and their matches concatenated in
// this order:
//   1. Markdown images: ![alt](target), target captured whatever it is
//   2. Bare http(s) URLs ending in an image/video extension
//   3. Upload paths (/uploads/...) ending in an image/video extension
//
// A URL written as ![x](https://host/a.png) is therefore reported twice.
// That is intended: callers only care whether the list is non-empty.
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

// Extensions we accept as "media", matched case-insensitively
const MEDIA_EXTENSIONS: &str = "png|jpg|jpeg|gif|mp4|mov|webm|avi";

fn markdown_image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant, so failing to compile it is a programming error
    PATTERN.get_or_init(|| Regex::new(r"!\[.*?\]\((.*?)\)").expect("markdown image pattern is valid"))
}

fn direct_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r#"(?i)https?://[^\s<>"]+?\.(?:{MEDIA_EXTENSIONS})"#))
            .expect("direct media url pattern is valid")
    })
}

fn upload_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r#"(?i)/uploads/[^\s<>")\]]+?\.(?:{MEDIA_EXTENSIONS})"#))
            .expect("upload path pattern is valid")
    })
}

// Finds every media reference in the text
//
// Parameters:
//   text: comment body or MR description (None is treated like "")
//
// Returns: (has_media, urls) where has_media == !urls.is_empty()
//
// Example:
//   detect_media(Some("![x](a.png)")) -> (true, ["a.png"])
pub fn detect_media(text: Option<&str>) -> (bool, Vec<String>) {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return (false, Vec::new()),
    };

    let mut urls: Vec<String> = markdown_image_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|target| target.as_str().to_string())
        .collect();

    urls.extend(direct_url_pattern().find_iter(text).map(|m| m.as_str().to_string()));
    urls.extend(upload_path_pattern().find_iter(text).map(|m| m.as_str().to_string()));

    (!urls.is_empty(), urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_image_any_extension() {
        assert_eq!(detect_media(Some("![x](a.png)")), (true, vec!["a.png".to_string()]));

        let (has_media, urls) = detect_media(Some("![diagram](docs/flow.svg)"));
        assert!(has_media);
        assert_eq!(urls, vec!["docs/flow.svg"]);
    }

    #[test]
    fn test_bare_video_url() {
        assert_eq!(
            detect_media(Some("see https://x.com/v.mp4")),
            (true, vec!["https://x.com/v.mp4".to_string()])
        );
    }

    #[test]
    fn test_no_media() {
        assert_eq!(detect_media(Some("no media here")), (false, vec![]));
        assert_eq!(detect_media(Some("")), (false, vec![]));
        assert_eq!(detect_media(None), (false, vec![]));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let (has_media, urls) = detect_media(Some("demo: HTTPS://host.io/Clip.MOV"));
        assert!(has_media);
        assert_eq!(urls, vec!["HTTPS://host.io/Clip.MOV"]);
    }

    #[test]
    fn test_matches_are_not_deduplicated() {
        // Rule 1 captures the target, rule 2 sees the same absolute URL,
        // rule 3 sees its /uploads/ suffix.
        let text = "![shot](https://gitlab.com/group/proj/uploads/abc/shot.png)";
        let (has_media, urls) = detect_media(Some(text));
        assert!(has_media);
        assert_eq!(
            urls,
            vec![
                "https://gitlab.com/group/proj/uploads/abc/shot.png",
                "https://gitlab.com/group/proj/uploads/abc/shot.png",
                "/uploads/abc/shot.png",
            ]
        );
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let text = "https://a.io/1.gif then ![b](two.txt)";
        let (_, urls) = detect_media(Some(text));
        assert_eq!(urls, vec!["two.txt", "https://a.io/1.gif"]);
    }

    #[test]
    fn test_is_idempotent() {
        let text = "before ![a](/uploads/x/a.jpeg) after https://b.io/c.webm";
        assert_eq!(detect_media(Some(text)), detect_media(Some(text)));
        let (has_media, urls) = detect_media(Some(text));
        assert_eq!(has_media, !urls.is_empty());
    }
}
