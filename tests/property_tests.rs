//! Property-based tests for pagination, path handling and validation

use postfeed::backend::attachments::{is_safe_relative_path, normalize_path, sanitize_file_name};
use postfeed::backend::store::page_offset;
use postfeed::shared::validation::{normalize_email, validate_post_fields};
use postfeed::shared::PostsPage;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_pages_tile_the_feed(page in 1u32..10_000, size in 1u32..100) {
        let start = page_offset(page, size);
        let next = page_offset(page + 1, size);
        prop_assert_eq!(next - start, u64::from(size));
        prop_assert_eq!(start % u64::from(size), 0);
    }

    #[test]
    fn test_page_count_covers_every_item(total in 0u64..100_000, size in 1u32..100) {
        let page = PostsPage { posts: Vec::new(), total_items: total };
        let pages = page.page_count(size);
        prop_assert!(pages * u64::from(size) >= total);
        if total > 0 {
            prop_assert!((pages - 1) * u64::from(size) < total);
        }
    }

    #[test]
    fn test_normalized_paths_have_no_backslash(path in ".*") {
        let normalized = normalize_path(&path);
        prop_assert!(!normalized.contains('\\'));
        prop_assert_eq!(normalized.len(), path.len());
    }

    #[test]
    fn test_sanitized_names_are_single_safe_components(name in ".*") {
        let sanitized = sanitize_file_name(&name);
        prop_assert!(!sanitized.is_empty());
        prop_assert!(!sanitized.contains('/'));
        prop_assert!(!sanitized.contains('\\'));
        let joined = format!("images/{}", sanitized);
        prop_assert!(is_safe_relative_path(&joined));
    }

    #[test]
    fn test_normalize_email_is_idempotent(email in ".*") {
        let once = normalize_email(&email);
        prop_assert_eq!(normalize_email(&once), once.clone());
    }

    #[test]
    fn test_whitespace_titles_are_rejected(title in "[ \t\n]*", content in "[a-z]{1,20}") {
        prop_assert!(validate_post_fields(&title, &content).is_err());
    }
}
