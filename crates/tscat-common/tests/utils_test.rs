//! Property tests for the display helpers.

use proptest::prelude::*;
use tscat_common::{escape_for_display, format_percent, truncate_string};
use unicode_segmentation::UnicodeSegmentation;

#[test]
fn test_truncate_keeps_combining_marks_together() {
    // "e" + combining acute counts as one grapheme
    let text = "e\u{301}e\u{301}e\u{301}";
    assert_eq!(truncate_string(text, 3), text);
    assert_eq!(truncate_string(text, 2), "e\u{301}…");
}

proptest! {
    #[test]
    fn prop_truncation_respects_width(text in "\\PC*", max in 0usize..80) {
        let truncated = truncate_string(&text, max);
        prop_assert!(truncated.graphemes(true).count() <= max);
        if text.graphemes(true).count() <= max {
            prop_assert_eq!(truncated, text);
        } else if max > 0 {
            prop_assert!(truncated.ends_with('…'));
        }
    }

    #[test]
    fn prop_escaped_text_is_one_line(text in any::<String>()) {
        let escaped = escape_for_display(&text);
        prop_assert!(!escaped.chars().any(char::is_control));
    }

    #[test]
    fn prop_percent_within_bounds(total in 1usize..10_000, part_seed in any::<usize>()) {
        let part = part_seed % (total + 1);
        let formatted = format_percent(part, total);
        let value: f64 = formatted.trim_end_matches('%').parse().unwrap();
        prop_assert!((0.0..=100.0).contains(&value));
    }
}
