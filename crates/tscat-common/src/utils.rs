//! Shared string utilities for terminal output.

use unicode_segmentation::UnicodeSegmentation;

/// Truncates a string to at most `max_graphemes` user-perceived characters,
/// ending with an ellipsis when anything was cut.
///
/// Works on grapheme clusters so right-to-left scripts and combining marks
/// are never split.
pub fn truncate_string(input: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = input.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return input.to_string();
    }
    if max_graphemes == 0 {
        return String::new();
    }

    let keep = max_graphemes.saturating_sub(1);
    let mut out: String = graphemes[..keep].concat();
    out.push('…');
    out
}

/// Makes line breaks and tabs visible so a message fits on one line.
pub fn escape_for_display(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Formats `part / total` as a percentage with one decimal.
///
/// An empty total counts as fully covered.
#[allow(clippy::cast_precision_loss)]
pub fn format_percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "100.0%".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}
