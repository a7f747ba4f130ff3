//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with an ellipsis if it exceeds `max_width` columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Keeps the end of `text` that fits in `max_width` columns.
///
/// Used for single-line inputs so the cursor end stays visible.
pub fn tail_to_width(text: &str, max_width: usize) -> &str {
    if text.width() <= max_width {
        return text;
    }
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// Drops control characters (newlines, escapes) from typed or pasted text.
pub fn sanitize_single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_with_ellipsis("Ana", 10), "Ana");
        assert_eq!(truncate_with_ellipsis("Anastasia", 5), "Anas…");
        assert_eq!(truncate_with_ellipsis("Anastasia", 1), "…");
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("heavy legs", 20), "heavy legs");
        assert_eq!(tail_to_width("heavy legs", 4), "legs");
        assert_eq!(tail_to_width("日本語", 4), "本語");
    }

    #[test]
    fn test_sanitize_single_line() {
        assert_eq!(sanitize_single_line("a\tb\nc\u{1b}"), "a bc");
    }
}
