//! Plain-text layout helpers for the views.
//!
//! Views build their output as `Vec<String>` lines; these helpers handle
//! width-aware padding, truncation and simple boxes. Everything is
//! character-count based — the dataset is Latin text, so no grapheme
//! clustering is needed here.

pub const BOX_H: char = '─';
pub const BOX_V: char = '│';
pub const BOX_TL: char = '┌';
pub const BOX_TR: char = '┐';
pub const BOX_BL: char = '└';
pub const BOX_BR: char = '┘';

/// Pad `text` with spaces on the right to exactly `width` characters,
/// truncating when it is too long.
pub fn pad_right(text: &str, width: usize) -> String {
    let truncated = truncate_chars(text, width);
    let len = truncated.chars().count();
    let mut out = truncated;
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

/// Truncate to at most `width` characters, marking the cut with an ellipsis
/// when anything was dropped.
pub fn truncate_chars(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// A horizontal rule of `width` characters.
pub fn rule(width: usize) -> String {
    std::iter::repeat(BOX_H).take(width).collect()
}

/// Wrap `text` into lines of at most `width` characters, breaking on
/// spaces where possible.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 {
            if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if word_len > width {
            // A single overlong word is hard-broken.
            let mut chars = word.chars().peekable();
            while chars.peek().is_some() {
                let chunk: String = chars.by_ref().take(width).collect();
                let chunk_len = chunk.chars().count();
                if chunk_len == width {
                    lines.push(chunk);
                } else {
                    current = chunk;
                    current_len = chunk_len;
                }
            }
        } else {
            current = word.to_string();
            current_len = word_len;
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Draw a box of `width` characters around `lines`, with an optional title
/// in the top border.
pub fn panel(title: Option<&str>, lines: &[String], width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4);
    let mut out = Vec::with_capacity(lines.len() + 2);

    let top = match title {
        Some(t) => {
            let t = truncate_chars(t, inner);
            let used = t.chars().count() + 4; // corners + spaces around title
            format!(
                "{}{} {} {}{}",
                BOX_TL,
                BOX_H,
                t,
                rule(width.saturating_sub(used + 1)),
                BOX_TR
            )
        }
        None => format!("{}{}{}", BOX_TL, rule(width.saturating_sub(2)), BOX_TR),
    };
    out.push(top);

    for line in lines {
        out.push(format!("{} {} {}", BOX_V, pad_right(line, inner), BOX_V));
    }

    out.push(format!("{}{}{}", BOX_BL, rule(width.saturating_sub(2)), BOX_BR));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- pad_right / truncate ---

    #[test]
    fn pad_right_pads_short_text() {
        assert_eq!(pad_right("abc", 6), "abc   ");
    }

    #[test]
    fn pad_right_truncates_long_text() {
        let out = pad_right("abcdefgh", 5);
        assert_eq!(out.chars().count(), 5);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("abc", 5), "abc");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("Perícia", 10), "Perícia");
        let out = truncate_chars("Sobrevivência", 6);
        assert_eq!(out.chars().count(), 6);
    }

    #[test]
    fn truncate_zero_width_is_empty() {
        assert_eq!(truncate_chars("abc", 0), "");
    }

    // --- rule ---

    #[test]
    fn rule_has_requested_width() {
        assert_eq!(rule(4).chars().count(), 4);
        assert_eq!(rule(0), "");
    }

    // --- wrap ---

    #[test]
    fn wrap_breaks_on_spaces() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("short", 20), vec!["short"]);
    }

    #[test]
    fn wrap_hard_breaks_overlong_words() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_zero_width_is_empty() {
        assert!(wrap("anything", 0).is_empty());
    }

    #[test]
    fn wrap_never_exceeds_width() {
        let text = "Finding what was hidden: clues, documents, people.";
        for line in wrap(text, 12) {
            assert!(line.chars().count() <= 12, "line too long: {:?}", line);
        }
    }

    // --- panel ---

    #[test]
    fn panel_boxes_lines() {
        let lines = vec!["hello".to_string()];
        let out = panel(None, &lines, 12);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].chars().count(), 12);
        assert_eq!(out[1].chars().count(), 12);
        assert_eq!(out[2].chars().count(), 12);
        assert!(out[1].contains("hello"));
    }

    #[test]
    fn panel_embeds_title() {
        let out = panel(Some("DOSSIER"), &[], 24);
        assert!(out[0].contains("DOSSIER"));
        assert_eq!(out[0].chars().count(), 24);
    }
}
