//! Char/byte/column conversions for editor text.

use unicode_width::UnicodeWidthChar;

/// Byte offset of the `n`th char; `s.len()` when `n` is past the end.
pub fn char_to_byte_index(s: &str, n: usize) -> usize {
    match s.char_indices().nth(n) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

/// Longest prefix of `s` that fits in `width` terminal columns, with `…`
/// appended when something was cut.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Split `s` into rows of at most `width` columns, breaking between chars.
/// Always yields at least one row; a zero width leaves `s` whole.
pub fn wrap_to_width(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        row.push(c);
        used += w;
    }
    rows.push(row);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_index_past_end_is_len() {
        assert_eq!(char_to_byte_index("a🎯b", 2), 5);
        assert_eq!(char_to_byte_index("ab", 9), 2);
    }

    #[test]
    fn truncation_respects_wide_chars() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("🎯🎯🎯", 4), "🎯…");
    }

    #[test]
    fn wrapping_breaks_at_width() {
        assert_eq!(wrap_to_width("", 4), [""]);
        assert_eq!(wrap_to_width("abcd", 4), ["abcd"]);
        assert_eq!(wrap_to_width("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert_eq!(wrap_to_width("a🎯🎯", 4), ["a🎯", "🎯"]);
    }
}
