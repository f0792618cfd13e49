use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to `max_width` terminal columns, ending with "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Step `index` by `delta` around a ring of `len` items.
pub fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

pub fn performance_label(accuracy: u32) -> &'static str {
    match accuracy {
        90.. => "Master Navigator",
        70..=89 => "Seasoned Traveler",
        40..=69 => "Curious Wanderer",
        _ => "Novice Explorer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Peru", 10), "Peru");
        assert_eq!(truncate_string("United Kingdom", 9), "United...");
        assert_eq!(truncate_string("abc", 2), "..");
    }

    #[test]
    fn test_truncate_counts_display_width() {
        // Each CJK glyph is two columns wide
        assert_eq!(truncate_string("日本国の首都", 7), "日本...");
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, -1, 5), 4);
        assert_eq!(wrap_index(4, 1, 5), 0);
        assert_eq!(wrap_index(2, 1, 5), 3);
        assert_eq!(wrap_index(0, 1, 0), 0);
    }

    #[test]
    fn test_performance_label() {
        assert_eq!(performance_label(100), "Master Navigator");
        assert_eq!(performance_label(75), "Seasoned Traveler");
        assert_eq!(performance_label(40), "Curious Wanderer");
        assert_eq!(performance_label(0), "Novice Explorer");
    }
}
