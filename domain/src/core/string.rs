//! String helpers for log lines and console output.

/// Shorten `s` to at most `max_chars` characters, marking the cut with `…`.
///
/// Counts characters rather than bytes, so Korean or emoji text is never
/// split mid-character.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}
