//! String utilities for the domain layer.
//!
//! Tool output and message excerpts are bounded in *characters*, so these
//! helpers never split a UTF-8 sequence.

/// Marker appended to tool output that exceeded its length cap
pub const TRUNCATION_MARKER: &str = "\n... [output truncated]";

/// Return the prefix of `s` containing at most `max_chars` characters.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Bound `s` to exactly `cap` characters when it is longer than `cap`.
///
/// The kept prefix is shortened so that prefix plus [`TRUNCATION_MARKER`]
/// is exactly `cap` characters. Text within the cap is returned unchanged.
pub fn truncate_output(s: &str, cap: usize) -> String {
    if s.chars().count() <= cap {
        return s.to_string();
    }
    let marker_len = TRUNCATION_MARKER.chars().count();
    if cap <= marker_len {
        return take_chars(s, cap).to_string();
    }
    let mut out = take_chars(s, cap - marker_len).to_string();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Short excerpt used in summaries: at most `max_chars` characters, with
/// `...` appended only when something was cut.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let head = take_chars(s, max_chars);
    if head.len() == s.len() {
        head.to_string()
    } else {
        format!("{}...", head)
    }
}
