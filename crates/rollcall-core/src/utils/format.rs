use std::cmp::Ordering;

/// Compare two strings the way a user expects a sorted list to read:
/// case-insensitive first, then case-sensitive so the order stays total.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Trimmed, case-insensitive equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// `part / whole` as a percentage rounded to one decimal. Zero when `whole` is 0.
pub fn round_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Format a rate for display, e.g. "87.5%"
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
