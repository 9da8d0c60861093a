//! Table formatting utilities for CLI output.

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use mymovies_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Year part of a `YYYY-MM-DD` release date, or "----" when unknown.
pub fn release_year(date: &str) -> &str {
    match date.get(..4) {
        Some(year) if year.chars().all(|c| c.is_ascii_digit()) => year,
        _ => "----",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_string("教父續集完整版", 6), "教父續...");
        assert_eq!(truncate_string("教父", 6), "教父");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(&142), "-"), "142");
        assert_eq!(format_optional::<u32>(None, "-"), "-");
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year("1972-03-14"), "1972");
        assert_eq!(release_year(""), "----");
        assert_eq!(release_year("TBA"), "----");
    }
}
