//! Small string transforms used by the dashboard cards and tables.
//!
//! All lengths are counted in characters, not bytes, so names with accents
//! or Devanagari never get split mid-character.

/// Suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Cuts `text` to `max_length` characters and appends `...` when it was longer.
///
/// ## Example
/// ```rust
/// use eduverse_core::text::truncate_text;
///
/// assert_eq!(truncate_text("Library Hours Extended", 7), "Library...");
/// assert_eq!(truncate_text("Short", 10), "Short");
/// ```
pub fn truncate_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}

/// Up to two upper-cased initials from the first letters of each word.
///
/// ## Example
/// ```rust
/// use eduverse_core::text::get_initials;
///
/// assert_eq!(get_initials("John Doe"), "JD");
/// assert_eq!(get_initials("Madonna"), "M");
/// assert_eq!(get_initials("Mary Jane Watson"), "MJ");
/// ```
pub fn get_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Data Structures", 4), "Data...");
        assert_eq!(truncate_text("Data", 4), "Data");
        assert_eq!(truncate_text("", 0), "");
        assert_eq!(truncate_text("abc", 0), "...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_text("नमस्ते दुनिया", 2), "नम...");
        assert_eq!(truncate_text("café au lait", 4), "café...");
    }

    #[test]
    fn test_get_initials() {
        assert_eq!(get_initials("John Doe"), "JD");
        assert_eq!(get_initials("madonna"), "M");
        assert_eq!(get_initials("  Dr.  Sarah   Johnson "), "DS");
        assert_eq!(get_initials(""), "");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("pENDING"), "Pending");
        assert_eq!(capitalize_first("a"), "A");
        assert_eq!(capitalize_first(""), "");
    }
}
