//! Shared helper functions for SQLite repositories.

/// Escape character used with `LIKE ... ESCAPE`.
pub const LIKE_ESCAPE: char = '\\';

/// Build a `LIKE` pattern matching `fragment` anywhere in the column.
///
/// `%`, `_` and the escape character itself are escaped so user input is
/// matched literally. SQLite's `LIKE` is case-insensitive for ASCII.
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
