//! Free-text normalization applied before storage and comparison.

/// Normalize free text: drop every character that is neither alphanumeric
/// nor whitespace, collapse whitespace runs to one space, trim, lowercase.
///
/// Whitespace-only input yields an empty string; callers treat that as a
/// missing value.
pub fn sanitize(input: &str) -> String {
    // Lowercasing first: some uppercase letters lower to a letter plus a
    // combining mark, which the filter must see.
    let kept: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize and reject the empty result.
pub fn sanitize_non_empty(input: &str) -> Option<String> {
    let sanitized = sanitize(input);
    (!sanitized.is_empty()).then_some(sanitized)
}
