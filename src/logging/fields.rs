//! Field helpers for structured logging

/// Truncate a prompt for a log preview (privacy-safe)
///
/// Returns `None` when previews are disabled (`limit` is `None`) or the
/// prompt is blank. Otherwise returns the first `limit` characters, cut on a
/// char boundary.
///
/// # Examples
///
/// ```
/// use plancraft::logging::truncate_prompt;
///
/// assert_eq!(truncate_prompt("Business name: Acme", None), None);
/// assert_eq!(truncate_prompt("Business name: Acme", Some(100)).as_deref(), Some("Business name: Acme"));
/// ```
pub fn truncate_prompt(prompt: &str, limit: Option<usize>) -> Option<String> {
    let limit = limit?;

    let prompt = prompt.trim();
    if prompt.is_empty() {
        return None;
    }

    Some(truncate_string(prompt, limit))
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
