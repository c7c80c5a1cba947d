//! Tag normalisation.
//!
//! Tags are entered (and suggested by the AI) as a comma-separated string.
//! They are stored normalised: trimmed, lowercase, de-duplicated, in first-seen
//! order.

/// Maximum length of the stored comma-joined tag string.
pub const MAX_TAGS_LEN: usize = 200;

/// Split a comma-separated tag string into normalised tags.
#[must_use]
pub fn normalize_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',') {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || tags.contains(&tag) {
            continue;
        }
        tags.push(tag);
    }
    tags
}

/// Join tags back into the stored comma-separated form.
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Parse a stored tag column. `None` and empty strings give no tags.
#[must_use]
pub fn parse_stored(stored: Option<&str>) -> Vec<String> {
    stored.map(normalize_tags).unwrap_or_default()
}
