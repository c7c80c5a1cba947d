//! ID prefix constants.
//!
//! IDs are generated by the database as `{prefix}-{8 hex chars}`,
//! e.g. `snp-a3f8b2c1`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_SESSION: &str = "ses";
pub const PREFIX_COLLECTION: &str = "col";
pub const PREFIX_SNIPPET: &str = "snp";
pub const PREFIX_ACTIVITY: &str = "act";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_SESSION,
    PREFIX_COLLECTION,
    PREFIX_SNIPPET,
    PREFIX_ACTIVITY,
];

/// Check whether `id` looks like an ID with the given prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
