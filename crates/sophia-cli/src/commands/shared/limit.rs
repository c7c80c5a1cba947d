/// Compute effective limit with precedence: local arg -> global flag -> fallback.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback).max(1)
}
