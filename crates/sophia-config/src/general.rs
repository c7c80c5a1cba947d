//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for snippet listings.
const fn default_per_page() -> u32 {
    10
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size for `snippet list`.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.per_page, 10);
        assert_eq!(config.default_limit, 20);
    }
}
