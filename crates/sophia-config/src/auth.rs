//! Password hashing and session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The placeholder secret shipped with the application. Running with it is
/// allowed but warned about.
pub const DEFAULT_SECRET_KEY: &str = "a-super-secret-key-you-should-change";

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

const fn default_pbkdf2_iterations() -> u32 {
    600_000
}

const fn default_session_ttl_hours() -> u64 {
    24
}

const fn default_remember_me_ttl_days() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Key for session token digests. Also read from the legacy `SECRET_KEY`.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Lifetime of a normal login session.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,

    /// Lifetime of a `--remember-me` login session.
    #[serde(default = "default_remember_me_ttl_days")]
    pub remember_me_ttl_days: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            session_ttl_hours: default_session_ttl_hours(),
            remember_me_ttl_days: default_remember_me_ttl_days(),
        }
    }
}

impl AuthConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key.is_empty() || self.secret_key == DEFAULT_SECRET_KEY
    }

    pub const fn session_ttl(&self, remember_me: bool) -> Duration {
        if remember_me {
            Duration::from_secs(self.remember_me_ttl_days * 24 * 3600)
        } else {
            Duration::from_secs(self.session_ttl_hours * 3600)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AuthConfig::default();
        assert!(config.uses_default_secret());
        assert_eq!(config.pbkdf2_iterations, 600_000);
        assert_eq!(config.session_ttl(false), Duration::from_secs(24 * 3600));
        assert_eq!(config.session_ttl(true), Duration::from_secs(30 * 24 * 3600));
    }

    #[test]
    fn custom_secret_is_not_default() {
        let config = AuthConfig {
            secret_key: "hunter2-but-longer".into(),
            ..Default::default()
        };
        assert!(!config.uses_default_secret());
    }
}
