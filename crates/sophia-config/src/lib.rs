//! # sophia-config
//!
//! Layered configuration loading for Sophia using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SOPHIA_*` prefix, `__` as separator)
//! 2. Project-level `.sophia/config.toml`
//! 3. User-level `~/.config/sophia/config.toml`
//! 4. Built-in defaults
//!
//! The unprefixed legacy variables (`GEMINI_API_KEY`,
//! `SECRET_KEY`, `DATABASE_URL`) are honoured as a last resort: they fill
//! fields that no other source set.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SOPHIA_GEMINI__API_KEY` -> `gemini.api_key`,
//! `SOPHIA_GAMIFICATION__POINTS__SEARCH` -> `gamification.points.search`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sophia_config::SophiaConfig;
//!
//! let config = SophiaConfig::load_with_dotenv().expect("config");
//! if config.gemini.is_configured() {
//!     println!("model: {}", config.gemini.generation_model);
//! }
//! ```

mod auth;
mod database;
mod error;
mod gamification;
mod gemini;
mod general;

pub use auth::{AuthConfig, DEFAULT_SECRET_KEY};
pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use gamification::GamificationConfig;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SophiaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub gamification: GamificationConfig,
}

impl SophiaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config: Self = Self::figment().extract()?;
        config.apply_legacy_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".sophia/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SOPHIA_").split("__"))
    }

    /// Fill still-unset fields from the legacy variable names.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if self.gemini.api_key.is_empty()
            && let Some(key) = lookup("GEMINI_API_KEY")
        {
            self.gemini.api_key = key;
        }
        if self.auth.uses_default_secret()
            && let Some(secret) = lookup("SECRET_KEY")
        {
            self.auth.secret_key = secret;
        }
        if self.database.path.is_empty()
            && let Some(path) = lookup("DATABASE_URL").and_then(|u| DatabaseConfig::path_from_url(&u))
        {
            self.database.path = path;
        }
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.per_page == 0 {
            return Err(ConfigError::invalid("general.per_page", "must be at least 1"));
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::invalid(
                "general.default_limit",
                "must be at least 1",
            ));
        }
        if self.auth.pbkdf2_iterations == 0 {
            return Err(ConfigError::invalid(
                "auth.pbkdf2_iterations",
                "must be at least 1",
            ));
        }
        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::invalid("auth.secret_key", "must not be empty"));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "gemini.timeout_secs",
                "must be at least 1",
            ));
        }
        for badge in &self.gamification.badges {
            sophia_core::gamification::validate_badge(badge).map_err(|e| {
                ConfigError::invalid(&format!("gamification.badges[{}]", badge.slug), e.to_string())
            })?;
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sophia").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
