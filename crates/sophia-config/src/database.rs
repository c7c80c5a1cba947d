//! Local database configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Path value that selects an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file path. Empty means `<data_dir>/sophia/sophia.db`.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// The path to open, with the default location filled in.
    ///
    /// Returns `None` only when no explicit path is set and the platform has
    /// no data directory.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if self.path.is_empty() {
            dirs::data_dir().map(|d| d.join("sophia").join("sophia.db"))
        } else {
            Some(PathBuf::from(&self.path))
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Translate a `sqlite:` connection URL into a file path.
    ///
    /// `sqlite:///app.db` is relative, `sqlite:////var/app.db` is absolute,
    /// and a bare `sqlite://` is in-memory. Other schemes are not supported.
    pub fn path_from_url(url: &str) -> Option<String> {
        let url = url.trim();
        if url == "sqlite://" || url == "sqlite:///:memory:" {
            return Some(IN_MEMORY.to_string());
        }
        url.strip_prefix("sqlite:///")
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}
