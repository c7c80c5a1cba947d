use std::path::Path;

use anyhow::Context;
use sophia_config::SophiaConfig;

/// Load `.env`, then the layered configuration, and reject unusable values.
pub fn load_config() -> anyhow::Result<SophiaConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    load_dotenv(&cwd)?;

    let config = SophiaConfig::load().context("failed to load sophia configuration")?;
    config.validate().context("invalid sophia configuration")?;
    Ok(config)
}

/// Prefer `./.env`, then `./.sophia/.env`, then the usual upward search.
fn load_dotenv(cwd: &Path) -> anyhow::Result<()> {
    for candidate in [cwd.join(".env"), cwd.join(".sophia").join(".env")] {
        if candidate.exists() {
            dotenvy::from_path(&candidate).with_context(|| {
                format!("failed to load dotenv file at {}", candidate.display())
            })?;
            return Ok(());
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}
