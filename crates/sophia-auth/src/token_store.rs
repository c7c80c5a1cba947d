use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "sophia-cli";
const KEYRING_USER: &str = "session-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "SOPHIA_AUTH__TOKEN";

/// Returns the keyring service name.
///
/// Defaults to `"sophia-cli"`. Override via `SOPHIA_KEYRING_SERVICE` for
/// testing to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("SOPHIA_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store a session token in the OS keychain. Falls back to file if the keyring
/// is unavailable.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if both keyring and file storage fail.
pub fn store(token: &str) -> Result<(), AuthError> {
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(token) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&credentials_path()?, token)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&credentials_path()?, token)
        }
    }
}

/// Load a session token. Priority: keyring → `SOPHIA_AUTH__TOKEN` env →
/// file (`~/.sophia/credentials`).
#[must_use]
pub fn load() -> Option<String> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(token) = entry.get_password()
        && !token.is_empty()
    {
        return Some(token);
    }

    if let Ok(token) = std::env::var(TOKEN_ENV)
        && !token.is_empty()
    {
        return Some(token);
    }

    credentials_path().ok().and_then(|p| load_file(&p))
}

/// Delete stored credentials from keyring and file.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }
    delete_file(&credentials_path()?)
}

/// Which tier the current token came from (for `auth whoami`).
#[must_use]
pub fn detect_token_source() -> Option<&'static str> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && entry.get_password().is_ok_and(|t| !t.is_empty())
    {
        return Some("keyring");
    }
    if std::env::var(TOKEN_ENV).is_ok_and(|t| !t.is_empty()) {
        return Some("env");
    }
    if credentials_path().ok().and_then(|p| load_file(&p)).is_some() {
        return Some("file");
    }
    None
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".sophia").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStore("home directory not found, cannot store credentials".into())
        })
}

fn store_file(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, token)
        .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn delete_file(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            AuthError::TokenStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}
