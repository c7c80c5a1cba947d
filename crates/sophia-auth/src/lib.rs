//! # sophia-auth
//!
//! Local account security for the Sophia CLI.
//!
//! - Password hashing with PBKDF2-HMAC-SHA256 (`ring`), stored in a
//!   self-describing `pbkdf2:sha256:{iterations}${salt}${hash}` form.
//! - Opaque session tokens: random bytes handed to the user, with only an
//!   HMAC digest persisted server-side.
//! - Token storage on the client: OS keychain (`keyring`), then the
//!   `SOPHIA_AUTH__TOKEN` env var, then `~/.sophia/credentials`.

pub mod error;
pub mod password;
pub mod token;
pub mod token_store;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use token::{mint_session_token, token_digest};

/// Resolve the stored session token, if any.
///
/// Priority: keyring → env var → file. The token is not checked against the
/// database here.
#[must_use]
pub fn resolve_token() -> Option<String> {
    token_store::load()
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
