//! Session tokens.
//!
//! The raw token is only ever held by the client. The database stores
//! `token_digest(secret_key, token)`, so a leaked database cannot be replayed
//! without the secret key.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ring::hmac;

use crate::error::AuthError;

const TOKEN_BYTES: usize = 32;

/// Mint a new random session token (URL-safe base64, no padding).
///
/// # Errors
///
/// Returns `AuthError::Random` if the OS RNG fails.
pub fn mint_session_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| AuthError::Random(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// HMAC-SHA256 of the token under the secret key, URL-safe base64.
#[must_use]
pub fn token_digest(secret_key: &str, token: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret_key.as_bytes());
    let tag = hmac::sign(&key, token.as_bytes());
    URL_SAFE_NO_PAD.encode(tag.as_ref())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let a = mint_session_token().unwrap();
        let b = mint_session_token().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn digest_is_deterministic_per_key() {
        let token = "some-token";
        assert_eq!(token_digest("k1", token), token_digest("k1", token));
        assert_ne!(token_digest("k1", token), token_digest("k2", token));
        assert_ne!(token_digest("k1", token), token_digest("k1", "other-token"));
    }

    #[test]
    fn digest_does_not_contain_token() {
        let token = mint_session_token().unwrap();
        assert!(!token_digest("secret", &token).contains(&token));
    }
}
