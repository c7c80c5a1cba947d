//! PBKDF2 password hashing.
//!
//! Encoded form: `pbkdf2:sha256:{iterations}${salt_b64}${hash_b64}` with
//! standard, padded base64. The iteration count travels with the hash so
//! raising the configured count does not invalidate existing accounts.

use std::num::NonZeroU32;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ring::pbkdf2;

use crate::error::AuthError;

const METHOD: &str = "pbkdf2:sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::MalformedHash` for zero iterations and
/// `AuthError::Random` if the OS RNG fails.
pub fn hash_password(password: &str, iterations: u32) -> Result<String, AuthError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| AuthError::MalformedHash("iteration count must be non-zero".into()))?;

    let mut salt = [0u8; SALT_LEN];
    getrandom::fill(&mut salt).map_err(|e| AuthError::Random(e.to_string()))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(ALGORITHM, iterations, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{METHOD}:{iterations}${}${}",
        STANDARD.encode(salt),
        STANDARD.encode(hash)
    ))
}

/// Check a password against an encoded hash in constant time.
///
/// # Errors
///
/// Returns `AuthError::MalformedHash` if `encoded` is not in the expected form.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, AuthError> {
    let parsed = Parsed::from_encoded(encoded)?;
    Ok(pbkdf2::verify(
        ALGORITHM,
        parsed.iterations,
        &parsed.salt,
        password.as_bytes(),
        &parsed.hash,
    )
    .is_ok())
}

struct Parsed {
    iterations: NonZeroU32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl Parsed {
    fn from_encoded(encoded: &str) -> Result<Self, AuthError> {
        let malformed = |what: &str| AuthError::MalformedHash(what.to_string());

        let mut parts = encoded.split('$');
        let (Some(method), Some(salt), Some(hash), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed("expected method$salt$hash"));
        };

        let iterations = method
            .strip_prefix(METHOD)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(|| malformed("unsupported method"))?
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| malformed("invalid iteration count"))?;

        let salt = STANDARD
            .decode(salt)
            .map_err(|e| malformed(&format!("salt: {e}")))?;
        let hash = STANDARD
            .decode(hash)
            .map_err(|e| malformed(&format!("hash: {e}")))?;
        if hash.is_empty() {
            return Err(malformed("empty hash"));
        }

        Ok(Self {
            iterations,
            salt,
            hash,
        })
    }
}
