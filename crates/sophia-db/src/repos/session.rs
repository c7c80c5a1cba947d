//! Login sessions.
//!
//! A session row holds the HMAC digest of the client's token and an expiry.
//! The raw token is returned once, from [`SophiaService::login`].

use chrono::{TimeDelta, Utc};

use sophia_auth::{hash_password, mint_session_token, token_digest, verify_password};
use sophia_core::entities::User;
use sophia_core::errors::CoreError;
use sophia_core::ids::PREFIX_SESSION;
use sophia_core::validation;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, timestamp};
use crate::repos::user::row_to_user;
use crate::service::SophiaService;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

impl SophiaService {
    /// Check credentials and open a session.
    ///
    /// Returns the user and the raw session token. Unknown usernames and wrong
    /// passwords fail identically and both pay for one key derivation.
    ///
    /// # Errors
    ///
    /// `CoreError::AuthFailed` for bad credentials, `CoreError::Validation`
    /// for missing fields.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<(User, String), DatabaseError> {
        let username = validation::login(username, password)?;
        let invalid = || DatabaseError::from(CoreError::AuthFailed(INVALID_CREDENTIALS.into()));

        let Some((user, hash)) = self.credentials_for(&username).await? else {
            tracing::debug!(%username, "login for unknown user");
            hash_password(password, self.auth().pbkdf2_iterations)?;
            return Err(invalid());
        };
        if !verify_password(password, &hash)? {
            tracing::debug!(user_id = %user.id, "login with wrong password");
            return Err(invalid());
        }

        let token = mint_session_token()?;
        let ttl = TimeDelta::from_std(self.auth().session_ttl(remember_me))
            .map_err(|e| DatabaseError::InvalidState(format!("session ttl: {e}")))?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SESSION).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO auth_sessions (id, user_id, token_digest, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    user.id.as_str(),
                    token_digest(&self.auth().secret_key, &token),
                    timestamp(now),
                    timestamp(now + ttl)
                ],
            )
            .await?;

        tracing::info!(user_id = %user.id, session_id = %id, remember_me, "logged in");
        Ok((user, token))
    }

    /// Resolve a client token to its user. Expired sessions are removed.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        let digest = token_digest(&self.auth().secret_key, token);
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT u.id, u.username, u.email, u.created_at, s.id, s.expires_at
                 FROM auth_sessions s JOIN users u ON u.id = s.user_id
                 WHERE s.token_digest = ?1",
                [digest.as_str()],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };

        let user = row_to_user(&row)?;
        let session_id = row.get::<String>(4)?;
        let expires_at = parse_datetime(&row.get::<String>(5)?)?;

        if expires_at <= Utc::now() {
            self.db()
                .conn()
                .execute("DELETE FROM auth_sessions WHERE id = ?1", [session_id.as_str()])
                .await?;
            tracing::debug!(%session_id, "expired session removed");
            return Ok(None);
        }
        Ok(Some(user))
    }

    /// End the session for `token`. Returns whether a session existed.
    pub async fn logout(&self, token: &str) -> Result<bool, DatabaseError> {
        let digest = token_digest(&self.auth().secret_key, token);
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM auth_sessions WHERE token_digest = ?1",
                [digest.as_str()],
            )
            .await?;
        Ok(removed > 0)
    }

    /// Delete all expired sessions. Returns how many were removed.
    pub async fn purge_expired_sessions(&self) -> Result<u64, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM auth_sessions WHERE expires_at <= ?1",
                [timestamp(Utc::now())],
            )
            .await?;
        Ok(removed)
    }
}
