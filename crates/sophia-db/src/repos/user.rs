//! User repository: registration and lookup.

use chrono::Utc;

use sophia_auth::hash_password;
use sophia_core::entities::User;
use sophia_core::errors::CoreError;
use sophia_core::ids::PREFIX_USER;
use sophia_core::validation;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, timestamp};
use crate::service::SophiaService;

pub(crate) const USER_COLUMNS: &str = "id, username, email, created_at";

const USERNAME_TAKEN: &str = "Please use a different username.";
const EMAIL_TAKEN: &str = "Please use a different email address.";

/// Map a `UNIQUE` violation on `users` to the same conflict the pre-insert
/// check reports. A concurrent registration can slip between the two.
fn registration_conflict(error: libsql::Error) -> DatabaseError {
    let message = error.to_string();
    if message.contains("UNIQUE constraint failed: users.username") {
        CoreError::Conflict(USERNAME_TAKEN.into()).into()
    } else if message.contains("UNIQUE constraint failed: users.email") {
        CoreError::Conflict(EMAIL_TAKEN.into()).into()
    } else {
        error.into()
    }
}

pub(crate) fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        username: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl SophiaService {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for bad input, `CoreError::Conflict` when the
    /// username or email is already registered.
    pub async fn register_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        password2: &str,
    ) -> Result<User, DatabaseError> {
        let reg = validation::registration(username, email, password, password2)?;

        if self.exists("username", &reg.username).await? {
            return Err(CoreError::Conflict(USERNAME_TAKEN.into()).into());
        }
        if self.exists("email", &reg.email).await? {
            return Err(CoreError::Conflict(EMAIL_TAKEN.into()).into());
        }

        let hash = hash_password(&reg.password, self.auth().pbkdf2_iterations)?;
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, username, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    reg.username.as_str(),
                    reg.email.as_str(),
                    hash,
                    timestamp(now)
                ],
            )
            .await
            .map_err(registration_conflict)?;

        tracing::info!(user_id = %id, username = %reg.username, "user registered");

        Ok(User {
            id,
            username: reg.username,
            email: reg.email,
            created_at: parse_datetime(&timestamp(now))?,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", id))?;
        row_to_user(&row)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                [username.trim()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// The user and their stored password hash, for login.
    pub(crate) async fn credentials_for(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = ?1"),
                [username],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some((row_to_user(&row)?, row.get::<String>(4)?))),
            None => Ok(None),
        }
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT 1 FROM users WHERE {column} = ?1"),
                [value],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{register, test_service};

    #[tokio::test]
    async fn register_and_fetch() {
        let svc = test_service().await;
        let user = svc
            .register_user(" ada ", "ada@example.com", "pw", "pw")
            .await
            .unwrap();

        assert!(user.id.starts_with("usr-"));
        assert_eq!(user.username, "ada");

        let fetched = svc.get_user(&user.id).await.unwrap();
        assert_eq!(fetched, user);
        assert_eq!(
            svc.get_user_by_username("ada").await.unwrap().map(|u| u.id),
            Some(user.id)
        );
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let svc = test_service().await;
        register(&svc, "ada").await;
        let (_, hash) = svc.credentials_for("ada").await.unwrap().unwrap();
        assert!(hash.starts_with("pbkdf2:sha256:1000$"));
        assert!(!hash.contains("pw$"));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let svc = test_service().await;
        register(&svc, "ada").await;
        let err = svc
            .register_user("ada", "other@example.com", "pw", "pw")
            .await
            .unwrap_err();
        assert!(
            matches!(err, DatabaseError::Core(CoreError::Conflict(ref m)) if m == "Please use a different username."),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = test_service().await;
        register(&svc, "ada").await;
        let err = svc
            .register_user("grace", "ada@example.com", "pw", "pw")
            .await
            .unwrap_err();
        assert!(
            matches!(err, DatabaseError::Core(CoreError::Conflict(ref m)) if m == "Please use a different email address."),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn invalid_registration_is_validation_error() {
        let svc = test_service().await;
        let err = svc
            .register_user("ada", "not-an-email", "pw", "different")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let svc = test_service().await;
        assert!(svc.get_user("usr-00000000").await.unwrap_err().is_not_found());
        assert!(svc.get_user_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unique_violation_maps_to_conflict() {
        let svc = test_service().await;
        register(&svc, "ada").await;
        let conn = svc.db().conn();
        let sql = "INSERT INTO users (id, username, email, password_hash) VALUES ('usr-x', ?1, ?2, 'h')";

        let err = registration_conflict(
            conn.execute(sql, ["ada", "x@example.com"]).await.unwrap_err(),
        );
        assert!(
            matches!(err, DatabaseError::Core(CoreError::Conflict(ref m)) if m == USERNAME_TAKEN),
            "{err:?}"
        );

        let err = registration_conflict(
            conn.execute(sql, ["grace", "ada@example.com"]).await.unwrap_err(),
        );
        assert!(
            matches!(err, DatabaseError::Core(CoreError::Conflict(ref m)) if m == EMAIL_TAKEN),
            "{err:?}"
        );
    }
}
