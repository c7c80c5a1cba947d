//! # sophia-db
//!
//! libSQL storage for Sophia.
//!
//! Holds accounts and login sessions, the collection hierarchy, snippets with
//! their embedding blobs, an FTS5 keyword index over snippets, and the
//! gamification tables (activity log, badges, awarded badges).
//!
//! All repository methods live on [`service::SophiaService`] and are scoped
//! to the owning user: another user's row is reported as not found.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::DatabaseError;
pub use service::SophiaService;

use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection and provides ID generation.
pub struct SophiaDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SophiaDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Creates the parent directory if needed and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:"
            && let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::InvalidState(format!("create {}: {e}", parent.display()))
            })?;
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let sophia_db = Self { db, conn };
        sophia_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(sophia_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"snp-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> SophiaDb {
        SophiaDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "users",
            "auth_sessions",
            "collections",
            "snippets",
            "snippets_fts",
            "activity_log",
            "badges",
            "user_badges",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("snp").await.unwrap();
        assert!(id.starts_with("snp-"), "ID should start with 'snp-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in sophia_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(sophia_core::ids::has_prefix(&id, prefix), "{id}");
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn file_database_creates_parent_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("sophia.db");
        let db = SophiaDb::open_local(path.to_str().unwrap()).await.unwrap();
        db.generate_id("usr").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn fts_trigger_populates_on_insert() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO users (id, username, email, password_hash) VALUES ('usr-1', 'ada', 'ada@x.io', 'h')",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO snippets (id, user_id, title, code, tags) VALUES ('snp-1', 'usr-1', 'Dijkstra shortest paths', 'heapq.heappush(pq, (0, src))', 'graphs')",
                (),
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query(
                "SELECT rowid FROM snippets_fts WHERE snippets_fts MATCH 'heappush'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }
}
