//! Schema setup, run every time a database is opened.
//!
//! The SQL is compiled into the binary. Every statement is guarded with
//! `IF NOT EXISTS`, so re-running against an existing file is a no-op.

use crate::SophiaDb;
use crate::error::DatabaseError;

/// Accounts, sessions, collections, snippets (with embedding blobs), the
/// snippet FTS5 index and its sync triggers, and the gamification tables.
const SCHEMA_V1: &str = include_str!("../migrations/001_initial.sql");

impl SophiaDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_V1)
            .await
            .map_err(|e| DatabaseError::Migration(format!("schema v1: {e}")))?;
        Ok(())
    }
}
