//! Service layer: the database handle plus the settings repositories need.
//!
//! `SophiaService` wraps `SophiaDb` with the auth settings (secret key,
//! hashing cost, session lifetimes) and the points table. All repo methods are
//! implemented as `impl SophiaService` blocks in [`crate::repos`].

use sophia_config::{AuthConfig, SophiaConfig};
use sophia_core::gamification::PointsTable;

use crate::SophiaDb;
use crate::error::DatabaseError;

pub struct SophiaService {
    db: SophiaDb,
    auth: AuthConfig,
    points: PointsTable,
}

impl SophiaService {
    /// Open a local database and seed the configured badge definitions.
    ///
    /// # Arguments
    ///
    /// * `db_path`: Path to the libSQL database file, or `":memory:"` for tests.
    /// * `config`: Loaded configuration; `auth` and `gamification` are used.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or a badge
    /// definition is invalid.
    pub async fn new_local(db_path: &str, config: &SophiaConfig) -> Result<Self, DatabaseError> {
        let db = SophiaDb::open_local(db_path).await?;
        let svc = Self::from_db(db, config.auth.clone(), config.gamification.points);
        svc.sync_badges(&config.gamification.badges).await?;
        Ok(svc)
    }

    /// Create from an existing `SophiaDb` (for testing).
    #[must_use]
    pub const fn from_db(db: SophiaDb, auth: AuthConfig, points: PointsTable) -> Self {
        Self { db, auth, points }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SophiaDb {
        &self.db
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    #[must_use]
    pub const fn points(&self) -> &PointsTable {
        &self.points
    }
}
