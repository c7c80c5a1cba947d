//! Shared test utilities for sophia-db unit tests.

use sophia_config::AuthConfig;
use sophia_core::entities::{Collection, NewSnippet, Snippet, User};
use sophia_core::gamification::{PointsTable, default_badges};

use crate::SophiaDb;
use crate::service::SophiaService;

/// Low PBKDF2 cost so tests stay fast.
pub const TEST_ITERATIONS: u32 = 1_000;

/// Create an in-memory `SophiaService` with the default badges seeded.
pub async fn test_service() -> SophiaService {
    let db = SophiaDb::open_local(":memory:").await.unwrap();
    let auth = AuthConfig {
        secret_key: "test-secret".into(),
        pbkdf2_iterations: TEST_ITERATIONS,
        ..AuthConfig::default()
    };
    let svc = SophiaService::from_db(db, auth, PointsTable::default());
    svc.sync_badges(&default_badges()).await.unwrap();
    svc
}

/// Register a user named `name` with password `"pw"`.
pub async fn register(svc: &SophiaService, name: &str) -> User {
    svc.register_user(name, &format!("{name}@example.com"), "pw", "pw")
        .await
        .unwrap()
}

pub async fn make_collection(
    svc: &SophiaService,
    user: &User,
    name: &str,
    parent: Option<&str>,
) -> Collection {
    svc.create_collection(&user.id, name, parent).await.unwrap().0
}

pub async fn make_snippet(svc: &SophiaService, user: &User, title: &str, code: &str) -> Snippet {
    svc.create_snippet(
        &user.id,
        NewSnippet {
            title: title.into(),
            code: code.into(),
            ..NewSnippet::default()
        },
    )
    .await
    .unwrap()
    .0
}
