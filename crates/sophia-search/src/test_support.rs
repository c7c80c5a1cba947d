//! Shared test utilities: an in-memory service and a keyword-counting
//! embedder.

use std::sync::Mutex;

use async_trait::async_trait;
use sophia_ai::{AiError, Embedder};
use sophia_config::AuthConfig;
use sophia_core::entities::{NewSnippet, Snippet, User};
use sophia_core::enums::EmbeddingTask;
use sophia_core::gamification::{PointsTable, default_badges};
use sophia_db::{SophiaDb, SophiaService};

/// Each keyword is one vector dimension.
pub const KEYWORDS: [&str; 4] = ["graph", "array", "string", "tree"];

/// Embeds text as keyword counts. Fails for text containing `fail_on`.
#[derive(Default)]
pub struct FakeEmbedder {
    pub fail_on: Option<String>,
    pub calls: Mutex<Vec<EmbeddingTask>>,
}

impl FakeEmbedder {
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> Vec<EmbeddingTask> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn model(&self) -> &str {
        "fake-embedding"
    }

    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>, AiError> {
        self.calls.lock().unwrap().push(task);
        if self.fail_on.as_deref().is_some_and(|m| text.contains(m)) {
            return Err(AiError::Api {
                status: 500,
                message: "backend unavailable".into(),
            });
        }
        let lower = text.to_lowercase();
        #[allow(clippy::cast_precision_loss)]
        Ok(KEYWORDS
            .iter()
            .map(|k| lower.matches(k).count() as f32)
            .collect())
    }
}

pub async fn test_service() -> SophiaService {
    let db = SophiaDb::open_local(":memory:").await.unwrap();
    let auth = AuthConfig {
        secret_key: "test-secret".into(),
        pbkdf2_iterations: 1_000,
        ..AuthConfig::default()
    };
    let svc = SophiaService::from_db(db, auth, PointsTable::default());
    svc.sync_badges(&default_badges()).await.unwrap();
    svc
}

pub async fn register(svc: &SophiaService, name: &str) -> User {
    svc.register_user(name, &format!("{name}@example.com"), "pw", "pw")
        .await
        .unwrap()
}

pub async fn make_snippet(
    svc: &SophiaService,
    user: &User,
    title: &str,
    description: &str,
) -> Snippet {
    svc.create_snippet(
        &user.id,
        NewSnippet {
            title: title.into(),
            code: "pass".into(),
            description: Some(description.into()),
            ..NewSnippet::default()
        },
    )
    .await
    .unwrap()
    .0
}
