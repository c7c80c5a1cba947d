//! Embedding snippets and storing their vectors.

use serde::Serialize;
use sophia_ai::Embedder;
use sophia_core::entities::{ActivityOutcome, Badge, Snippet};
use sophia_core::enums::{Activity, EmbeddingTask};
use sophia_db::SophiaService;

use crate::error::SearchError;
use crate::vector::encode;

/// Embed a snippet as a retrieval document and store the vector.
///
/// Records [`Activity::SnippetIndexed`].
///
/// # Errors
///
/// Returns [`SearchError::Ai`] if embedding fails, or
/// [`SearchError::Database`] if the snippet is gone or the write fails.
pub async fn index_snippet(
    svc: &SophiaService,
    embedder: &dyn Embedder,
    user_id: &str,
    snippet: &Snippet,
) -> Result<ActivityOutcome, SearchError> {
    let vector = embedder
        .embed(&snippet.embedding_text(), EmbeddingTask::RetrievalDocument)
        .await?;
    svc.set_snippet_embedding(user_id, &snippet.id, &encode(&vector), embedder.model())
        .await?;
    tracing::debug!(snippet_id = %snippet.id, dimensions = vector.len(), "snippet indexed");

    Ok(svc
        .record_activity(user_id, Activity::SnippetIndexed, Some(&snippet.id))
        .await?)
}

/// Progress of a [`reindex_missing_with`] run, reported after each snippet.
#[derive(Debug, Clone, Copy)]
pub struct IndexProgress<'a> {
    pub done: usize,
    pub total: usize,
    pub snippet: &'a Snippet,
    pub ok: bool,
}

/// A snippet that could not be indexed.
#[derive(Debug, Clone, Serialize)]
pub struct IndexFailure {
    pub snippet_id: String,
    pub error: String,
}

/// Outcome of a bulk reindex.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReindexSummary {
    pub indexed: usize,
    pub failed: Vec<IndexFailure>,
    pub points_awarded: i64,
    pub new_badges: Vec<Badge>,
}

impl ReindexSummary {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.indexed + self.failed.len()
    }
}

/// Embed every snippet the user has without a vector from the embedder's
/// model. Vectors left by an earlier model are replaced.
///
/// # Errors
///
/// Returns [`SearchError::Database`] only if the snippets cannot be listed.
/// Per-snippet failures are collected in the summary.
pub async fn reindex_missing(
    svc: &SophiaService,
    embedder: &dyn Embedder,
    user_id: &str,
) -> Result<ReindexSummary, SearchError> {
    reindex_missing_with(svc, embedder, user_id, |_| {}).await
}

/// [`reindex_missing`] with a callback after each snippet.
///
/// # Errors
///
/// Same as [`reindex_missing`].
pub async fn reindex_missing_with<F>(
    svc: &SophiaService,
    embedder: &dyn Embedder,
    user_id: &str,
    mut on_progress: F,
) -> Result<ReindexSummary, SearchError>
where
    F: FnMut(IndexProgress<'_>),
{
    let model = embedder.model();
    let pending = svc.snippets_missing_embedding(user_id, model).await?;
    let total = pending.len();
    tracing::info!(user_id, total, model, "reindexing snippets without embeddings");

    let mut summary = ReindexSummary::default();
    for (i, snippet) in pending.iter().enumerate() {
        let ok = match index_snippet(svc, embedder, user_id, snippet).await {
            Ok(outcome) => {
                summary.indexed += 1;
                summary.points_awarded += outcome.points_awarded;
                summary.new_badges.extend(outcome.new_badges);
                true
            }
            Err(error) => {
                tracing::warn!(snippet_id = %snippet.id, %error, "failed to index snippet");
                summary.failed.push(IndexFailure {
                    snippet_id: snippet.id.clone(),
                    error: error.to_string(),
                });
                false
            }
        };
        on_progress(IndexProgress {
            done: i + 1,
            total,
            snippet,
            ok,
        });
    }
    Ok(summary)
}
