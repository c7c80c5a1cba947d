//! Semantic search over stored snippet embeddings.
//!
//! The query is embedded with the `RETRIEVAL_QUERY` task and compared with
//! every stored vector of the user made by the same model (see
//! [`crate::vector::rank`]).

use std::collections::HashMap;

use sophia_ai::Embedder;
use sophia_core::entities::ScoredSnippet;
use sophia_core::enums::{Activity, EmbeddingTask};
use sophia_db::SophiaService;

use crate::error::SearchError;
use crate::vector::{RankedId, decode, rank};

/// Lowest possible cosine score; passing it keeps every candidate.
pub const ANY_SCORE: f32 = -1.0;

/// Find the user's snippets closest in meaning to `query`.
///
/// Records [`Activity::Search`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for a blank query,
/// [`SearchError::Ai`] if the query cannot be embedded, or
/// [`SearchError::Database`] on storage failures.
pub async fn semantic_search(
    svc: &SophiaService,
    embedder: &dyn Embedder,
    user_id: &str,
    query: &str,
    limit: u32,
    min_score: f32,
) -> Result<Vec<ScoredSnippet>, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::InvalidQuery(
            "search query cannot be empty".to_string(),
        ));
    }

    let query_vector = embedder.embed(query, EmbeddingTask::RetrievalQuery).await?;
    let candidates = svc.embedding_candidates(user_id, embedder.model()).await?;
    let scanned = candidates.len();
    let ranked = rank(&query_vector, candidates, limit as usize, min_score);
    tracing::debug!(user_id, scanned, hits = ranked.len(), "semantic search");

    let results = load_scored(svc, user_id, ranked).await?;
    svc.record_activity(user_id, Activity::Search, None).await?;
    Ok(results)
}

/// Snippets most similar to an already indexed snippet, excluding itself.
///
/// Uses the stored vector and compares it only with vectors from the same
/// model; the embedding service is not called.
///
/// # Errors
///
/// Returns [`SearchError::NotIndexed`] if the snippet has no embedding,
/// [`SearchError::Decode`] if its blob is corrupt, or
/// [`SearchError::Database`] if it does not exist.
pub async fn similar_snippets(
    svc: &SophiaService,
    user_id: &str,
    snippet_id: &str,
    limit: u32,
) -> Result<Vec<ScoredSnippet>, SearchError> {
    let (blob, model) = svc
        .snippet_embedding_with_model(user_id, snippet_id)
        .await?
        .ok_or_else(|| SearchError::NotIndexed(snippet_id.to_string()))?;
    let vector = decode(&blob)?;

    let candidates = svc
        .embedding_candidates(user_id, &model)
        .await?
        .into_iter()
        .filter(|(id, _)| id != snippet_id);
    let ranked = rank(&vector, candidates, limit as usize, ANY_SCORE);

    load_scored(svc, user_id, ranked).await
}

async fn load_scored(
    svc: &SophiaService,
    user_id: &str,
    ranked: Vec<RankedId>,
) -> Result<Vec<ScoredSnippet>, SearchError> {
    let ids: Vec<String> = ranked.iter().map(|r| r.id.clone()).collect();
    let scores: HashMap<String, f32> = ranked.into_iter().map(|r| (r.id, r.score)).collect();

    Ok(svc
        .get_snippets_by_ids(user_id, &ids)
        .await?
        .into_iter()
        .filter_map(|snippet| {
            let score = *scores.get(&snippet.id)?;
            Some(ScoredSnippet { snippet, score })
        })
        .collect())
}
