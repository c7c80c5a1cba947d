//! Keyword search over the snippet FTS5 index.
//!
//! FTS5 uses porter stemming: "sorting" matches "sort". Results come back in
//! FTS5 rank order and get a positional relevance score so they render the
//! same way as semantic hits.

use sophia_core::entities::ScoredSnippet;
use sophia_core::enums::Activity;
use sophia_db::SophiaService;

use crate::error::SearchError;

/// Search titles, descriptions, code, and tags. Records
/// [`Activity::Search`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] if the query is blank, or
/// [`SearchError::Database`] if the FTS5 query fails.
pub async fn keyword_search(
    svc: &SophiaService,
    user_id: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<ScoredSnippet>, SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::InvalidQuery(
            "search query cannot be empty".to_string(),
        ));
    }

    let snippets = svc.search_snippets_text(user_id, query, limit).await?;
    svc.record_activity(user_id, Activity::Search, None).await?;

    // Position 0 scores 1.0, the last position approaches 0.0.
    let total = snippets.len();
    #[allow(clippy::cast_precision_loss)]
    Ok(snippets
        .into_iter()
        .enumerate()
        .map(|(i, snippet)| ScoredSnippet {
            snippet,
            score: (total - i) as f32 / total as f32,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{make_snippet, register, test_service};

    #[tokio::test]
    async fn positional_scores_descend() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        make_snippet(&svc, &user, "Binary search", "sorted array lookup").await;
        make_snippet(&svc, &user, "Merge sort", "sorting an array").await;
        make_snippet(&svc, &user, "Trie", "prefix tree").await;

        let results = keyword_search(&svc, &user.id, "array", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!((results[0].score - 1.0).abs() < f32::EPSILON);
        assert!((results[1].score - 0.5).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn blank_query_is_invalid() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let err = keyword_search(&svc, &user.id, " ", 10).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn records_search_activity() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        keyword_search(&svc, &user.id, "anything", 10).await.unwrap();
        let stats = svc.activity_stats(&user.id).await.unwrap();
        assert_eq!(stats.count(Activity::Search), 1);
    }
}
