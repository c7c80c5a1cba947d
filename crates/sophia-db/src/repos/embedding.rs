//! Embedding storage.
//!
//! Vectors are opaque blobs here; encoding and similarity live in
//! `sophia-search`. The model name is stored next to the blob; vectors from
//! another model are neither scanned nor counted as indexed.

use crate::error::DatabaseError;
use crate::repos::snippet::{row_to_snippet, snippet_columns};
use crate::service::SophiaService;
use sophia_core::entities::Snippet;

impl SophiaService {
    /// Store the embedding for a snippet, replacing any previous one.
    pub async fn set_snippet_embedding(
        &self,
        user_id: &str,
        id: &str,
        blob: &[u8],
        model: &str,
    ) -> Result<(), DatabaseError> {
        let updated = self
            .db()
            .conn()
            .execute(
                "UPDATE snippets SET embedding = ?1, embedding_model = ?2 WHERE id = ?3 AND user_id = ?4",
                libsql::params![libsql::Value::Blob(blob.to_vec()), model, id, user_id],
            )
            .await?;
        if updated == 0 {
            return Err(DatabaseError::not_found("snippet", id));
        }
        Ok(())
    }

    pub async fn clear_snippet_embedding(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let updated = self
            .db()
            .conn()
            .execute(
                "UPDATE snippets SET embedding = NULL, embedding_model = NULL WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
            )
            .await?;
        if updated == 0 {
            return Err(DatabaseError::not_found("snippet", id));
        }
        Ok(())
    }

    /// The stored blob for one snippet, `None` if it has not been embedded.
    pub async fn snippet_embedding(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Vec<u8>>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT embedding FROM snippets WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("snippet", id))?;
        Ok(row.get::<Option<Vec<u8>>>(0)?)
    }

    /// The stored blob for one snippet together with the model that made it.
    pub async fn snippet_embedding_with_model(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<(Vec<u8>, String)>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT embedding, embedding_model FROM snippets WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("snippet", id))?;
        let Some(blob) = row.get::<Option<Vec<u8>>>(0)? else {
            return Ok(None);
        };
        let model = row.get::<Option<String>>(1)?.unwrap_or_default();
        Ok(Some((blob, model)))
    }

    /// Every `(snippet_id, blob)` pair the user has from `model`, for a linear scan.
    pub async fn embedding_candidates(
        &self,
        user_id: &str,
        model: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, embedding FROM snippets
                 WHERE user_id = ?1 AND embedding IS NOT NULL AND embedding_model = ?2
                 ORDER BY id",
                [user_id, model],
            )
            .await?;
        let mut candidates = Vec::new();
        while let Some(row) = rows.next().await? {
            candidates.push((row.get::<String>(0)?, row.get::<Vec<u8>>(1)?));
        }
        Ok(candidates)
    }

    /// Snippets without a vector from `model`, oldest first.
    pub async fn snippets_missing_embedding(
        &self,
        user_id: &str,
        model: &str,
    ) -> Result<Vec<Snippet>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM snippets
                     WHERE user_id = ?1 AND (embedding IS NULL OR embedding_model IS NOT ?2)
                     ORDER BY created_at, rowid",
                    snippet_columns("")
                ),
                [user_id, model],
            )
            .await?;
        let mut snippets = Vec::new();
        while let Some(row) = rows.next().await? {
            snippets.push(row_to_snippet(&row)?);
        }
        Ok(snippets)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::DatabaseError;
    use crate::test_support::{make_snippet, register, test_service};
    use crate::updates::snippet::SnippetUpdateBuilder;

    #[tokio::test]
    async fn set_get_clear() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let s = make_snippet(&svc, &user, "A", "a").await;

        assert_eq!(svc.snippet_embedding(&user.id, &s.id).await.unwrap(), None);

        svc.set_snippet_embedding(&user.id, &s.id, &[1, 2, 3, 4], "text-embedding-004")
            .await
            .unwrap();
        assert_eq!(
            svc.snippet_embedding(&user.id, &s.id).await.unwrap(),
            Some(vec![1, 2, 3, 4])
        );
        assert!(svc.get_snippet(&user.id, &s.id).await.unwrap().has_embedding);

        svc.clear_snippet_embedding(&user.id, &s.id).await.unwrap();
        assert_eq!(svc.snippet_embedding(&user.id, &s.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn candidates_and_missing_partition_snippets() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let a = make_snippet(&svc, &user, "A", "a").await;
        let b = make_snippet(&svc, &user, "B", "b").await;
        svc.set_snippet_embedding(&user.id, &a.id, &[0; 8], "m")
            .await
            .unwrap();

        let candidates = svc.embedding_candidates(&user.id, "m").await.unwrap();
        assert_eq!(candidates, vec![(a.id.clone(), vec![0; 8])]);

        let missing = svc.snippets_missing_embedding(&user.id, "m").await.unwrap();
        assert_eq!(missing.iter().map(|s| &s.id).collect::<Vec<_>>(), vec![&b.id]);
    }

    #[tokio::test]
    async fn vectors_from_another_model_count_as_missing() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let old = make_snippet(&svc, &user, "Old", "a").await;
        let new = make_snippet(&svc, &user, "New", "b").await;
        svc.set_snippet_embedding(&user.id, &old.id, &[1; 4], "old-model")
            .await
            .unwrap();
        svc.set_snippet_embedding(&user.id, &new.id, &[2; 4], "new-model")
            .await
            .unwrap();

        let candidates = svc.embedding_candidates(&user.id, "new-model").await.unwrap();
        assert_eq!(candidates, vec![(new.id.clone(), vec![2; 4])]);

        let missing = svc.snippets_missing_embedding(&user.id, "new-model").await.unwrap();
        assert_eq!(missing.iter().map(|s| &s.id).collect::<Vec<_>>(), vec![&old.id]);

        assert_eq!(
            svc.snippet_embedding_with_model(&user.id, &old.id).await.unwrap(),
            Some((vec![1; 4], "old-model".to_string()))
        );
    }

    #[tokio::test]
    async fn editing_text_clears_embedding() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let s = make_snippet(&svc, &user, "A", "a").await;
        svc.set_snippet_embedding(&user.id, &s.id, &[9; 4], "m")
            .await
            .unwrap();

        svc.update_snippet(&user.id, &s.id, SnippetUpdateBuilder::new().tags("x").build())
            .await
            .unwrap();
        assert!(svc.snippet_embedding(&user.id, &s.id).await.unwrap().is_some());

        svc.update_snippet(&user.id, &s.id, SnippetUpdateBuilder::new().code("b").build())
            .await
            .unwrap();
        assert!(svc.snippet_embedding(&user.id, &s.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn foreign_snippet_embedding_is_not_found() {
        let svc = test_service().await;
        let ada = register(&svc, "ada").await;
        let grace = register(&svc, "grace").await;
        let s = make_snippet(&svc, &ada, "A", "a").await;

        let err = svc
            .set_snippet_embedding(&grace.id, &s.id, &[0; 4], "m")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(_)));
        assert!(svc.embedding_candidates(&grace.id, "m").await.unwrap().is_empty());
    }
}
