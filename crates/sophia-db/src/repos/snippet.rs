//! Snippet repository: CRUD, paging, and FTS keyword search.

use std::collections::HashMap;

use chrono::Utc;

use sophia_core::entities::{ActivityOutcome, NewSnippet, Page, Snippet};
use sophia_core::enums::{Activity, Language};
use sophia_core::ids::PREFIX_SNIPPET;
use sophia_core::tags::{join_tags, parse_stored};
use sophia_core::validation;

use crate::error::DatabaseError;
use crate::helpers::{
    clean_optional, fts_query, get_count, get_opt_string, parse_datetime, parse_enum, timestamp,
};
use crate::service::SophiaService;
use crate::updates::snippet::SnippetUpdate;

/// Column list shared by every snippet query, optionally table-qualified.
pub(crate) fn snippet_columns(alias: &str) -> String {
    [
        "id",
        "user_id",
        "collection_id",
        "title",
        "code",
        "description",
        "language",
        "tags",
        "created_at",
        "updated_at",
    ]
    .iter()
    .map(|c| format!("{alias}{c}"))
    .chain(std::iter::once(format!("{alias}embedding IS NOT NULL")))
    .collect::<Vec<_>>()
    .join(", ")
}

pub(crate) fn row_to_snippet(row: &libsql::Row) -> Result<Snippet, DatabaseError> {
    Ok(Snippet {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        collection_id: get_opt_string(row, 2)?,
        title: row.get::<String>(3)?,
        code: row.get::<String>(4)?,
        description: get_opt_string(row, 5)?,
        language: parse_enum(&row.get::<String>(6)?)?,
        tags: parse_stored(get_opt_string(row, 7)?.as_deref()),
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
        has_embedding: row.get::<i64>(10)? != 0,
    })
}

fn text_or_null(value: Option<String>) -> libsql::Value {
    value.map_or(libsql::Value::Null, libsql::Value::Text)
}

fn stored_tags(raw: &str) -> Result<Option<String>, DatabaseError> {
    let tags = validation::tags(raw)?;
    Ok(if tags.is_empty() {
        None
    } else {
        Some(join_tags(&tags))
    })
}

/// Filters for [`SophiaService::list_snippets`]. All set fields must match.
#[derive(Debug, Clone, Default)]
pub struct SnippetFilter {
    pub collection_id: Option<String>,
    pub language: Option<Language>,
    /// A single tag; compared after normalisation.
    pub tag: Option<String>,
}

impl SophiaService {
    /// Save a new snippet. Records [`Activity::SnippetCreated`].
    pub async fn create_snippet(
        &self,
        user_id: &str,
        new: NewSnippet,
    ) -> Result<(Snippet, ActivityOutcome), DatabaseError> {
        let title = validation::snippet(&new.title, &new.code)?;
        let tags = stored_tags(new.tags.as_deref().unwrap_or_default())?;
        if let Some(collection_id) = new.collection_id.as_deref() {
            self.get_collection(user_id, collection_id).await?;
        }

        let now = timestamp(Utc::now());
        let id = self.db().generate_id(PREFIX_SNIPPET).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO snippets (id, user_id, collection_id, title, code, description, language, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                libsql::params![
                    id.as_str(),
                    user_id,
                    new.collection_id.as_deref(),
                    title.as_str(),
                    new.code.as_str(),
                    clean_optional(new.description.as_deref()),
                    new.language.as_str(),
                    tags,
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        let snippet = self.get_snippet(user_id, &id).await?;
        let outcome = self
            .record_activity(user_id, Activity::SnippetCreated, Some(&id))
            .await?;
        tracing::info!(snippet_id = %id, "snippet created");
        Ok((snippet, outcome))
    }

    pub async fn get_snippet(&self, user_id: &str, id: &str) -> Result<Snippet, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM snippets WHERE id = ?1 AND user_id = ?2",
                    snippet_columns("")
                ),
                [id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("snippet", id))?;
        row_to_snippet(&row)
    }

    /// Load several snippets, preserving the order of `ids`. Unknown or
    /// foreign IDs are skipped.
    pub async fn get_snippets_by_ids(
        &self,
        user_id: &str,
        ids: &[String],
    ) -> Result<Vec<Snippet>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders: Vec<String> = (0..ids.len()).map(|i| format!("?{}", i + 2)).collect();
        let sql = format!(
            "SELECT {} FROM snippets WHERE user_id = ?1 AND id IN ({})",
            snippet_columns(""),
            placeholders.join(", ")
        );
        let mut params: Vec<libsql::Value> = vec![user_id.into()];
        params.extend(ids.iter().map(|id| libsql::Value::from(id.as_str())));

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut by_id = HashMap::new();
        while let Some(row) = rows.next().await? {
            let snippet = row_to_snippet(&row)?;
            by_id.insert(snippet.id.clone(), snippet);
        }
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Apply a partial update.
    ///
    /// Changing the title, code, or description clears the stored embedding
    /// so it no longer describes stale text.
    pub async fn update_snippet(
        &self,
        user_id: &str,
        id: &str,
        update: SnippetUpdate,
    ) -> Result<Snippet, DatabaseError> {
        let existing = self.get_snippet(user_id, id).await?;
        if update.is_empty() {
            return Ok(existing);
        }

        let title = validation::snippet(
            update.title.as_deref().unwrap_or(&existing.title),
            update.code.as_deref().unwrap_or(&existing.code),
        )?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut push = |column: &str, value: libsql::Value| {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        };

        if update.title.is_some() {
            push("title", title.into());
        }
        if let Some(code) = update.code.as_deref() {
            push("code", code.into());
        }
        if let Some(description) = update.description.as_deref() {
            push("description", text_or_null(clean_optional(Some(description))));
        }
        if let Some(language) = update.language {
            push("language", language.as_str().into());
        }
        if let Some(tags) = update.tags.as_deref() {
            push("tags", text_or_null(stored_tags(tags)?));
        }
        if update.touches_embedded_text() {
            push("embedding", libsql::Value::Null);
            push("embedding_model", libsql::Value::Null);
        }
        push("updated_at", timestamp(Utc::now()).into());

        let id_idx = params.len() + 1;
        params.push(id.into());
        params.push(user_id.into());
        let sql = format!(
            "UPDATE snippets SET {} WHERE id = ?{id_idx} AND user_id = ?{}",
            sets.join(", "),
            id_idx + 1
        );

        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        if update.touches_embedded_text() && existing.has_embedding {
            tracing::debug!(snippet_id = %id, "embedding cleared after edit");
        }
        self.get_snippet(user_id, id).await
    }

    pub async fn delete_snippet(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM snippets WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
            )
            .await?;
        if removed == 0 {
            return Err(DatabaseError::not_found("snippet", id));
        }
        Ok(())
    }

    /// Put a snippet in a collection, or take it out with `None`.
    pub async fn move_snippet(
        &self,
        user_id: &str,
        id: &str,
        collection_id: Option<&str>,
    ) -> Result<Snippet, DatabaseError> {
        self.get_snippet(user_id, id).await?;
        if let Some(collection_id) = collection_id {
            self.get_collection(user_id, collection_id).await?;
        }
        self.db()
            .conn()
            .execute(
                "UPDATE snippets SET collection_id = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
                libsql::params![collection_id, timestamp(Utc::now()), id, user_id],
            )
            .await?;
        self.get_snippet(user_id, id).await
    }

    /// One page of a user's snippets, newest first. `page` is 1-based.
    pub async fn list_snippets(
        &self,
        user_id: &str,
        filter: &SnippetFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Snippet>, DatabaseError> {
        let page = page.max(1);
        let per_page = per_page.max(1);

        let mut conditions = vec!["user_id = ?1".to_string()];
        let mut params: Vec<libsql::Value> = vec![user_id.into()];

        if let Some(collection_id) = filter.collection_id.as_deref() {
            params.push(collection_id.into());
            conditions.push(format!("collection_id = ?{}", params.len()));
        }
        if let Some(language) = filter.language {
            params.push(language.as_str().into());
            conditions.push(format!("language = ?{}", params.len()));
        }
        if let Some(tag) = filter.tag.as_deref() {
            params.push(format!(",{},", tag.trim().to_lowercase()).into());
            conditions.push(format!(
                "instr(',' || COALESCE(tags, '') || ',', ?{}) > 0",
                params.len()
            ));
        }
        let where_clause = conditions.join(" AND ");

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM snippets WHERE {where_clause}"),
                libsql::params_from_iter(params.clone()),
            )
            .await?;
        let total = get_count(&rows.next().await?.ok_or(DatabaseError::NoResult)?, 0)?;

        let offset = u64::from(page - 1) * u64::from(per_page);
        let sql = format!(
            "SELECT {} FROM snippets WHERE {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {per_page} OFFSET {offset}",
            snippet_columns("")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_snippet(&row)?);
        }

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    pub async fn count_snippets(&self, user_id: &str) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM snippets WHERE user_id = ?1", [user_id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    /// Keyword search over title, description, code, and tags (FTS5, porter
    /// stemming). Every word must match.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for a blank query.
    pub async fn search_snippets_text(
        &self,
        user_id: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Snippet>, DatabaseError> {
        let Some(fts) = fts_query(query) else {
            return Err(DatabaseError::validation("search query must not be empty"));
        };
        let sql = format!(
            "SELECT {}
             FROM snippets_fts
             JOIN snippets s ON s.rowid = snippets_fts.rowid
             WHERE snippets_fts MATCH ?1 AND s.user_id = ?2
             ORDER BY rank LIMIT ?3",
            snippet_columns("s.")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params![fts, user_id, i64::from(limit)])
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
    use sophia_core::errors::CoreError;

    use super::*;
    use crate::test_support::{make_collection, make_snippet, register, test_service};
    use crate::updates::snippet::SnippetUpdateBuilder;

    fn two_sum() -> NewSnippet {
        NewSnippet {
            title: "  Two Sum ".into(),
            code: "def two_sum(nums, target):\n    seen = {}".into(),
            description: Some("  hash map lookup ".into()),
            language: Language::Python,
            tags: Some("Arrays, hashing, arrays".into()),
            collection_id: None,
        }
    }

    #[tokio::test]
    async fn create_snippet_normalises_fields() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;

        let (snippet, outcome) = svc.create_snippet(&user.id, two_sum()).await.unwrap();

        assert!(snippet.id.starts_with("snp-"));
        assert_eq!(snippet.title, "Two Sum");
        assert_eq!(snippet.description.as_deref(), Some("hash map lookup"));
        assert_eq!(snippet.tags, vec!["arrays", "hashing"]);
        assert!(!snippet.has_embedding);
        assert_eq!(outcome.points_awarded, 10);
        assert_eq!(
            outcome.new_badges.iter().map(|b| b.slug.as_str()).collect::<Vec<_>>(),
            vec!["first-snippet"]
        );

        let fetched = svc.get_snippet(&user.id, &snippet.id).await.unwrap();
        assert_eq!(fetched, snippet);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;

        let mut bad = two_sum();
        bad.title = "t".repeat(141);
        assert!(matches!(
            svc.create_snippet(&user.id, bad).await,
            Err(DatabaseError::Core(CoreError::Validation(_)))
        ));

        let mut foreign = two_sum();
        foreign.collection_id = Some("col-00000000".into());
        assert!(svc.create_snippet(&user.id, foreign).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn snippets_are_owner_scoped() {
        let svc = test_service().await;
        let ada = register(&svc, "ada").await;
        let grace = register(&svc, "grace").await;
        let snippet = make_snippet(&svc, &ada, "Mine", "x = 1").await;

        assert!(svc.get_snippet(&grace.id, &snippet.id).await.unwrap_err().is_not_found());
        assert!(svc.delete_snippet(&grace.id, &snippet.id).await.unwrap_err().is_not_found());
        assert!(
            svc.update_snippet(&grace.id, &snippet.id, SnippetUpdateBuilder::new().title("x").build())
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn update_is_partial() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let (snippet, _) = svc.create_snippet(&user.id, two_sum()).await.unwrap();

        let updated = svc
            .update_snippet(
                &user.id,
                &snippet.id,
                SnippetUpdateBuilder::new()
                    .language(Language::Rust)
                    .tags("HashMap")
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(updated.language, Language::Rust);
        assert_eq!(updated.tags, vec!["hashmap"]);
        assert_eq!(updated.title, snippet.title);
        assert_eq!(updated.code, snippet.code);
    }

    #[tokio::test]
    async fn update_can_clear_description() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let (snippet, _) = svc.create_snippet(&user.id, two_sum()).await.unwrap();

        let updated = svc
            .update_snippet(
                &user.id,
                &snippet.id,
                SnippetUpdateBuilder::new().description("").build(),
            )
            .await
            .unwrap();
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn update_validates_title() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let snippet = make_snippet(&svc, &user, "Fine", "x").await;
        let err = svc
            .update_snippet(&user.id, &snippet.id, SnippetUpdateBuilder::new().title("  ").build())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_snippet_removes_row() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let snippet = make_snippet(&svc, &user, "Doomed", "x").await;

        svc.delete_snippet(&user.id, &snippet.id).await.unwrap();
        assert!(svc.get_snippet(&user.id, &snippet.id).await.unwrap_err().is_not_found());
        assert!(svc.search_snippets_text(&user.id, "Doomed", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn move_in_and_out_of_collection() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let graphs = make_collection(&svc, &user, "Graphs", None).await;
        let snippet = make_snippet(&svc, &user, "BFS", "queue").await;

        let moved = svc.move_snippet(&user.id, &snippet.id, Some(&graphs.id)).await.unwrap();
        assert_eq!(moved.collection_id.as_deref(), Some(graphs.id.as_str()));
        let moved = svc.move_snippet(&user.id, &snippet.id, None).await.unwrap();
        assert_eq!(moved.collection_id, None);
    }

    #[tokio::test]
    async fn list_pages_newest_first() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        for i in 0..5 {
            make_snippet(&svc, &user, &format!("snippet {i}"), "x").await;
        }

        let first = svc
            .list_snippets(&user.id, &SnippetFilter::default(), 1, 2)
            .await
            .unwrap();
        assert_eq!(first.total, 5);
        assert_eq!(first.total_pages(), 3);
        assert_eq!(
            first.items.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
            vec!["snippet 4", "snippet 3"]
        );

        let last = svc
            .list_snippets(&user.id, &SnippetFilter::default(), 3, 2)
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_next());
    }

    #[tokio::test]
    async fn list_filters_combine() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let graphs = make_collection(&svc, &user, "Graphs", None).await;

        let mut rust_bfs = two_sum();
        rust_bfs.title = "BFS".into();
        rust_bfs.language = Language::Rust;
        rust_bfs.tags = Some("graphs,two_pointers".into());
        rust_bfs.collection_id = Some(graphs.id.clone());
        svc.create_snippet(&user.id, rust_bfs).await.unwrap();
        svc.create_snippet(&user.id, two_sum()).await.unwrap();

        let by_lang = SnippetFilter {
            language: Some(Language::Rust),
            ..Default::default()
        };
        let page = svc.list_snippets(&user.id, &by_lang, 1, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "BFS");

        let by_tag = SnippetFilter {
            tag: Some("Two_Pointers".into()),
            ..Default::default()
        };
        assert_eq!(svc.list_snippets(&user.id, &by_tag, 1, 10).await.unwrap().total, 1);

        let partial_tag = SnippetFilter {
            tag: Some("two".into()),
            ..Default::default()
        };
        assert_eq!(svc.list_snippets(&user.id, &partial_tag, 1, 10).await.unwrap().total, 0);

        let by_collection = SnippetFilter {
            collection_id: Some(graphs.id.clone()),
            language: Some(Language::Python),
            ..Default::default()
        };
        assert_eq!(svc.list_snippets(&user.id, &by_collection, 1, 10).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn text_search_uses_fts() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let other = register(&svc, "grace").await;
        svc.create_snippet(&user.id, two_sum()).await.unwrap();
        make_snippet(&svc, &user, "Dijkstra", "heapq.heappush(pq, (0, src))").await;
        make_snippet(&svc, &other, "Dijkstra too", "heapq").await;

        let hits = svc.search_snippets_text(&user.id, "hashing", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Two Sum");

        let hits = svc.search_snippets_text(&user.id, "dijkstra", 10).await.unwrap();
        assert_eq!(hits.len(), 1, "other users' snippets must not match");

        let hits = svc.search_snippets_text(&user.id, "c++ \"quoted", 10).await.unwrap();
        assert!(hits.is_empty());

        assert!(matches!(
            svc.search_snippets_text(&user.id, "   ", 10).await,
            Err(DatabaseError::Core(CoreError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn get_by_ids_preserves_order() {
        let svc = test_service().await;
        let user = register(&svc, "ada").await;
        let a = make_snippet(&svc, &user, "A", "a").await;
        let b = make_snippet(&svc, &user, "B", "b").await;

        let ids = vec![b.id.clone(), "snp-00000000".to_string(), a.id.clone()];
        let loaded = svc.get_snippets_by_ids(&user.id, &ids).await.unwrap();
        assert_eq!(
            loaded.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
            vec!["B", "A"]
        );
    }
}
