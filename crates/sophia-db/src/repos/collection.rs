//! Collection repository: a per-user tree of snippet folders.
//!
//! Every query is scoped by `user_id`; a collection owned by someone else is
//! reported as not found.

use std::collections::{HashMap, HashSet};

use chrono::Utc;

use sophia_core::entities::{ActivityOutcome, Collection, CollectionNode};
use sophia_core::enums::Activity;
use sophia_core::ids::PREFIX_COLLECTION;
use sophia_core::validation;

use crate::error::DatabaseError;
use crate::helpers::{get_count, get_opt_string, parse_datetime, timestamp};
use crate::service::SophiaService;

const COLLECTION_COLUMNS: &str = "id, user_id, name, parent_id, created_at, updated_at";

fn row_to_collection(row: &libsql::Row) -> Result<Collection, DatabaseError> {
    Ok(Collection {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        parent_id: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl SophiaService {
    /// Create a collection, optionally nested under `parent_id`.
    ///
    /// Records [`Activity::CollectionCreated`].
    pub async fn create_collection(
        &self,
        user_id: &str,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<(Collection, ActivityOutcome), DatabaseError> {
        let name = validation::collection_name(name)?;
        if let Some(parent) = parent_id {
            self.get_collection(user_id, parent).await?;
        }

        let now = timestamp(Utc::now());
        let id = self.db().generate_id(PREFIX_COLLECTION).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO collections (id, user_id, name, parent_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    user_id,
                    name.as_str(),
                    parent_id,
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;

        let collection = self.get_collection(user_id, &id).await?;
        let outcome = self
            .record_activity(user_id, Activity::CollectionCreated, Some(&id))
            .await?;
        Ok((collection, outcome))
    }

    pub async fn get_collection(&self, user_id: &str, id: &str) -> Result<Collection, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {COLLECTION_COLUMNS} FROM collections WHERE id = ?1 AND user_id = ?2"
                ),
                [id, user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("collection", id))?;
        row_to_collection(&row)
    }

    pub async fn rename_collection(
        &self,
        user_id: &str,
        id: &str,
        name: &str,
    ) -> Result<Collection, DatabaseError> {
        let name = validation::collection_name(name)?;
        self.get_collection(user_id, id).await?;
        self.db()
            .conn()
            .execute(
                "UPDATE collections SET name = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
                libsql::params![name.as_str(), timestamp(Utc::now()), id, user_id],
            )
            .await?;
        self.get_collection(user_id, id).await
    }

    /// Re-parent a collection. `None` moves it to the top level.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` if the move would put the collection inside
    /// itself or one of its descendants.
    pub async fn move_collection(
        &self,
        user_id: &str,
        id: &str,
        new_parent: Option<&str>,
    ) -> Result<Collection, DatabaseError> {
        self.get_collection(user_id, id).await?;
        if let Some(parent) = new_parent {
            if parent == id {
                return Err(DatabaseError::validation(
                    "cannot move a collection into itself",
                ));
            }
            let ancestors = self.collection_path(user_id, parent).await?;
            if ancestors.iter().any(|c| c.id == id) {
                return Err(DatabaseError::validation(
                    "cannot move a collection into one of its descendants",
                ));
            }
        }

        self.db()
            .conn()
            .execute(
                "UPDATE collections SET parent_id = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
                libsql::params![new_parent, timestamp(Utc::now()), id, user_id],
            )
            .await?;
        self.get_collection(user_id, id).await
    }

    /// Delete a collection.
    ///
    /// Child collections move up to the deleted collection's parent and its
    /// snippets become uncollected. Nothing else is deleted.
    pub async fn delete_collection(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let collection = self.get_collection(user_id, id).await?;
        let now = timestamp(Utc::now());

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "UPDATE collections SET parent_id = ?1, updated_at = ?2 WHERE parent_id = ?3 AND user_id = ?4",
            libsql::params![collection.parent_id.as_deref(), now.as_str(), id, user_id],
        )
        .await?;
        tx.execute(
            "UPDATE snippets SET collection_id = NULL, updated_at = ?1 WHERE collection_id = ?2 AND user_id = ?3",
            libsql::params![now.as_str(), id, user_id],
        )
        .await?;
        tx.execute(
            "DELETE FROM collections WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(collection_id = %id, "collection deleted");
        Ok(())
    }

    /// All of a user's collections, by name.
    pub async fn list_collections(&self, user_id: &str) -> Result<Vec<Collection>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {COLLECTION_COLUMNS} FROM collections WHERE user_id = ?1
                     ORDER BY name COLLATE NOCASE, id"
                ),
                [user_id],
            )
            .await?;
        let mut collections = Vec::new();
        while let Some(row) = rows.next().await? {
            collections.push(row_to_collection(&row)?);
        }
        Ok(collections)
    }

    pub async fn count_collections(&self, user_id: &str) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM collections WHERE user_id = ?1", [user_id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    /// The user's collections as a forest, with direct snippet counts.
    pub async fn collection_tree(&self, user_id: &str) -> Result<Vec<CollectionNode>, DatabaseError> {
        let collections = self.list_collections(user_id).await?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT collection_id, COUNT(*) FROM snippets
                 WHERE user_id = ?1 AND collection_id IS NOT NULL GROUP BY collection_id",
                [user_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            counts.insert(row.get::<String>(0)?, get_count(&row, 1)?);
        }

        let known: HashSet<&str> = collections.iter().map(|c| c.id.as_str()).collect();
        let mut children: HashMap<Option<&str>, Vec<&Collection>> = HashMap::new();
        for c in &collections {
            let parent = c.parent_id.as_deref().filter(|p| known.contains(p));
            children.entry(parent).or_default().push(c);
        }

        Ok(build_level(None, &children, &counts))
    }

    /// Ancestors of a collection, root first, ending with the collection itself.
    pub async fn collection_path(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Vec<Collection>, DatabaseError> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(id.to_string());
        while let Some(cid) = current {
            if !seen.insert(cid.clone()) {
                return Err(DatabaseError::InvalidState(format!(
                    "collection cycle detected at {cid}"
                )));
            }
            let collection = self.get_collection(user_id, &cid).await?;
            current = collection.parent_id.clone();
            path.push(collection);
        }
        path.reverse();
        Ok(path)
    }
}

fn build_level(
    parent: Option<&str>,
    children: &HashMap<Option<&str>, Vec<&Collection>>,
    counts: &HashMap<String, u64>,
) -> Vec<CollectionNode> {
    children
        .get(&parent)
        .map(|level| {
            level
                .iter()
                .map(|c| CollectionNode {
                    collection: (*c).clone(),
                    snippet_count: counts.get(&c.id).copied().unwrap_or(0),
                    children: build_level(Some(c.id.as_str()), children, counts),
                })
                .collect()
        })
        .unwrap_or_default()
}
