//! Points, activity log, and badges.
//!
//! Every point-earning action appends a row to `activity_log`; totals and
//! per-activity counts are aggregated from it. After each activity the badges
//! the user does not hold yet are evaluated and awarded at most once.

use std::collections::HashSet;

use chrono::Utc;

use sophia_core::entities::{
    ActivityEntry, ActivityOutcome, ActivityStats, AwardedBadge, Badge, UserProfile,
};
use sophia_core::enums::Activity;
use sophia_core::gamification::{BadgeCriteria, validate_badge};
use sophia_core::ids::PREFIX_ACTIVITY;

use crate::error::DatabaseError;
use crate::helpers::{get_count, get_opt_string, parse_datetime, parse_enum, timestamp};
use crate::service::SophiaService;

const BADGE_COLUMNS: &str = "slug, name, description, criteria, icon";

fn row_to_badge(row: &libsql::Row) -> Result<Badge, DatabaseError> {
    Ok(Badge {
        slug: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        description: row.get::<String>(2)?,
        criteria: row.get::<String>(3)?,
        icon: get_opt_string(row, 4)?,
    })
}

fn row_to_activity(row: &libsql::Row) -> Result<ActivityEntry, DatabaseError> {
    Ok(ActivityEntry {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        activity: parse_enum(&row.get::<String>(2)?)?,
        points: row.get::<i64>(3)?,
        subject_id: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl SophiaService {
    /// Log an activity, award its points, and award any badges it unlocks.
    pub async fn record_activity(
        &self,
        user_id: &str,
        activity: Activity,
        subject_id: Option<&str>,
    ) -> Result<ActivityOutcome, DatabaseError> {
        let points = self.points().points_for(activity);
        let id = self.db().generate_id(PREFIX_ACTIVITY).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO activity_log (id, user_id, activity, points, subject_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    user_id,
                    activity.as_str(),
                    points,
                    subject_id,
                    timestamp(Utc::now())
                ],
            )
            .await?;
        tracing::debug!(user_id, %activity, points, "activity recorded");

        let stats = self.activity_stats(user_id).await?;
        let new_badges = self.award_badges(user_id, &stats).await?;
        Ok(ActivityOutcome {
            points_awarded: points,
            total_points: stats.total_points,
            new_badges,
        })
    }

    /// Evaluate badges against the user's current stats without logging a
    /// new activity. Picks up badges defined after the qualifying activity.
    pub async fn check_badges(&self, user_id: &str) -> Result<Vec<Badge>, DatabaseError> {
        let stats = self.activity_stats(user_id).await?;
        self.award_badges(user_id, &stats).await
    }

    async fn award_badges(
        &self,
        user_id: &str,
        stats: &ActivityStats,
    ) -> Result<Vec<Badge>, DatabaseError> {
        let held: HashSet<String> = self
            .user_badges(user_id)
            .await?
            .into_iter()
            .map(|b| b.badge.slug)
            .collect();

        let mut awarded = Vec::new();
        for badge in self.list_badges().await? {
            if held.contains(&badge.slug) {
                continue;
            }
            let criteria = match BadgeCriteria::parse(&badge.criteria) {
                Ok(criteria) => criteria,
                Err(error) => {
                    tracing::warn!(slug = %badge.slug, %error, "skipping badge with invalid criteria");
                    continue;
                }
            };
            if !criteria.is_met(stats) {
                continue;
            }
            let inserted = self
                .db()
                .conn()
                .execute(
                    "INSERT OR IGNORE INTO user_badges (user_id, badge_slug, awarded_at) VALUES (?1, ?2, ?3)",
                    libsql::params![user_id, badge.slug.as_str(), timestamp(Utc::now())],
                )
                .await?;
            if inserted > 0 {
                tracing::info!(user_id, slug = %badge.slug, "badge awarded");
                awarded.push(badge);
            }
        }
        Ok(awarded)
    }

    /// Create or replace a badge definition.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` if the slug or name is blank or the criteria
    /// do not parse.
    pub async fn define_badge(&self, badge: &Badge) -> Result<Badge, DatabaseError> {
        validate_badge(badge)?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO badges (slug, name, description, criteria, icon, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(slug) DO UPDATE SET
                     name = excluded.name,
                     description = excluded.description,
                     criteria = excluded.criteria,
                     icon = excluded.icon",
                libsql::params![
                    badge.slug.trim(),
                    badge.name.trim(),
                    badge.description.as_str(),
                    badge.criteria.as_str(),
                    badge.icon.as_deref(),
                    timestamp(Utc::now())
                ],
            )
            .await?;
        self.get_badge(badge.slug.trim()).await
    }

    /// Upsert a set of definitions (startup seeding). Returns how many.
    pub async fn sync_badges(&self, badges: &[Badge]) -> Result<usize, DatabaseError> {
        for badge in badges {
            self.define_badge(badge).await?;
        }
        Ok(badges.len())
    }

    pub async fn get_badge(&self, slug: &str) -> Result<Badge, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {BADGE_COLUMNS} FROM badges WHERE slug = ?1"),
                [slug],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("badge", slug))?;
        row_to_badge(&row)
    }

    pub async fn list_badges(&self) -> Result<Vec<Badge>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {BADGE_COLUMNS} FROM badges ORDER BY created_at, slug"),
                (),
            )
            .await?;
        let mut badges = Vec::new();
        while let Some(row) = rows.next().await? {
            badges.push(row_to_badge(&row)?);
        }
        Ok(badges)
    }

    /// Badges the user holds, in award order.
    pub async fn user_badges(&self, user_id: &str) -> Result<Vec<AwardedBadge>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT b.slug, b.name, b.description, b.criteria, b.icon, ub.awarded_at
                 FROM user_badges ub JOIN badges b ON b.slug = ub.badge_slug
                 WHERE ub.user_id = ?1 ORDER BY ub.awarded_at, b.slug",
                [user_id],
            )
            .await?;
        let mut badges = Vec::new();
        while let Some(row) = rows.next().await? {
            badges.push(AwardedBadge {
                badge: row_to_badge(&row)?,
                awarded_at: parse_datetime(&row.get::<String>(5)?)?,
            });
        }
        Ok(badges)
    }

    pub async fn user_points(&self, user_id: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COALESCE(SUM(points), 0) FROM activity_log WHERE user_id = ?1",
                [user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Per-activity counts and total points.
    pub async fn activity_stats(&self, user_id: &str) -> Result<ActivityStats, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT activity, COUNT(*), COALESCE(SUM(points), 0) FROM activity_log
                 WHERE user_id = ?1 GROUP BY activity",
                [user_id],
            )
            .await?;

        let mut stats = ActivityStats::default();
        while let Some(row) = rows.next().await? {
            let name = row.get::<String>(0)?;
            stats.total_points += row.get::<i64>(2)?;
            match Activity::from_name(&name) {
                Some(activity) => {
                    stats.counts.insert(activity, get_count(&row, 1)?);
                }
                None => tracing::warn!(activity = %name, "unknown activity in log"),
            }
        }
        Ok(stats)
    }

    /// Most recent activity first.
    pub async fn recent_activity(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ActivityEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, user_id, activity, points, subject_id, created_at FROM activity_log
                 WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
                libsql::params![user_id, i64::from(limit)],
            )
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_activity(&row)?);
        }
        Ok(entries)
    }

    pub async fn user_profile(&self, user_id: &str) -> Result<UserProfile, DatabaseError> {
        let user = self.get_user(user_id).await?;
        let stats = self.activity_stats(user_id).await?;
        Ok(UserProfile {
            user,
            total_points: stats.total_points,
            badges: self.user_badges(user_id).await?,
            snippet_count: self.count_snippets(user_id).await?,
            collection_count: self.count_collections(user_id).await?,
            stats,
        })
    }
}
