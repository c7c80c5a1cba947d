use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sophia_core::entities::{ActivityEntry, User};
use sophia_core::enums::Activity;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProfileArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ProfileResponse {
    username: String,
    email: String,
    member_since: DateTime<Utc>,
    total_points: i64,
    snippets: u64,
    collections: u64,
    activity: BTreeMap<Activity, u64>,
    badges: Vec<EarnedBadge>,
    recent_activity: Vec<ActivityEntry>,
}

#[derive(Serialize)]
struct EarnedBadge {
    slug: String,
    name: String,
    icon: Option<String>,
    awarded_at: DateTime<Utc>,
}

/// Handle `sophia profile`.
pub async fn handle(
    args: &ProfileArgs,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let profile = ctx.service.user_profile(&user.id).await?;
    let recent_activity = ctx.service.recent_activity(&user.id, args.activity).await?;

    let badges = profile
        .badges
        .into_iter()
        .map(|awarded| EarnedBadge {
            slug: awarded.badge.slug,
            name: awarded.badge.name,
            icon: awarded.badge.icon,
            awarded_at: awarded.awarded_at,
        })
        .collect();

    output(
        &ProfileResponse {
            username: profile.user.username,
            email: profile.user.email,
            member_since: profile.user.created_at,
            total_points: profile.total_points,
            snippets: profile.snippet_count,
            collections: profile.collection_count,
            activity: profile.stats.counts,
            badges,
            recent_activity,
        },
        flags.format,
    )
}
