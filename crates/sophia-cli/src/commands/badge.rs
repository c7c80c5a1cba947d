use chrono::{DateTime, Utc};
use serde::Serialize;
use sophia_core::entities::{Badge, User};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BadgeCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct BadgeRow {
    slug: String,
    name: String,
    description: String,
    criteria: String,
    icon: Option<String>,
    earned_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct DefinedBadge {
    badge: Badge,
    /// Whether the current user qualified immediately.
    awarded: bool,
}

/// Handle `sophia badge`.
pub async fn handle(
    action: &BadgeCommands,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        BadgeCommands::List => {
            let earned = ctx.service.user_badges(&user.id).await?;
            let rows = ctx
                .service
                .list_badges()
                .await?
                .into_iter()
                .map(|badge| {
                    let earned_at = earned
                        .iter()
                        .find(|a| a.badge.slug == badge.slug)
                        .map(|a| a.awarded_at);
                    BadgeRow {
                        slug: badge.slug,
                        name: badge.name,
                        description: badge.description,
                        criteria: badge.criteria,
                        icon: badge.icon,
                        earned_at,
                    }
                })
                .collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        BadgeCommands::Define {
            slug,
            name,
            description,
            criteria,
            icon,
        } => {
            let badge = ctx
                .service
                .define_badge(&Badge {
                    slug: slug.clone(),
                    name: name.clone(),
                    description: description.clone(),
                    criteria: criteria.clone(),
                    icon: icon.clone(),
                })
                .await?;
            let awarded = ctx
                .service
                .check_badges(&user.id)
                .await?
                .iter()
                .any(|b| b.slug == badge.slug);
            output(&DefinedBadge { badge, awarded }, flags.format)
        }
    }
}
