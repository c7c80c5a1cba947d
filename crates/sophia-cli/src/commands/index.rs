use serde::Serialize;
use sophia_core::entities::User;
use sophia_search::{IndexFailure, ReindexSummary};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IndexArgs;
use crate::commands::shared::rewards::Rewards;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct IndexResponse {
    indexed: usize,
    failed: Vec<IndexFailure>,
    #[serde(flatten)]
    rewards: Rewards,
}

impl From<ReindexSummary> for IndexResponse {
    fn from(summary: ReindexSummary) -> Self {
        let mut rewards = Rewards {
            points_awarded: summary.points_awarded,
            ..Rewards::default()
        };
        rewards.add_badges(summary.new_badges);
        Self {
            indexed: summary.indexed,
            failed: summary.failed,
            rewards,
        }
    }
}

/// Handle `sophia index`.
pub async fn handle(
    args: &IndexArgs,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let gemini = ctx.gemini()?;

    if let Some(id) = args.snippet.as_deref() {
        let snippet = ctx.service.get_snippet(&user.id, id).await?;
        let spinner = Progress::spinner(format!("embedding {}", snippet.title));
        let outcome = sophia_search::index_snippet(&ctx.service, gemini, &user.id, &snippet).await;
        spinner.clear();
        return output(
            &IndexResponse {
                indexed: 1,
                failed: Vec::new(),
                rewards: outcome?.into(),
            },
            flags.format,
        );
    }

    let mut bar: Option<Progress> = None;
    let summary = sophia_search::reindex_missing_with(&ctx.service, gemini, &user.id, |step| {
        let bar = bar.get_or_insert_with(|| Progress::bar(step.total, "indexing snippets"));
        bar.advance(step.done, step.snippet.title.clone());
    })
    .await?;
    if let Some(bar) = &bar {
        bar.finish(format!(
            "indexed {} of {}",
            summary.indexed,
            summary.attempted()
        ));
    }

    let mut response = IndexResponse::from(summary);
    response.rewards.total_points = Some(ctx.service.user_points(&user.id).await?);
    output(&response, flags.format)
}
