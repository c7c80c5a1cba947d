use serde::Serialize;
use sophia_core::entities::User;
use sophia_search::ANY_SCORE;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::rows::{SearchHit, hits};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    mode: &'static str,
    results: Vec<SearchHit>,
}

/// Handle `sophia search`.
///
/// Semantic when Gemini is configured, FTS keyword search otherwise or with
/// `--keyword`.
pub async fn handle(
    args: &SearchArgs,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);

    let gemini = if args.keyword {
        None
    } else {
        match ctx.gemini() {
            Ok(gemini) => Some(gemini),
            Err(error) => {
                tracing::warn!("{error}; falling back to keyword search");
                None
            }
        }
    };

    let (mode, results) = if let Some(gemini) = gemini {
        let spinner = Progress::spinner("embedding query");
        let results = sophia_search::semantic_search(
            &ctx.service,
            gemini,
            &user.id,
            &args.query,
            limit,
            args.min_score.unwrap_or(ANY_SCORE),
        )
        .await;
        spinner.clear();
        ("semantic", results?)
    } else {
        if args.min_score.is_some() {
            tracing::warn!("--min-score applies to semantic search only; ignored");
        }
        (
            "keyword",
            sophia_search::keyword_search(&ctx.service, &user.id, &args.query, limit).await?,
        )
    };

    output(
        &SearchResponse {
            query: &args.query,
            mode,
            results: hits(results),
        },
        flags.format,
    )
}
