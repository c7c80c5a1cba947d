use serde::Serialize;
use sophia_ai::TextGenerator;
use sophia_core::entities::{NewSnippet, Snippet, User};
use sophia_core::enums::Activity;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CreateSnippetArgs;
use crate::commands::shared::embed::embed_if_configured;
use crate::commands::shared::input::read_code;
use crate::commands::shared::parse::parse_language;
use crate::commands::shared::rewards::Rewards;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct CreatedSnippet {
    snippet: Snippet,
    #[serde(flatten)]
    rewards: Rewards,
}

pub async fn handle(
    args: &CreateSnippetArgs,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let code = read_code(args.code.as_deref(), args.code_file.as_deref())?;
    let language = parse_language(&args.language)?;
    let mut rewards = Rewards::default();

    let mut tags = args.tags.clone().filter(|t| !t.trim().is_empty());
    if tags.is_none() && args.suggest_tags {
        let gemini = ctx.gemini()?;
        let spinner = Progress::spinner("suggesting tags");
        let suggested = gemini.suggest_tags(&code).await;
        spinner.clear();
        match suggested {
            Ok(suggested) => {
                rewards.add(
                    ctx.service
                        .record_activity(&user.id, Activity::AiTagging, None)
                        .await?,
                );
                tags = Some(suggested.join(", "));
            }
            Err(error) => tracing::warn!(%error, "tag suggestion failed; saving without tags"),
        }
    }

    let (snippet, outcome) = ctx
        .service
        .create_snippet(
            &user.id,
            NewSnippet {
                title: args.title.clone(),
                code,
                description: args.description.clone(),
                language,
                tags,
                collection_id: args.collection.clone(),
            },
        )
        .await?;
    rewards.add(outcome);

    let snippet = if args.no_embed {
        snippet
    } else {
        embed_if_configured(ctx, &user.id, snippet, &mut rewards).await
    };

    output(&CreatedSnippet { snippet, rewards }, flags.format)
}
