use serde::Serialize;
use sophia_core::entities::{Snippet, User};
use sophia_db::updates::snippet::SnippetUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UpdateSnippetArgs;
use crate::commands::shared::embed::embed_if_configured;
use crate::commands::shared::input::read_code;
use crate::commands::shared::parse::parse_language;
use crate::commands::shared::rewards::Rewards;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct UpdatedSnippet {
    snippet: Snippet,
    #[serde(flatten)]
    rewards: Rewards,
}

pub async fn handle(
    args: &UpdateSnippetArgs,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut builder = SnippetUpdateBuilder::new();
    if let Some(title) = &args.title {
        builder = builder.title(title);
    }
    if args.code.is_some() || args.code_file.is_some() {
        builder = builder.code(read_code(args.code.as_deref(), args.code_file.as_deref())?);
    }
    if let Some(description) = &args.description {
        builder = builder.description(description);
    }
    if let Some(language) = args.language.as_deref() {
        builder = builder.language(parse_language(language)?);
    }
    if let Some(tags) = &args.tags {
        builder = builder.tags(tags);
    }
    let update = builder.build();
    if update.is_empty() {
        anyhow::bail!(
            "nothing to update; pass --title, --code, --code-file, --description, --language, or --tags"
        );
    }
    let reembed = update.touches_embedded_text() && !args.no_embed;

    let snippet = ctx.service.update_snippet(&user.id, &args.id, update).await?;

    let mut rewards = Rewards::default();
    let snippet = if reembed {
        embed_if_configured(ctx, &user.id, snippet, &mut rewards).await
    } else {
        snippet
    };

    output(&UpdatedSnippet { snippet, rewards }, flags.format)
}
