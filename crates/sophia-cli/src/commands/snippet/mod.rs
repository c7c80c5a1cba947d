mod create;
mod list;
mod update;

use serde::Serialize;
use sophia_core::entities::User;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SnippetCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::rows::hits;
use crate::context::AppContext;
use crate::output::{output, output_with_text};

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: bool,
    id: &'a str,
}

/// Handle `sophia snippet`.
pub async fn handle(
    action: &SnippetCommands,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        SnippetCommands::Create(args) => create::handle(args, ctx, user, flags).await,
        SnippetCommands::List(args) => list::handle(args, ctx, user, flags).await,
        SnippetCommands::Update(args) => update::handle(args, ctx, user, flags).await,
        SnippetCommands::Get { id } => {
            let snippet = svc.get_snippet(&user.id, id).await?;
            output_with_text(&snippet, &snippet.code, flags.format)
        }
        SnippetCommands::Delete { id } => {
            svc.delete_snippet(&user.id, id).await?;
            output(&Deleted { deleted: true, id }, flags.format)
        }
        SnippetCommands::Move { id, collection, .. } => {
            let snippet = svc.move_snippet(&user.id, id, collection.as_deref()).await?;
            output(&snippet, flags.format)
        }
        SnippetCommands::Similar { id } => {
            let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
            let similar = sophia_search::similar_snippets(svc, &user.id, id, limit).await?;
            output(&hits(similar), flags.format)
        }
    }
}
