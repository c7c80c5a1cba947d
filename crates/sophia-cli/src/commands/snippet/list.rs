use sophia_core::entities::User;
use sophia_db::repos::snippet::SnippetFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListSnippetArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_language;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    args: &ListSnippetArgs,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = SnippetFilter {
        collection_id: args.collection.clone(),
        language: parse_optional_language(args.language.as_deref())?,
        tag: args.tag.clone(),
    };
    let per_page = effective_limit(None, flags.limit, ctx.config.general.per_page);

    let page = ctx
        .service
        .list_snippets(&user.id, &filter, args.page, per_page)
        .await?;
    if page.items.is_empty() && args.page > 1 {
        tracing::warn!(page = args.page, pages = page.total_pages(), "page is past the end");
    }
    output(&page, flags.format)
}
