use sophia_core::entities::Snippet;

use crate::commands::shared::rewards::Rewards;
use crate::context::AppContext;
use crate::progress::Progress;

/// Embed a freshly saved or edited snippet when Gemini is configured.
///
/// A failed embedding is logged and the snippet stays unindexed; `sophia
/// index` picks it up later.
pub async fn embed_if_configured(
    ctx: &AppContext,
    user_id: &str,
    mut snippet: Snippet,
    rewards: &mut Rewards,
) -> Snippet {
    let Ok(gemini) = ctx.gemini() else {
        tracing::debug!(snippet_id = %snippet.id, "Gemini not configured; snippet left unindexed");
        return snippet;
    };

    let spinner = Progress::spinner("embedding snippet");
    match sophia_search::index_snippet(&ctx.service, gemini, user_id, &snippet).await {
        Ok(outcome) => {
            spinner.clear();
            rewards.add(outcome);
            snippet.has_embedding = true;
        }
        Err(error) => {
            spinner.clear();
            tracing::warn!(
                snippet_id = %snippet.id,
                %error,
                "snippet saved without embedding; run `sophia index` to retry"
            );
        }
    }
    snippet
}
