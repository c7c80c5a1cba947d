use serde::Serialize;
use sophia_core::entities::User;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WhoamiResponse {
    user: User,
    token_source: Option<&'static str>,
    gemini_configured: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = ctx.require_user().await?;
    output(
        &WhoamiResponse {
            user,
            token_source: sophia_auth::token_store::detect_token_source(),
            gemini_configured: ctx.has_gemini(),
        },
        flags.format,
    )
}
