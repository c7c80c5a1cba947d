use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    session_ended: bool,
    cleared: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session_ended = match sophia_auth::resolve_token() {
        Some(token) => ctx.service.logout(&token).await?,
        None => false,
    };
    sophia_auth::logout()?;

    output(
        &LogoutResponse {
            session_ended,
            cleared: true,
        },
        flags.format,
    )
}
