mod login;
mod logout;
mod register;
mod whoami;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `sophia auth`. Runs before any session is required.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Register(args) => register::handle(args, ctx, flags).await,
        AuthCommands::Login(args) => login::handle(args, ctx, flags).await,
        AuthCommands::Logout => logout::handle(ctx, flags).await,
        AuthCommands::Whoami => whoami::handle(ctx, flags).await,
    }
}
