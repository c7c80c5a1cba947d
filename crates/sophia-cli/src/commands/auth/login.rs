use serde::Serialize;
use sophia_core::entities::User;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LoginArgs;
use crate::commands::shared::input::read_password;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LoginResponse {
    user: User,
    remember_me: bool,
    session_hours: u64,
    token_source: Option<&'static str>,
}

pub async fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = read_password(args.password.as_deref(), "password")?;
    let (user, token) = ctx
        .service
        .login(&args.username, &password, args.remember_me)
        .await?;

    sophia_auth::token_store::store(&token)?;
    tracing::info!(user_id = %user.id, "logged in");

    output(
        &LoginResponse {
            user,
            remember_me: args.remember_me,
            session_hours: ctx.config.auth.session_ttl(args.remember_me).as_secs() / 3600,
            token_source: sophia_auth::token_store::detect_token_source(),
        },
        flags.format,
    )
}
