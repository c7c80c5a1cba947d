use serde::Serialize;
use sophia_core::entities::User;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RegisterArgs;
use crate::commands::shared::input::read_password;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct RegisterResponse {
    user: User,
    next: String,
}

pub async fn handle(args: &RegisterArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = read_password(args.password.as_deref(), "password")?;
    let confirm = match args.confirm.as_deref() {
        Some(confirm) => confirm.to_string(),
        None if args.password.is_some() => password.clone(),
        None => read_password(None, "repeat password")?,
    };

    let user = ctx
        .service
        .register_user(&args.username, &args.email, &password, &confirm)
        .await?;

    output(
        &RegisterResponse {
            next: format!("sophia auth login {}", user.username),
            user,
        },
        flags.format,
    )
}
