use serde::Serialize;
use sophia_ai::TextGenerator;
use sophia_core::entities::{NewSnippet, Snippet, User};
use sophia_core::enums::Activity;
use sophia_core::validation::{self, MAX_TITLE_LEN};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AiCommands, CodeSourceArgs, GenerateArgs};
use crate::commands::shared::embed::embed_if_configured;
use crate::commands::shared::input::read_code;
use crate::commands::shared::parse::parse_language;
use crate::commands::shared::rewards::Rewards;
use crate::context::AppContext;
use crate::output::output_with_text;
use crate::progress::Progress;

#[derive(Serialize)]
struct GenerateResponse {
    prompt: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<Snippet>,
    #[serde(flatten)]
    rewards: Rewards,
}

#[derive(Serialize)]
struct ExplainResponse {
    explanation: String,
    #[serde(flatten)]
    rewards: Rewards,
}

#[derive(Serialize)]
struct TagsResponse {
    tags: Vec<String>,
    #[serde(flatten)]
    rewards: Rewards,
}

/// Handle `sophia ai`.
pub async fn handle(
    action: &AiCommands,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AiCommands::Generate(args) => generate(args, ctx, user, flags).await,
        AiCommands::Explain(source) => {
            let code = resolve_code(source, ctx, user).await?;
            let spinner = Progress::spinner("explaining code");
            let explanation = ctx.gemini()?.explain_code(&code).await;
            spinner.clear();
            let explanation = explanation?;

            let rewards: Rewards = ctx
                .service
                .record_activity(&user.id, Activity::AiExplanation, source.snippet.as_deref())
                .await?
                .into();
            output_with_text(
                &ExplainResponse {
                    rewards,
                    explanation: explanation.clone(),
                },
                &explanation,
                flags.format,
            )
        }
        AiCommands::Tags(source) => {
            let code = resolve_code(source, ctx, user).await?;
            let spinner = Progress::spinner("suggesting tags");
            let tags = ctx.gemini()?.suggest_tags(&code).await;
            spinner.clear();
            let tags = tags?;

            let rewards: Rewards = ctx
                .service
                .record_activity(&user.id, Activity::AiTagging, source.snippet.as_deref())
                .await?
                .into();
            let text = tags.join(", ");
            output_with_text(&TagsResponse { tags, rewards }, &text, flags.format)
        }
    }
}

async fn generate(
    args: &GenerateArgs,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let prompt = validation::ai_prompt(&args.prompt)?;
    let language = parse_language(&args.language)?;
    let gemini = ctx.gemini()?;

    let spinner = Progress::spinner("generating code");
    let code = gemini.generate_code(&prompt).await;
    spinner.clear();
    let code = code?;

    let mut rewards = Rewards::from(
        ctx.service
            .record_activity(&user.id, Activity::AiGeneration, None)
            .await?,
    );

    let saved = if args.save {
        let (snippet, outcome) = ctx
            .service
            .create_snippet(
                &user.id,
                NewSnippet {
                    title: args.title.clone().unwrap_or_else(|| title_from_prompt(&prompt)),
                    code: code.clone(),
                    description: Some(prompt.clone()),
                    language,
                    tags: None,
                    collection_id: args.collection.clone(),
                },
            )
            .await?;
        rewards.add(outcome);
        Some(embed_if_configured(ctx, &user.id, snippet, &mut rewards).await)
    } else {
        None
    };

    let text = code.clone();
    output_with_text(
        &GenerateResponse {
            prompt,
            code,
            saved,
            rewards,
        },
        &text,
        flags.format,
    )
}

/// Code from the flags, or the code of a saved snippet.
async fn resolve_code(
    source: &CodeSourceArgs,
    ctx: &AppContext,
    user: &User,
) -> anyhow::Result<String> {
    if let Some(id) = source.snippet.as_deref() {
        return Ok(ctx.service.get_snippet(&user.id, id).await?.code);
    }
    read_code(source.code.as_deref(), source.code_file.as_deref())
}

/// First line of the prompt, cut to fit a snippet title.
fn title_from_prompt(prompt: &str) -> String {
    let line = prompt.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= MAX_TITLE_LEN {
        return line.to_string();
    }
    let mut title = line.chars().take(MAX_TITLE_LEN - 1).collect::<String>();
    title.push('…');
    title
}
