use serde::Serialize;
use sophia_core::entities::{Collection, CollectionNode, User};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::subcommands::CollectionCommands;
use crate::commands::shared::rewards::Rewards;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CreatedCollection {
    collection: Collection,
    #[serde(flatten)]
    rewards: Rewards,
}

#[derive(Serialize)]
struct CollectionWithPath {
    collection: Collection,
    /// Names from the top level down to this collection.
    path: Vec<String>,
}

/// A tree node as one table row, indented by depth.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct TreeRow {
    name: String,
    id: String,
    snippets: u64,
    total_snippets: u64,
}

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: bool,
    id: &'a str,
}

/// Handle `sophia collection`.
pub async fn handle(
    action: &CollectionCommands,
    ctx: &AppContext,
    user: &User,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        CollectionCommands::Create { name, parent } => {
            let (collection, outcome) = svc
                .create_collection(&user.id, name, parent.as_deref())
                .await?;
            output(
                &CreatedCollection {
                    collection,
                    rewards: outcome.into(),
                },
                flags.format,
            )
        }
        CollectionCommands::Rename { id, name } => {
            let collection = svc.rename_collection(&user.id, id, name).await?;
            output(&collection, flags.format)
        }
        CollectionCommands::Move { id, parent, .. } => {
            let collection = svc.move_collection(&user.id, id, parent.as_deref()).await?;
            output(&collection, flags.format)
        }
        CollectionCommands::Delete { id } => {
            svc.delete_collection(&user.id, id).await?;
            output(&Deleted { deleted: true, id }, flags.format)
        }
        CollectionCommands::List => {
            let collections = svc.list_collections(&user.id).await?;
            output(&collections, flags.format)
        }
        CollectionCommands::Tree => {
            let tree = svc.collection_tree(&user.id).await?;
            if flags.format == OutputFormat::Table {
                output(&flatten_tree(&tree), flags.format)
            } else {
                output(&tree, flags.format)
            }
        }
        CollectionCommands::Get { id } => {
            let path = svc.collection_path(&user.id, id).await?;
            let names = path.iter().map(|c| c.name.clone()).collect();
            let collection = path
                .into_iter()
                .last()
                .ok_or_else(|| anyhow::anyhow!("collection {id} not found"))?;
            output(
                &CollectionWithPath {
                    collection,
                    path: names,
                },
                flags.format,
            )
        }
    }
}

fn flatten_tree(nodes: &[CollectionNode]) -> Vec<TreeRow> {
    fn walk(nodes: &[CollectionNode], depth: usize, rows: &mut Vec<TreeRow>) {
        for node in nodes {
            rows.push(TreeRow {
                name: format!("{}{}", "  ".repeat(depth), node.collection.name),
                id: node.collection.id.clone(),
                snippets: node.snippet_count,
                total_snippets: node.total_snippets(),
            });
            walk(&node.children, depth + 1, rows);
        }
    }

    let mut rows = Vec::new();
    walk(nodes, 0, &mut rows);
    rows
}
