mod ai;
mod auth;
mod badge;
mod collection;
mod snippet;

pub use ai::{AiCommands, CodeSourceArgs, GenerateArgs};
pub use auth::{AuthCommands, LoginArgs, RegisterArgs};
pub use badge::BadgeCommands;
pub use collection::CollectionCommands;
pub use snippet::{CreateSnippetArgs, ListSnippetArgs, SnippetCommands, UpdateSnippetArgs};
