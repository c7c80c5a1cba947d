//! Entity structs for all Sophia domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `sophia-db/migrations/001_initial.sql`). All structs derive `Serialize`
//! and `Deserialize` for JSON output and roundtrip tests.

mod activity;
mod badge;
mod collection;
mod page;
mod snippet;
mod user;

pub use activity::{ActivityEntry, ActivityOutcome, ActivityStats, UserProfile};
pub use badge::{AwardedBadge, Badge};
pub use collection::{Collection, CollectionNode};
pub use page::Page;
pub use snippet::{NewSnippet, ScoredSnippet, Snippet};
pub use user::User;
