//! Repository modules implementing the operations on Sophia's entities.
//!
//! Each module adds methods to `SophiaService` via `impl SophiaService` blocks.

pub mod collection;
pub mod embedding;
pub mod gamification;
pub mod session;
pub mod snippet;
pub mod user;
