pub mod ai;
pub mod auth;
pub mod badge;
pub mod collection;
pub mod dispatch;
pub mod index;
pub mod profile;
pub mod search;
pub mod shared;
pub mod snippet;
