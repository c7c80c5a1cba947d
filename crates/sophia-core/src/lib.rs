//! # sophia-core
//!
//! Core types, ID prefixes, validation, and error types for Sophia.
//!
//! This crate provides the foundational types shared across all Sophia crates:
//! - Entity structs for users, collections, snippets, badges, and activity
//! - Enums for languages, activities, and embedding task types
//! - ID prefix constants
//! - Input validation mirroring the registration, login, snippet, prompt,
//!   and collection forms
//! - Tag normalisation
//! - Gamification rules: point tables and badge criteria parsing

pub mod entities;
pub mod enums;
pub mod errors;
pub mod gamification;
pub mod ids;
pub mod tags;
pub mod validation;
