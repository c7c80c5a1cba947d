//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use sophia_config::SophiaConfig;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
per_page = 25

[database]
path = "./sophia-test.db"

[gemini]
api_key = "AIza-toml"
generation_model = "gemini-2.0-flash"
temperature = 0.2

[auth]
secret_key = "toml-secret"
pbkdf2_iterations = 1000

[gamification.points]
search = 4
"#,
        )?;

        let config: SophiaConfig = Figment::from(Serialized::defaults(SophiaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.per_page, 25);
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.database.path, "./sophia-test.db");
        assert!(config.gemini.is_configured());
        assert_eq!(config.gemini.generation_model, "gemini-2.0-flash");
        assert_eq!(config.gemini.embedding_model, "text-embedding-004");
        assert!((config.gemini.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.auth.pbkdf2_iterations, 1000);
        assert!(!config.auth.uses_default_secret());
        assert_eq!(config.gamification.points.search, 4);
        assert_eq!(config.gamification.points.snippet_created, 10);
        Ok(())
    });
}

#[test]
fn badge_list_replaces_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[[gamification.badges]]
slug = "night-owl"
name = "Night Owl"
description = "Ran fifty searches"
criteria = "search >= 50"
"#,
        )?;

        let config: SophiaConfig = Figment::from(Serialized::defaults(SophiaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.gamification.badges.len(), 1);
        assert_eq!(config.gamification.badges[0].slug, "night-owl");
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sophia")?;
        jail.create_file(
            ".sophia/config.toml",
            r#"
[general]
default_limit = 7
"#,
        )?;

        let config = SophiaConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}
