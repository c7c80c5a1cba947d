use sophia_config::SophiaConfig;

/// Emit warnings for settings that silently fell back to defaults.
pub fn warn_unconfigured(config: &SophiaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SophiaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if config.auth.uses_default_secret() {
        warnings.push(
            "auth.secret_key is the built-in default. Set SOPHIA_AUTH__SECRET_KEY (or SECRET_KEY) to a private value."
                .to_string(),
        );
    }

    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "SOPHIA_GEMINI") {
        warnings.push(
            "Gemini config appears default while SOPHIA_GEMINI* env vars exist. Use double underscores (example: SOPHIA_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if config.database.path.is_empty() && has_env_prefix(&env_keys, "SOPHIA_DATABASE") {
        warnings.push(
            "Database path appears default while SOPHIA_DATABASE* env vars exist. Use double underscores (example: SOPHIA_DATABASE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use sophia_config::{AuthConfig, DatabaseConfig, GeminiConfig, SophiaConfig};

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_default_secret_and_mistyped_env_keys() {
        let config = SophiaConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("SOPHIA_GEMINI_API_KEY", "typo"),
                ("SOPHIA_DATABASE_PATH", "/tmp/s.db"),
            ]),
        );

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("secret_key"));
        assert!(warnings[1].contains("SOPHIA_GEMINI__API_KEY"));
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let config = SophiaConfig {
            gemini: GeminiConfig {
                api_key: "key".to_string(),
                ..Default::default()
            },
            auth: AuthConfig {
                secret_key: "private".to_string(),
                ..Default::default()
            },
            database: DatabaseConfig {
                path: "/tmp/sophia.db".to_string(),
            },
            ..Default::default()
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("SOPHIA_GEMINI__API_KEY", "key"),
                ("SOPHIA_DATABASE__PATH", "/tmp/sophia.db"),
            ]),
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn default_secret_warns_even_without_env() {
        let warnings = collect_unconfigured_warnings(&SophiaConfig::default(), env(&[]));
        assert_eq!(warnings.len(), 1);
    }
}
