use anyhow::Context;
use sophia_ai::GeminiClient;
use sophia_auth::AuthError;
use sophia_config::SophiaConfig;
use sophia_core::entities::User;
use sophia_db::SophiaService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: SophiaService,
    pub config: SophiaConfig,
    gemini: Option<GeminiClient>,
}

impl AppContext {
    /// Open the database and build the Gemini client when a key is configured.
    pub async fn init(config: SophiaConfig) -> anyhow::Result<Self> {
        let db_path = config.database.resolved_path().context(
            "no data directory on this platform; set SOPHIA_DATABASE__PATH to choose a database file",
        )?;
        let db_path_str = db_path.to_string_lossy();

        let service = SophiaService::new_local(&db_path_str, &config)
            .await
            .with_context(|| format!("failed to open sophia database at {db_path_str}"))?;

        match service.purge_expired_sessions().await {
            Ok(0) => {}
            Ok(purged) => tracing::debug!(purged, "removed expired sessions"),
            Err(error) => tracing::warn!(%error, "failed to purge expired sessions"),
        }

        let gemini = if config.gemini.is_configured() {
            Some(GeminiClient::new(&config.gemini).context("failed to build Gemini client")?)
        } else {
            tracing::debug!("Gemini API key not set; AI commands and semantic search are disabled");
            None
        };

        Ok(Self {
            service,
            config,
            gemini,
        })
    }

    /// The Gemini client, or an error explaining how to configure one.
    pub fn gemini(&self) -> anyhow::Result<&GeminiClient> {
        self.gemini
            .as_ref()
            .ok_or_else(|| anyhow::Error::new(sophia_ai::AiError::NotConfigured))
    }

    #[must_use]
    pub const fn has_gemini(&self) -> bool {
        self.gemini.is_some()
    }

    /// Resolve the stored session token to its user.
    pub async fn require_user(&self) -> anyhow::Result<User> {
        let token = sophia_auth::resolve_token().ok_or(AuthError::NotAuthenticated)?;
        let user = self
            .service
            .resolve_session(&token)
            .await
            .context("failed to look up session")?
            .ok_or(AuthError::SessionExpired)?;
        tracing::debug!(user_id = %user.id, "session resolved");
        Ok(user)
    }
}
