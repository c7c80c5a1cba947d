use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not logged in — run `sophia auth login`")]
    NotAuthenticated,

    #[error("session expired — run `sophia auth login`")]
    SessionExpired,

    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    #[error("random number generation failed: {0}")]
    Random(String),

    #[error("token store error: {0}")]
    TokenStore(String),
}
