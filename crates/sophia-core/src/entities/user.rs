use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The password hash never leaves `sophia-db`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
