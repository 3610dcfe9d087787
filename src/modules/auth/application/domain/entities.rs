use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Pending,
    Confirmed,
}

impl TokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::Pending => "pending",
            TokenStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TokenStatus::Pending),
            "confirmed" => Some(TokenStatus::Confirmed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailVerificationToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub status: TokenStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl EmailVerificationToken {
    /// A fresh pending token for `user_id`, valid for `ttl` from `now`.
    /// `None` when the expiry does not fit in a timestamp.
    pub fn issue(
        user_id: Uuid,
        token: String,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            status: TokenStatus::Pending,
            expires_at: now.checked_add_signed(ttl)?,
            created_at: now,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == TokenStatus::Confirmed
    }
}
