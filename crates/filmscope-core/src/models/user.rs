use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated user, as reported by the identity provider.
///
/// `uid` is the stable identifier that keys per-user state (favorites).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
}

/// A sign-in session issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub id_token: String,
    pub refresh_token: Option<String>,
    /// RFC 3339 expiry of `id_token`, if the provider reported one.
    pub expires_at: Option<String>,
}

impl AuthSession {
    /// Whether the session's token has expired as of `now`.
    ///
    /// A session without a recorded expiry is treated as still valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at.as_deref() {
            Some(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(expires) => expires.with_timezone(&Utc) <= now,
                Err(_) => true,
            },
            None => false,
        }
    }
}
