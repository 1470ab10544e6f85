use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use filmscope_core::models::{AuthSession, AuthUser};

/// Token payload returned by sign-up and sign-in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub local_id: String,
    pub email: Option<String>,
    pub id_token: String,
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds; the provider sends it as a string.
    pub expires_in: Option<String>,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> AuthSession {
        let expires_at = self
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .map(|secs| (now + Duration::seconds(secs)).to_rfc3339());

        AuthSession {
            user: AuthUser {
                uid: self.local_id,
                email: self.email,
            },
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

/// Error envelope: `{"error": {"code": 400, "message": "EMAIL_NOT_FOUND"}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_token_response() {
        let json = r#"{
            "localId": "x9f8g7h6",
            "email": "user@example.com",
            "idToken": "eyJhbGciOi...",
            "refreshToken": "AMf-vBw...",
            "expiresIn": "3600"
        }"#;

        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.local_id, "x9f8g7h6");

        let now = Utc::now();
        let session = token.into_session(now);
        assert_eq!(session.user.uid, "x9f8g7h6");
        assert_eq!(session.user.email.as_deref(), Some("user@example.com"));
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::seconds(3601)));
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "EMAIL_NOT_FOUND",
                "errors": [{"message": "EMAIL_NOT_FOUND", "domain": "global", "reason": "invalid"}]
            }
        }"#;

        let resp: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.error.message, "EMAIL_NOT_FOUND");
    }
}
