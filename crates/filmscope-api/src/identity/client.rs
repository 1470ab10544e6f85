use reqwest::Client;

use super::error::IdentityError;
use super::types::{ErrorResponse, TokenResponse};

const BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// REST client for the identity provider.
///
/// Every operation is a POST to an `accounts:<action>` endpoint keyed by
/// the project API key. Sign-out has no provider call; it is purely a
/// client-side session drop.
pub struct IdentityClient {
    api_key: String,
    http: Client,
}

impl IdentityClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Create an account and return its first session token.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, IdentityError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.post_json("signUp", &body).await
    }

    /// Exchange email/password credentials for a session token.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, IdentityError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.post_json("signInWithPassword", &body).await
    }

    /// Ask the provider to email a password-reset link.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let body = serde_json::json!({
            "requestType": "PASSWORD_RESET",
            "email": email,
        });
        let resp = self.post("sendOobCode", &body).await?;
        Self::check_response(resp).await?;
        Ok(())
    }

    /// Complete a password reset using the out-of-band code from the
    /// emailed link.
    pub async fn confirm_password_reset(
        &self,
        oob_code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let body = serde_json::json!({
            "oobCode": oob_code,
            "newPassword": new_password,
        });
        let resp = self.post("resetPassword", &body).await?;
        Self::check_response(resp).await?;
        Ok(())
    }

    async fn post(
        &self,
        action: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, IdentityError> {
        self.http
            .post(format!("{BASE_URL}/accounts:{action}"))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(Into::into)
    }

    async fn post_json(
        &self,
        action: &str,
        body: &serde_json::Value,
    ) -> Result<TokenResponse, IdentityError> {
        let resp = self.post(action, body).await?;
        let resp = Self::check_response(resp).await?;
        resp.json::<TokenResponse>()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))
    }

    /// Map non-success responses to the provider's error code.
    async fn check_response(
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, IdentityError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(envelope) => Err(IdentityError::Provider(envelope.error.message)),
            Err(_) => Err(IdentityError::Parse(body)),
        }
    }
}
