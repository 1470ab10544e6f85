use thiserror::Error;

/// Errors from the identity provider client.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider rejected the request; payload is the provider's error code
    /// (e.g. `EMAIL_NOT_FOUND`, sometimes followed by detail text).
    #[error("provider error: {0}")]
    Provider(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl IdentityError {
    /// Fixed user-facing message for this error.
    ///
    /// Unmapped provider codes fall back to the generic message rather than
    /// leaking raw codes to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Http(_) => "Network error. Please try again later.",
            Self::Provider(code) => match code_root(code) {
                "EMAIL_NOT_FOUND" => "No user found with this email.",
                "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => "Incorrect password.",
                "INVALID_EMAIL" => "Please enter a valid email address.",
                "EMAIL_EXISTS" => "An account with this email already exists.",
                "EXPIRED_OOB_CODE" | "INVALID_OOB_CODE" => "Invalid or expired link.",
                _ => "An error occurred. Please try again.",
            },
            Self::Parse(_) => "An error occurred. Please try again.",
        }
    }
}

/// Provider codes may carry trailing detail ("WEAK_PASSWORD : Password
/// should be at least 6 characters"); match on the leading token.
fn code_root(code: &str) -> &str {
    code.split([' ', ':']).next().unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(code: &str) -> IdentityError {
        IdentityError::Provider(code.into())
    }

    #[test]
    fn test_fixed_message_table() {
        assert_eq!(
            provider("EMAIL_NOT_FOUND").user_message(),
            "No user found with this email."
        );
        assert_eq!(provider("INVALID_PASSWORD").user_message(), "Incorrect password.");
        assert_eq!(
            provider("INVALID_LOGIN_CREDENTIALS").user_message(),
            "Incorrect password."
        );
        assert_eq!(
            provider("INVALID_EMAIL").user_message(),
            "Please enter a valid email address."
        );
        assert_eq!(
            provider("EMAIL_EXISTS").user_message(),
            "An account with this email already exists."
        );
        assert_eq!(
            provider("EXPIRED_OOB_CODE").user_message(),
            "Invalid or expired link."
        );
    }

    #[test]
    fn test_unmapped_code_falls_back() {
        assert_eq!(
            provider("USER_DISABLED").user_message(),
            "An error occurred. Please try again."
        );
    }

    #[test]
    fn test_code_with_detail_text() {
        assert_eq!(
            provider("WEAK_PASSWORD : Password should be at least 6 characters")
                .user_message(),
            "An error occurred. Please try again."
        );
    }
}
