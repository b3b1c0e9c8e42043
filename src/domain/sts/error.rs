use thiserror::Error;

/// Errors raised while issuing or verifying STS tokens
///
/// Messages never include the signing secret or the raw API key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StsError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("X-API-Key header missing")]
    MissingApiKey,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid scope")]
    ScopeMismatch,

    #[error("Invalid audience")]
    AudienceMismatch,

    #[error("API key mismatch")]
    ApiKeyMismatch,

    #[error("Failed to sign token: {message}")]
    Signing { message: String },
}

impl StsError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Stable machine-readable code, used in API responses and metric labels
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration_error",
            Self::MissingApiKey => "missing_api_key",
            Self::InvalidToken => "invalid_token",
            Self::TokenExpired => "token_expired",
            Self::ScopeMismatch => "scope_mismatch",
            Self::AudienceMismatch => "audience_mismatch",
            Self::ApiKeyMismatch => "api_key_mismatch",
            Self::Signing { .. } => "signing_error",
        }
    }

    /// Whether the error was caused by the caller rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Configuration { .. } | Self::Signing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let error = StsError::configuration("STS signing secret is not configured");
        assert_eq!(
            error.to_string(),
            "Configuration error: STS signing secret is not configured"
        );
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_messages_match_wire_details() {
        assert_eq!(StsError::MissingApiKey.to_string(), "X-API-Key header missing");
        assert_eq!(StsError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(StsError::TokenExpired.to_string(), "Token expired");
        assert_eq!(StsError::ScopeMismatch.to_string(), "Invalid scope");
        assert_eq!(StsError::AudienceMismatch.to_string(), "Invalid audience");
        assert_eq!(StsError::ApiKeyMismatch.to_string(), "API key mismatch");
    }

    #[test]
    fn test_client_errors() {
        for error in [
            StsError::MissingApiKey,
            StsError::InvalidToken,
            StsError::TokenExpired,
            StsError::ScopeMismatch,
            StsError::AudienceMismatch,
            StsError::ApiKeyMismatch,
        ] {
            assert!(error.is_client_error(), "{} should be a client error", error);
        }

        assert!(!StsError::signing("boom").is_client_error());
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            StsError::configuration("x").code(),
            StsError::MissingApiKey.code(),
            StsError::InvalidToken.code(),
            StsError::TokenExpired.code(),
            StsError::ScopeMismatch.code(),
            StsError::AudienceMismatch.code(),
            StsError::ApiKeyMismatch.code(),
            StsError::signing("x").code(),
        ];

        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
