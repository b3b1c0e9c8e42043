//! Tenant identifier carried by STS tokens

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a tenant identifier
pub const MAX_TENANT_ID_LENGTH: usize = 128;

/// Errors that can occur during tenant ID validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TenantValidationError {
    #[error("Tenant ID cannot be empty")]
    Empty,

    #[error("Tenant ID exceeds maximum length of {0} characters")]
    TooLong(usize),

    #[error("Tenant ID contains a control character")]
    ControlCharacter,

    #[error("Tenant ID has leading or trailing whitespace")]
    SurroundingWhitespace,
}

/// Opaque tenant identifier resolved by the request layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Create a new TenantId after validation
    ///
    /// The value is kept verbatim; surrounding whitespace is rejected rather than trimmed.
    pub fn new(id: impl Into<String>) -> Result<Self, TenantValidationError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(TenantValidationError::Empty);
        }

        if id.trim() != id {
            return Err(TenantValidationError::SurroundingWhitespace);
        }

        if id.chars().count() > MAX_TENANT_ID_LENGTH {
            return Err(TenantValidationError::TooLong(MAX_TENANT_ID_LENGTH));
        }

        if id.chars().any(char::is_control) {
            return Err(TenantValidationError::ControlCharacter);
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantId {
    type Error = TenantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
