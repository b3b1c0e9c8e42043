//! STS token claims

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token type reported alongside every issued token
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Claims carried by an STS token
///
/// Field names on the wire follow the registered JWT claim names
/// (`sub`, `aud`, `iat`, `exp`). Every field is required.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StsClaims {
    /// Unique identifier of this token instance
    #[serde(rename = "sub")]
    pub subject: String,
    /// Capability the token grants
    pub scope: String,
    /// Service the token is intended for
    #[serde(rename = "aud")]
    pub audience: String,
    /// API key that requested the token
    pub api_key: String,
    /// Tenant the token may act on
    pub tenant_id: String,
    /// Issued at timestamp (Unix epoch)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration timestamp (Unix epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl StsClaims {
    /// Check whether the token is expired at `now`, allowing `leeway_seconds` of skew
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: u64) -> bool {
        let leeway = i64::try_from(leeway_seconds).unwrap_or(i64::MAX);
        now.timestamp() >= self.expires_at.saturating_add(leeway)
    }

    /// Lifetime of the token in seconds
    pub fn lifetime_seconds(&self) -> i64 {
        self.expires_at - self.issued_at
    }

    pub fn issued_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.issued_at, 0)
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

impl fmt::Debug for StsClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StsClaims")
            .field("subject", &self.subject)
            .field("scope", &self.scope)
            .field("audience", &self.audience)
            .field("api_key", &"[hidden]")
            .field("tenant_id", &self.tenant_id)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A freshly signed token together with the claims it encodes
#[derive(Clone)]
pub struct IssuedToken {
    token: String,
    claims: StsClaims,
}

impl IssuedToken {
    pub fn new(token: impl Into<String>, claims: StsClaims) -> Self {
        Self {
            token: token.into(),
            claims,
        }
    }

    /// The signed, encoded token
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &StsClaims {
        &self.claims
    }

    pub fn token_type(&self) -> &'static str {
        TOKEN_TYPE_BEARER
    }

    /// Seconds until the token expires, measured from issuance
    pub fn expires_in(&self) -> i64 {
        self.claims.lifetime_seconds()
    }

    pub fn into_token(self) -> String {
        self.token
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[hidden]")
            .field("claims", &self.claims)
            .finish()
    }
}
