//! Token provider abstraction

use std::fmt::Debug;

use super::{IssuedToken, StsClaims, StsError, TenantId};

/// Issues and verifies short-lived service tokens
///
/// Implementations are stateless: issuing never persists anything and
/// verification is a pure function of the token, the presented API key,
/// the current time and the provider's own registration.
pub trait ServiceTokenProvider: Send + Sync + Debug {
    /// Issue a token bound to `api_key` and `tenant`
    fn issue(&self, api_key: &str, tenant: &TenantId) -> Result<IssuedToken, StsError>;

    /// Verify a token presented together with `api_key`
    ///
    /// Checks run in order: signature, expiry, scope, audience, API key.
    /// The first failing check determines the error.
    fn verify(&self, token: &str, api_key: &str) -> Result<StsClaims, StsError>;

    /// Sign and verify a throwaway token without counting it as traffic
    fn self_check(&self) -> Result<(), StsError>;

    /// Token lifetime in seconds
    fn ttl_seconds(&self) -> u64;

    /// Scope stamped into every issued token
    fn scope(&self) -> &str;

    /// Audience stamped into every issued token
    fn audience(&self) -> &str;
}
