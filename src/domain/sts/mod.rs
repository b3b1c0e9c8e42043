//! Short-lived service tokens (STS)
//!
//! Scoped, audience-bound tokens minted for plugin clients. Each token is bound
//! to the API key that requested it and to the tenant the request executed under.

mod claims;
mod error;
mod provider;
mod tenant;

pub use claims::{IssuedToken, StsClaims, TOKEN_TYPE_BEARER};
pub use error::StsError;
pub use provider::ServiceTokenProvider;
pub use tenant::{TenantId, TenantValidationError};
