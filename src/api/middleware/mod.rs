//! API middleware and request extractors

pub mod api_key;
pub mod logging;
pub mod metrics;
pub mod security;
pub mod sts_auth;
pub mod tenant;

pub use api_key::{extract_api_key, PresentedApiKey, API_KEY_HEADER};
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
pub use security::security_headers_middleware;
pub use sts_auth::{extract_bearer_token, RequireStsToken};
pub use tenant::{extract_tenant, TenantContext};
