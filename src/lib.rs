//! Plugin STS
//!
//! Short-lived service token issuance and verification:
//! - Tokens scoped to a single capability and audience
//! - Bound to the requesting API key and tenant
//! - Stateless HMAC-signed JWTs with a fixed, process-wide lifetime

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use axum::http::HeaderName;
use tracing::info;

use api::state::AppState;
use domain::sts::ServiceTokenProvider;
use infrastructure::auth::StsTokenService;

/// Build the token service from configuration
///
/// A missing signing secret is fatal: callers must not start serving without one.
pub fn create_token_service(config: &AppConfig) -> anyhow::Result<StsTokenService> {
    let service = StsTokenService::from_config(&config.sts)?;

    info!(
        algorithm = %config.sts.algorithm,
        ttl_seconds = service.ttl_seconds(),
        scope = %service.scope(),
        audience = %service.audience(),
        "STS token service initialized"
    );

    Ok(service)
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let sts_service = create_token_service(config)?;

    let tenant_header =
        HeaderName::from_bytes(config.sts.tenant_header.trim().to_ascii_lowercase().as_bytes())
            .map_err(|e| {
                anyhow::anyhow!(
                    "Invalid tenant header name '{}': {}",
                    config.sts.tenant_header,
                    e
                )
            })?;

    Ok(AppState::new(Arc::new(sts_service), tenant_header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StsConfig;

    #[test]
    fn test_state_requires_secret() {
        let config = AppConfig::default();

        let err = create_app_state_with_config(&config).err().unwrap();
        assert!(err.to_string().contains("signing secret is not configured"));
    }

    #[test]
    fn test_state_with_secret() {
        let config = AppConfig {
            sts: StsConfig {
                tenant_header: "X-Org-Id".to_string(),
                ..StsConfig::with_secret("state-test-secret-0123456789abcdef")
            },
            ..AppConfig::default()
        };

        let state = create_app_state_with_config(&config).unwrap();
        assert_eq!(state.tenant_header.as_str(), "x-org-id");
        assert_eq!(state.sts_service.audience(), "conversation-api");
    }

    #[test]
    fn test_invalid_tenant_header() {
        let config = AppConfig {
            sts: StsConfig {
                tenant_header: "bad header".to_string(),
                ..StsConfig::with_secret("state-test-secret-0123456789abcdef")
            },
            ..AppConfig::default()
        };

        assert!(create_app_state_with_config(&config).is_err());
    }
}
