use std::fmt;

use serde::Deserialize;

use crate::infrastructure::observability::ObservabilityConfig;

/// Environment variable consulted when `sts.secret` is not configured
pub const LEGACY_SECRET_ENV: &str = "JWT_SECRET_KEY";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sts: StsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Short-lived service token settings
///
/// Everything here is process-wide; none of it can be influenced by a request.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct StsConfig {
    /// Symmetric signing secret
    pub secret: Option<String>,
    /// HMAC algorithm name (HS256, HS384 or HS512)
    pub algorithm: String,
    /// Token lifetime in seconds
    pub ttl_seconds: u64,
    /// Clock skew tolerated when checking expiry
    pub leeway_seconds: u64,
    /// Scope stamped into issued tokens and required at verification
    pub scope: String,
    /// Audience stamped into issued tokens and required at verification
    pub audience: String,
    /// Request header carrying the tenant identifier
    pub tenant_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StsConfig {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: "HS256".to_string(),
            ttl_seconds: 300,
            leeway_seconds: 0,
            scope: "chat".to_string(),
            audience: "conversation-api".to_string(),
            tenant_header: "x-tenant-id".to_string(),
        }
    }
}

impl StsConfig {
    /// Default settings with the given signing secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            ..Self::default()
        }
    }
}

impl fmt::Debug for StsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StsConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[hidden]"))
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("scope", &self.scope)
            .field("audience", &self.audience)
            .field("tenant_header", &self.tenant_header)
            .finish()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.sts.secret.is_none() {
            app_config.sts.secret = std::env::var(LEGACY_SECRET_ENV).ok();
        }

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sts_defaults() {
        let config = StsConfig::default();

        assert!(config.secret.is_none());
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.ttl_seconds, 300);
        assert_eq!(config.leeway_seconds, 0);
        assert_eq!(config.scope, "chat");
        assert_eq!(config.audience, "conversation-api");
        assert_eq!(config.tenant_header, "x-tenant-id");
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = StsConfig::with_secret("super-secret-value");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[hidden]"));
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [sts]
                secret = "from-file"
                ttl_seconds = 60

                [server]
                port = 9090
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let app_config: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(app_config.sts.secret.as_deref(), Some("from-file"));
        assert_eq!(app_config.sts.ttl_seconds, 60);
        assert_eq!(app_config.sts.audience, "conversation-api");
        assert_eq!(app_config.server.port, 9090);
        assert_eq!(app_config.server.host, "0.0.0.0");
        assert_eq!(app_config.logging.level, "info");
    }
}
