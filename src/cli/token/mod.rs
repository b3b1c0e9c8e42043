//! Token commands - issue and verify tokens without starting the server

use clap::Args;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::domain::sts::{IssuedToken, ServiceTokenProvider, StsClaims, TenantId};
use crate::infrastructure::auth::api_key_fingerprint;
use crate::infrastructure::logging::{self, LoggingConfig};

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// API key the token is bound to
    #[arg(long)]
    pub api_key: String,

    /// Tenant the token is issued for
    #[arg(long)]
    pub tenant: String,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Token to verify
    #[arg(long)]
    pub token: String,

    /// API key presented with the token
    #[arg(long)]
    pub api_key: String,
}

/// Issue a token and print it as JSON
pub fn issue(args: IssueArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let service = crate::create_token_service(&config)?;

    let tenant = TenantId::new(args.tenant)?;
    let issued = service.issue(&args.api_key, &tenant)?;

    println!("{}", serde_json::to_string_pretty(&issued_output(&issued))?);

    Ok(())
}

/// Verify a token and print its claims as JSON
pub fn verify(args: VerifyArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let service = crate::create_token_service(&config)?;

    let claims = service.verify(args.token.trim(), &args.api_key)?;

    println!("{}", serde_json::to_string_pretty(&verified_output(&claims))?);

    Ok(())
}

fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&LoggingConfig {
        level: "warn".to_string(),
        format: config.logging.format.clone(),
    });

    Ok(config)
}

fn issued_output(issued: &IssuedToken) -> Value {
    json!({
        "sts_token": issued.token(),
        "token_type": issued.token_type(),
        "expires_in": issued.expires_in(),
        "expires_at": issued.claims().expires_at_utc().map(|t| t.to_rfc3339()),
    })
}

/// The raw API key is only echoed as its fingerprint
fn verified_output(claims: &StsClaims) -> Value {
    json!({
        "subject": claims.subject,
        "scope": claims.scope,
        "audience": claims.audience,
        "tenant_id": claims.tenant_id,
        "api_key_fingerprint": api_key_fingerprint(&claims.api_key),
        "issued_at": claims.issued_at_utc().map(|t| t.to_rfc3339()),
        "expires_at": claims.expires_at_utc().map(|t| t.to_rfc3339()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StsConfig;
    use crate::infrastructure::auth::StsTokenService;

    fn issued() -> IssuedToken {
        let service =
            StsTokenService::from_config(&StsConfig::with_secret("cli-test-secret")).unwrap();
        service
            .issue("key-abc", &TenantId::new("tenant-1").unwrap())
            .unwrap()
    }

    #[test]
    fn test_issued_output_shape() {
        let issued = issued();
        let output = issued_output(&issued);

        assert_eq!(output["sts_token"], issued.token());
        assert_eq!(output["token_type"], "bearer");
        assert_eq!(output["expires_in"], 300);
        assert!(output["expires_at"].is_string());
    }

    #[test]
    fn test_verified_output_hides_api_key() {
        let issued = issued();
        let output = verified_output(issued.claims());
        let rendered = output.to_string();

        assert_eq!(output["tenant_id"], "tenant-1");
        assert_eq!(output["scope"], "chat");
        assert_eq!(output["audience"], "conversation-api");
        assert_eq!(
            output["api_key_fingerprint"],
            api_key_fingerprint("key-abc").as_str()
        );
        assert!(!rendered.contains("key-abc"));
    }
}
