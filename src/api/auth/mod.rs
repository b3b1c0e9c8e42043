//! Plugin STS endpoints
//!
//! Issues short-lived chat tokens to plugin clients and lets downstream
//! services check a token against the API key presented with it.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::{PresentedApiKey, RequireStsToken, TenantContext};
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::sts::{IssuedToken, StsClaims};
use crate::infrastructure::auth::api_key_fingerprint;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/plugin-stst", post(issue_plugin_token))
        .route("/plugin-stst/verify", get(verify_plugin_token))
}

/// Token issuance response
#[derive(Debug, Serialize, Deserialize)]
pub struct StsTokenResponse {
    pub sts_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl StsTokenResponse {
    fn from_issued(issued: IssuedToken) -> Self {
        let token_type = issued.token_type().to_string();
        let expires_in = issued.expires_in();
        let expires_at = issued.claims().expires_at_utc().map(|t| t.to_rfc3339());

        Self {
            sts_token: issued.into_token(),
            token_type,
            expires_in,
            expires_at,
        }
    }
}

/// Verified claims (safe to expose)
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifiedTokenResponse {
    pub subject: String,
    pub scope: String,
    pub audience: String,
    pub tenant_id: String,
    pub api_key_fingerprint: String,
    pub issued_at: Option<String>,
    pub expires_at: Option<String>,
}

impl VerifiedTokenResponse {
    fn from_claims(claims: &StsClaims) -> Self {
        Self {
            subject: claims.subject.clone(),
            scope: claims.scope.clone(),
            audience: claims.audience.clone(),
            tenant_id: claims.tenant_id.clone(),
            api_key_fingerprint: api_key_fingerprint(&claims.api_key),
            issued_at: claims.issued_at_utc().map(|t| t.to_rfc3339()),
            expires_at: claims.expires_at_utc().map(|t| t.to_rfc3339()),
        }
    }
}

/// Issue a short-lived chat token
///
/// POST /auth/plugin-stst
///
/// Requires `X-API-Key` and the tenant header. Scope and audience are fixed
/// by configuration and cannot be requested.
pub async fn issue_plugin_token(
    State(state): State<AppState>,
    PresentedApiKey(api_key): PresentedApiKey,
    TenantContext(tenant): TenantContext,
) -> Result<Json<StsTokenResponse>, ApiError> {
    let issued = state.sts_service.issue(&api_key, &tenant)?;

    info!(
        tenant_id = %tenant,
        subject = %issued.claims().subject,
        api_key = %api_key_fingerprint(&api_key),
        "Issued plugin STS token"
    );

    Ok(Json(StsTokenResponse::from_issued(issued)))
}

/// Verify an STS token
///
/// GET /auth/plugin-stst/verify
///
/// Requires `Authorization: Bearer <sts_token>` and the `X-API-Key` the
/// token was issued for.
pub async fn verify_plugin_token(
    RequireStsToken(claims): RequireStsToken,
) -> Result<Json<VerifiedTokenResponse>, ApiError> {
    Ok(Json(VerifiedTokenResponse::from_claims(&claims)))
}
