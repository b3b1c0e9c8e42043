//! Tenant context extraction

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, HeaderName},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::sts::TenantId;

/// Tenant the current request executes under
///
/// Read from the header configured as `sts.tenant_header`.
#[derive(Debug, Clone)]
pub struct TenantContext(pub TenantId);

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        extract_tenant(&parts.headers, &state.tenant_header).map(TenantContext)
    }
}

pub fn extract_tenant(headers: &HeaderMap, header_name: &HeaderName) -> Result<TenantId, ApiError> {
    let value = headers
        .get(header_name)
        .ok_or_else(|| {
            ApiError::bad_request(format!("{} header missing", header_name))
                .with_code("missing_tenant")
        })?
        .to_str()
        .map_err(|_| {
            ApiError::bad_request(format!("Invalid {} header encoding", header_name))
                .with_code("invalid_tenant")
        })?;

    TenantId::new(value).map_err(|e| ApiError::bad_request(e.to_string()).with_code("invalid_tenant"))
}
