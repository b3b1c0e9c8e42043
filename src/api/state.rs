//! Application state for shared services

use std::sync::Arc;

use axum::http::HeaderName;

use crate::domain::sts::ServiceTokenProvider;

/// Application state shared across handlers
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub sts_service: Arc<dyn ServiceTokenProvider>,
    /// Header the tenant identifier is read from
    pub tenant_header: HeaderName,
}

impl AppState {
    pub fn new(sts_service: Arc<dyn ServiceTokenProvider>, tenant_header: HeaderName) -> Self {
        Self {
            sts_service,
            tenant_header,
        }
    }
}
