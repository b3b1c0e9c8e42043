//! API key extraction

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::types::ApiError;
use crate::domain::sts::StsError;

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Extractor for the API key presented in the `X-API-Key` header
///
/// Only presence is checked here. The `Authorization` header is left alone
/// because it carries the STS token on verification requests.
#[derive(Clone)]
pub struct PresentedApiKey(pub String);

impl std::fmt::Debug for PresentedApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PresentedApiKey([hidden])")
    }
}

impl<S> FromRequestParts<S> for PresentedApiKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_api_key(&parts.headers).map(PresentedApiKey)
    }
}

/// Extract the API key from the `X-API-Key` header
pub fn extract_api_key(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(API_KEY_HEADER)
        .ok_or(StsError::MissingApiKey)?
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid X-API-Key header encoding"))?
        .trim();

    if value.is_empty() {
        return Err(StsError::MissingApiKey.into());
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};

    #[test]
    fn test_extract_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "key-abc".parse().unwrap());

        assert_eq!(extract_api_key(&headers).unwrap(), "key-abc");
    }

    #[test]
    fn test_trimmed_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "  key-abc  ".parse().unwrap());

        assert_eq!(extract_api_key(&headers).unwrap(), "key-abc");
    }

    #[test]
    fn test_missing_api_key() {
        let headers = HeaderMap::new();

        let err = extract_api_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.response.error.message, "X-API-Key header missing");
    }

    #[test]
    fn test_blank_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "   ".parse().unwrap());

        let err = extract_api_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bearer_is_not_an_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer key-abc".parse().unwrap());

        let err = extract_api_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_non_ascii_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_bytes(b"key-\xff").unwrap());

        let err = extract_api_key(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
