//! JWT-backed short-lived service token issuance and verification

use std::fmt::Debug;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use metrics::counter;
use tracing::{debug, warn};
use uuid::Uuid;

use super::fingerprint::api_key_fingerprint;
use crate::config::StsConfig;
use crate::domain::sts::{IssuedToken, ServiceTokenProvider, StsClaims, StsError, TenantId};

/// Signing algorithms accepted for STS tokens
const SUPPORTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Credentials used by the readiness self check
const SELF_CHECK_API_KEY: &str = "readiness-probe";
const SELF_CHECK_TENANT: &str = "readiness-probe";

/// Secrets shorter than this still work but trigger a startup warning
const RECOMMENDED_SECRET_LENGTH: usize = 32;

/// STS token service using a symmetric signing secret
#[derive(Clone)]
pub struct StsTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl_seconds: i64,
    leeway_seconds: u64,
    scope: String,
    audience: String,
}

impl Debug for StsTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StsTokenService")
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("scope", &self.scope)
            .field("audience", &self.audience)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl StsTokenService {
    /// Create the service from configuration
    ///
    /// Fails with `StsError::Configuration` when no usable signing secret is
    /// configured or any registration value is invalid.
    pub fn from_config(config: &StsConfig) -> Result<Self, StsError> {
        let secret = config
            .secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| StsError::configuration("STS signing secret is not configured"))?;

        let algorithm = parse_algorithm(&config.algorithm)?;

        if config.ttl_seconds == 0 {
            return Err(StsError::configuration(
                "STS token TTL must be greater than zero",
            ));
        }

        let ttl_seconds = i64::try_from(config.ttl_seconds)
            .map_err(|_| StsError::configuration("STS token TTL is out of range"))?;

        if config.scope.trim().is_empty() {
            return Err(StsError::configuration("STS scope cannot be empty"));
        }

        if config.audience.trim().is_empty() {
            return Err(StsError::configuration("STS audience cannot be empty"));
        }

        if secret.len() < RECOMMENDED_SECRET_LENGTH {
            warn!(
                recommended = RECOMMENDED_SECRET_LENGTH,
                "STS signing secret is shorter than recommended"
            );
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation: build_validation(algorithm),
            ttl_seconds,
            leeway_seconds: config.leeway_seconds,
            scope: config.scope.clone(),
            audience: config.audience.clone(),
        })
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        api_key: &str,
        tenant: &TenantId,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, StsError> {
        let issued = self.sign(api_key, tenant, now)?;

        counter!("sts_tokens_issued_total").increment(1);
        debug!(
            subject = %issued.claims().subject,
            tenant_id = %issued.claims().tenant_id,
            api_key = %api_key_fingerprint(api_key),
            expires_at = issued.claims().expires_at,
            "Issued STS token"
        );

        Ok(issued)
    }

    /// Verify a token as if the current time were `now`
    pub fn verify_at(
        &self,
        token: &str,
        api_key: &str,
        now: DateTime<Utc>,
    ) -> Result<StsClaims, StsError> {
        let result = self.check(token, api_key, now);

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.code(),
        };
        counter!("sts_verifications_total", "outcome" => outcome).increment(1);

        match &result {
            Err(e) if e.is_client_error() => debug!(
                reason = e.code(),
                api_key = %api_key_fingerprint(api_key),
                "STS token rejected"
            ),
            Err(e) => warn!(reason = e.code(), "STS token verification failed"),
            Ok(_) => {}
        }

        result
    }

    fn sign(
        &self,
        api_key: &str,
        tenant: &TenantId,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, StsError> {
        if api_key.trim().is_empty() {
            return Err(StsError::MissingApiKey);
        }

        let issued_at = now.timestamp();
        let claims = StsClaims {
            subject: Uuid::new_v4().to_string(),
            scope: self.scope.clone(),
            audience: self.audience.clone(),
            api_key: api_key.to_string(),
            tenant_id: tenant.as_str().to_string(),
            issued_at,
            expires_at: issued_at.saturating_add(self.ttl_seconds),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| StsError::signing(e.to_string()))?;

        Ok(IssuedToken::new(token, claims))
    }

    fn check(&self, token: &str, api_key: &str, now: DateTime<Utc>) -> Result<StsClaims, StsError> {
        let claims = self.decode_claims(token)?;

        if claims.is_expired_at(now, self.leeway_seconds) {
            return Err(StsError::TokenExpired);
        }

        if claims.scope != self.scope {
            return Err(StsError::ScopeMismatch);
        }

        if claims.audience != self.audience {
            return Err(StsError::AudienceMismatch);
        }

        if claims.api_key != api_key {
            return Err(StsError::ApiKeyMismatch);
        }

        Ok(claims)
    }

    fn decode_claims(&self, token: &str) -> Result<StsClaims, StsError> {
        decode::<StsClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "STS token failed signature or structure check");
                StsError::InvalidToken
            })
    }
}

impl ServiceTokenProvider for StsTokenService {
    fn issue(&self, api_key: &str, tenant: &TenantId) -> Result<IssuedToken, StsError> {
        self.issue_at(api_key, tenant, Utc::now())
    }

    fn verify(&self, token: &str, api_key: &str) -> Result<StsClaims, StsError> {
        self.verify_at(token, api_key, Utc::now())
    }

    fn self_check(&self) -> Result<(), StsError> {
        let tenant = TenantId::new(SELF_CHECK_TENANT)
            .map_err(|e| StsError::configuration(e.to_string()))?;
        let now = Utc::now();

        let issued = self.sign(SELF_CHECK_API_KEY, &tenant, now)?;
        self.check(issued.token(), SELF_CHECK_API_KEY, now).map(|_| ())
    }

    fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds.unsigned_abs()
    }

    fn scope(&self) -> &str {
        &self.scope
    }

    fn audience(&self) -> &str {
        &self.audience
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, StsError> {
    let algorithm = Algorithm::from_str(name.trim()).map_err(|_| {
        StsError::configuration(format!("Unknown STS signing algorithm: {}", name))
    })?;

    if !SUPPORTED_ALGORITHMS.contains(&algorithm) {
        return Err(StsError::configuration(format!(
            "Unsupported STS signing algorithm: {}. Use HS256, HS384 or HS512.",
            name
        )));
    }

    Ok(algorithm)
}

fn build_validation(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    // Expiry and audience are checked after decoding so each keeps its own error
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub", "aud"]);
    validation
}
