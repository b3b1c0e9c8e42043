//! Domain layer - Core token types and contracts

pub mod sts;

pub use sts::{
    IssuedToken, ServiceTokenProvider, StsClaims, StsError, TenantId, TenantValidationError,
    TOKEN_TYPE_BEARER,
};
