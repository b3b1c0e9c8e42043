//! Authentication infrastructure module
//!
//! This module provides short-lived service token issuance and verification.

mod fingerprint;
mod sts;

pub use fingerprint::api_key_fingerprint;
pub use sts::StsTokenService;
