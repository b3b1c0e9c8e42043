//! Log-safe API key fingerprints

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a fingerprint
const FINGERPRINT_BYTES: usize = 6;

/// Short SHA-256 fingerprint of an API key, safe to write to logs
pub fn api_key_fingerprint(api_key: &str) -> String {
    let digest = Sha256::digest(api_key.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
