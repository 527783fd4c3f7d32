//! Salted-digest credential scheme: SHA-256 over password + salt, base64
//! encoded. Matches the stored format exactly; verification recomputes and
//! compares trimmed strings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Cryptographically secure random salt, base64 encoded.
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    BASE64.encode(salt)
}

pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Mismatched credentials return `false`, never an error.
pub fn verify_password(password: &str, stored_hash: &str, salt: &str) -> bool {
    hash_password(password, salt).trim() == stored_hash.trim()
}
