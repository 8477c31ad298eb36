//! Password hashing and verification for note ownership
//!
//! Notes carry a single opaque credential that authorizes update and delete.
//! Passwords are stored as Argon2id hash strings, never plaintext; Argon2
//! verification also gives us a comparison that does not leak match length
//! through timing.

use crate::error::{AppError, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// Hash a password for storage.
///
/// An empty password is hashed like any other; a note created without a
/// password can then only be modified by supplying an empty password again.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(format!("hashing failed: {}", e)))
}

/// Check a supplied password against a stored hash.
///
/// Returns false on any mismatch, including an unparseable stored hash.
pub fn verify_password(provided: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(provided.as_bytes(), &parsed)
        .is_ok()
}
