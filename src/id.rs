//! Note identifier generation and validation
//!
//! Identifiers are short random strings over a URL-safe alphabet. Uniqueness
//! is enforced by the repository, which checks for collisions inside the
//! insert transaction and retries a bounded number of times.

use crate::config::{ID_ALPHABET, MAX_ID_LENGTH};
use crate::error::{AppError, Result};
use rand::Rng;

/// Generate a random identifier of the given length
pub fn generate(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ID_ALPHABET.len());
            ID_ALPHABET[idx] as char
        })
        .collect()
}

/// Validate a client-supplied identifier.
///
/// Accepts non-empty strings of ASCII alphanumerics plus `-` and `_`,
/// so every accepted identifier is a valid URL path segment.
pub fn validate(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(AppError::InvalidInput("empty identifier".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "identifier longer than {} characters",
            MAX_ID_LENGTH
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidInput(format!(
            "identifier {:?} contains non-URL-safe characters",
            id
        )));
    }
    Ok(())
}
