//! Application configuration constants
//!
//! Central location for resource limits and validation boundaries
//! used throughout the crate.

use std::time::Duration;

// ===== Note Content Limits =====

/// Minimum accepted note length in characters.
/// Shorter submissions are rejected; the bound does not apply to the
/// delete-via-empty-update path.
pub const MIN_TEXT_LEN: usize = 10;

/// Maximum accepted note length in characters
pub const MAX_TEXT_LEN: usize = 50_000;

// ===== Identifier Allocation =====

/// Length of generated note identifiers
pub const ID_LENGTH: usize = 8;

/// Maximum length accepted for a client-supplied identifier
pub const MAX_ID_LENGTH: usize = 64;

/// Alphabet for generated identifiers. Alphanumeric only, so every
/// identifier is usable as a URL path segment without escaping.
pub const ID_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// How many random identifiers to try before giving up on allocation
pub const MAX_ID_ATTEMPTS: u32 = 5;

// ===== View Aggregation =====

/// Interval between view-count flush cycles
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(30);

// ===== Storage =====

/// Default deadline for request-scoped storage operations
pub const STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection pool size for the application database
pub const DB_MAX_CONNECTIONS: u32 = 5;
