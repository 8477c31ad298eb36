//! Fraud classification for note content
//!
//! A pure, deterministic check over a note's text, cheap enough to run on
//! every read. A flagged note is still served in rendered form; only raw
//! export is refused. Classification does no I/O and keeps no state.

use crate::database::Note;

/// Phrases that mark a note as a likely scam or phishing payload.
/// Matching is case-insensitive substring search.
const DEFAULT_SIGNATURES: &[&str] = &[
    "western union",
    "wire transfer immediately",
    "gift card code",
    "seed phrase",
    "recovery phrase",
    "double your bitcoin",
    "your account will be suspended",
    "verify your password at",
    "claim your prize",
];

/// A note body carrying more links than this is treated as link spam.
const MAX_LINKS: usize = 30;

/// Classifies note content against local spam/abuse heuristics
#[derive(Clone)]
pub struct FraudDetector {
    signatures: Vec<String>,
}

impl FraudDetector {
    pub fn new() -> Self {
        Self::with_signatures(DEFAULT_SIGNATURES.iter().map(|s| s.to_string()).collect())
    }

    /// Build a detector with a custom signature list. Signatures are
    /// matched lowercased.
    pub fn with_signatures(signatures: Vec<String>) -> Self {
        Self {
            signatures: signatures.into_iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Whether this note's content looks fraudulent
    pub fn is_fraud(&self, note: &Note) -> bool {
        let text = note.text.to_lowercase();

        if self.signatures.iter().any(|sig| text.contains(sig)) {
            return true;
        }

        let links = text.matches("http://").count() + text.matches("https://").count();
        links > MAX_LINKS
    }
}

impl Default for FraudDetector {
    fn default() -> Self {
        Self::new()
    }
}
