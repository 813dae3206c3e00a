//! Credential extraction and normalization.
//!
//! The token arrives in a header whose value may be a comma-separated list
//! (the WebSocket sub-protocol field): only the first entry counts, with
//! surrounding whitespace trimmed. No other validation is applied.

use sha2::{Digest, Sha256};

use crate::gateway::AuthRequest;

/// Hex characters of the SHA-256 digest kept in log fingerprints.
const FINGERPRINT_LEN: usize = 12;

/// Normalize a raw header value into a lookup key.
///
/// Returns `None` when the first entry is blank, which callers treat the
/// same as a missing credential.
pub fn normalize_token(raw: &str) -> Option<String> {
    let first = raw.split(',').next().unwrap_or_default().trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Extract the normalized token from a request.
///
/// The header lookup is case-insensitive because gateways differ on whether
/// they preserve header casing. When the header is absent the request's
/// single authorization-token field is used instead.
///
/// An exact-case match wins. Among several case variants the
/// lexicographically smallest name is used, so the choice never depends on
/// map iteration order.
pub fn extract_token(request: &AuthRequest, header_name: &str) -> Option<String> {
    let raw = header_value(request, header_name).or(request.authorization_token.as_deref())?;

    normalize_token(raw)
}

fn header_value<'a>(request: &'a AuthRequest, header_name: &str) -> Option<&'a str> {
    if let Some(value) = request.headers.get(header_name) {
        return Some(value.as_str());
    }

    request
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case(header_name))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, value)| value.as_str())
}

/// Short, non-reversible identifier for a token, safe to log.
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}
