//! Syntactic URL validation

use url::Url;

/// True iff the candidate parses as an absolute URL with scheme and host
///
/// Validation is syntactic only; no normalization (trailing slashes,
/// casing) is performed and no network reachability check is made.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}
