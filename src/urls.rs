//! URL helpers shared by the ledger and the redirector.

use url::Url;

/// Extracts the hostname from a URL string.
///
/// Falls back to the raw input when parsing fails or the URL has no host
/// (e.g. `about:blank`), so callers always get a comparable string.
pub fn hostname_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}
