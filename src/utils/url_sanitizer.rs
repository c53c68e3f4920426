//! URL validation and canonicalization for submitted long URLs.

use url::Url;

/// Errors that can occur while sanitizing a submitted URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlSanitizeError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedScheme,
}

/// Validates a candidate URL and returns its canonical re-serialization.
///
/// The input must parse as an absolute URI with an `http` or `https` scheme;
/// everything else is rejected (including `javascript:`, `data:`, `file:`).
/// The output is whatever the parser produces canonically, which may differ
/// byte-for-byte from the input (lowercased host, dropped default port,
/// normalized escaping). No further normalization is applied, with one
/// cosmetic exception: a bare "/" path with no query or fragment is trimmed
/// so that `https://example.com` round-trips unchanged.
///
/// Sanitization is idempotent: re-sanitizing an already sanitized URL yields
/// the same string.
pub fn sanitize_url(input: &str) -> Result<String, UrlSanitizeError> {
    let url = Url::parse(input).map_err(|e| UrlSanitizeError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlSanitizeError::UnsupportedScheme),
    }

    let mut serialized = url.to_string();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        serialized.pop();
    }

    Ok(serialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_simple_https() {
        assert_eq!(
            sanitize_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_sanitize_simple_http() {
        assert_eq!(
            sanitize_url("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_sanitize_trailing_slash_trimmed() {
        assert_eq!(
            sanitize_url("https://example.com/").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_sanitize_preserves_path_and_query() {
        assert_eq!(
            sanitize_url("https://example.com/search?q=rust&lang=en").unwrap(),
            "https://example.com/search?q=rust&lang=en"
        );
    }

    #[test]
    fn test_sanitize_canonicalizes_host_case() {
        assert_eq!(
            sanitize_url("https://EXAMPLE.COM/Path").unwrap(),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_sanitize_drops_default_port() {
        assert_eq!(
            sanitize_url("https://example.com:443/path").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_sanitize_keeps_custom_port() {
        assert_eq!(
            sanitize_url("http://example.com:8080/api").unwrap(),
            "http://example.com:8080/api"
        );
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [
            "https://example.com",
            "https://example.com/",
            "HTTP://EXAMPLE.COM:80/A b?x=1#frag",
            "https://example.com/path%20with%20spaces",
            "http://192.168.1.1:8080/api",
        ] {
            let once = sanitize_url(input).unwrap();
            let twice = sanitize_url(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_sanitize_rejects_relative() {
        assert!(matches!(
            sanitize_url("example.com/page"),
            Err(UrlSanitizeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_sanitize_rejects_empty() {
        assert!(matches!(
            sanitize_url(""),
            Err(UrlSanitizeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_sanitize_rejects_non_http_schemes() {
        for input in [
            "ftp://example.com/file.txt",
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "file:///etc/passwd",
            "mailto:test@example.com",
        ] {
            assert!(
                matches!(sanitize_url(input), Err(UrlSanitizeError::UnsupportedScheme)),
                "accepted {input}"
            );
        }
    }
}
