use url::Url;

/// Checks whether a URL belongs to the same domain as the crawl's base URL
///
/// Two URLs are same-domain when their scheme, host, and port all match —
/// the equivalent of comparing network locations. Malformed input on either
/// side resolves to `false`; this function never fails.
///
/// # Examples
///
/// ```
/// use sitescribe::is_same_domain;
///
/// assert!(is_same_domain("http://example.com/page", "http://example.com"));
/// assert!(!is_same_domain("http://other.com/page", "http://example.com"));
/// ```
pub fn is_same_domain(url: &str, base_url: &str) -> bool {
    let (parsed, base) = match (Url::parse(url), Url::parse(base_url)) {
        (Ok(u), Ok(b)) => (u, b),
        _ => return false,
    };

    parsed.scheme() == base.scheme()
        && parsed.host_str() == base.host_str()
        && parsed.port_or_known_default() == base.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_domain() {
        assert!(is_same_domain("http://example.com/page", "http://example.com"));
    }

    #[test]
    fn test_different_domain() {
        assert!(!is_same_domain("http://other.com/page", "http://example.com"));
    }

    #[test]
    fn test_subdomain_is_different() {
        assert!(!is_same_domain(
            "http://blog.example.com/post",
            "http://example.com"
        ));
    }

    #[test]
    fn test_scheme_mismatch() {
        assert!(!is_same_domain("https://example.com/page", "http://example.com"));
    }

    #[test]
    fn test_explicit_port() {
        assert!(is_same_domain(
            "http://127.0.0.1:8080/page",
            "http://127.0.0.1:8080"
        ));
        assert!(!is_same_domain(
            "http://127.0.0.1:8080/page",
            "http://127.0.0.1:9090"
        ));
    }

    #[test]
    fn test_default_port_matches_explicit() {
        assert!(is_same_domain("http://example.com:80/page", "http://example.com"));
    }

    #[test]
    fn test_malformed_url_is_false() {
        assert!(!is_same_domain("not a url", "http://example.com"));
        assert!(!is_same_domain("http://example.com/page", "not a url"));
    }
}
