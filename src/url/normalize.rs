use url::Url;

/// Normalizes a URL for frontier identity
///
/// # Normalization Steps
///
/// 1. Remove the fragment (everything after `#`)
/// 2. Remove a single trailing slash from the path, unless the path is the
///    root (`/`)
///
/// The function is idempotent: `normalize_url(&normalize_url(u)) ==
/// normalize_url(u)`. It never fails — input the `url` crate cannot parse
/// is normalized at the string level instead, so the frontier can hold any
/// href it encounters without special-casing.
///
/// # Examples
///
/// ```
/// use sitescribe::normalize_url;
///
/// assert_eq!(normalize_url("http://example.com/page/"), "http://example.com/page");
/// assert_eq!(normalize_url("http://example.com/page#section"), "http://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) => {
            url.set_fragment(None);

            let path = url.path().to_string();
            if path.len() > 1 && path.ends_with('/') {
                url.set_path(path.trim_end_matches('/'));
            }

            url.to_string()
        }
        Err(_) => normalize_fallback(url_str),
    }
}

/// String-level normalization for inputs the `url` crate rejects
fn normalize_fallback(url_str: &str) -> String {
    let without_fragment = match url_str.split_once('#') {
        Some((before, _)) => before,
        None => url_str,
    };

    let trimmed = without_fragment.trim_end_matches('/');
    if trimmed.is_empty() {
        without_fragment.to_string()
    } else {
        trimmed.to_string()
    }
}
