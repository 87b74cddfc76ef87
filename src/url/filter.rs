use regex::RegexSet;
use std::sync::OnceLock;

/// Denylist of URL patterns that are never worth fetching
///
/// This is configuration expressed as data: auth and session endpoints,
/// search/cart/checkout pages, static asset extensions, fragment markers,
/// and non-HTTP schemes. Matched case-insensitively anywhere in the URL.
const SKIP_PATTERNS: &[&str] = &[
    r"/login",
    r"/signin",
    r"/signup",
    r"/register",
    r"/search\?",
    r"/cart",
    r"/checkout",
    r"\.(pdf|jpg|jpeg|png|gif|svg|css|js|zip|tar|gz)$",
    r"#",
    r"mailto:",
    r"tel:",
];

fn skip_set() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| {
        RegexSet::new(SKIP_PATTERNS).expect("skip pattern table must compile")
    })
}

/// Checks whether a URL matches the skip denylist
///
/// # Examples
///
/// ```
/// use sitescribe::should_skip;
///
/// assert!(should_skip("http://example.com/login"));
/// assert!(should_skip("http://example.com/page.pdf"));
/// assert!(!should_skip("http://example.com/normal-page"));
/// ```
pub fn should_skip(url: &str) -> bool {
    skip_set().is_match(&url.to_lowercase())
}
