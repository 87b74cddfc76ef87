//! HTML parsing for link discovery
//!
//! Phase 1 only needs two things from a page: the hrefs to feed the
//! frontier and a title for progress logs. Content extraction proper lives
//! in the transform pipeline.

use scraper::{Html, Selector};

/// Extracted information from an HTML page during discovery
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from the `<title>` tag)
    pub title: Option<String>,

    /// Candidate hrefs, raw and possibly relative
    pub links: Vec<String>,
}

/// Parses HTML content and extracts the title and candidate links
///
/// Returned hrefs are raw (possibly relative); the frontier resolves them
/// against the page URL. Links that can never become crawlable are dropped
/// here:
/// - `javascript:` and `data:` schemes
/// - fragment-only anchors (`#...`)
/// - `<a ... download>` targets
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document),
    }
}

/// Convenience wrapper for callers that only want the links
pub fn extract_links_simple(html: &str) -> Vec<String> {
    parse_page(html).links
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn extract_links(document: &Html) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();

            if href.is_empty()
                || href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("data:")
            {
                continue;
            }

            links.push(href.to_string());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        assert_eq!(parse_page(html).title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_extract_title_with_whitespace() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        assert_eq!(parse_page(html).title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body></body></html>"#;
        assert_eq!(parse_page(html).title, None);
    }

    #[test]
    fn test_extract_absolute_and_relative_links() {
        let html = r#"
            <html><body>
                <a href="https://example.com/abs">Absolute</a>
                <a href="/rooted">Rooted</a>
                <a href="relative">Relative</a>
            </body></html>
        "#;
        assert_eq!(
            parse_page(html).links,
            vec!["https://example.com/abs", "/rooted", "relative"]
        );
    }

    #[test]
    fn test_skip_javascript_and_data_links() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="data:text/html,hi">Data</a>
                <a href="/keep">Keep</a>
            </body></html>
        "#;
        assert_eq!(parse_page(html).links, vec!["/keep"]);
    }

    #[test]
    fn test_skip_fragment_only_links() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        assert!(parse_page(html).links.is_empty());
    }

    #[test]
    fn test_skip_download_links() {
        let html = r#"<html><body><a href="/file.bin" download>Get</a></body></html>"#;
        assert!(parse_page(html).links.is_empty());
    }

    #[test]
    fn test_empty_href_ignored() {
        let html = r#"<html><body><a href="  ">Blank</a></body></html>"#;
        assert!(parse_page(html).links.is_empty());
    }

    #[test]
    fn test_links_simple_matches_parse_page() {
        let html = r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#;
        assert_eq!(extract_links_simple(html), parse_page(html).links);
    }
}
