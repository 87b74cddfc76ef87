//! Content extraction from HTML
//!
//! Pulls the title, main body text, images, and table content out of a
//! parsed page, stripping navigation and other boilerplate. The selector
//! tables are compiled once at pipeline construction.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Tags whose subtrees never contribute body text
const REMOVE_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "template",
];

/// Class/id fragments that mark a container as boilerplate
const BOILERPLATE_KEYWORDS: &[&str] = &[
    "sidebar",
    "navigation",
    "menu",
    "advertisement",
    "ads",
    "social-share",
    "comments",
    "cookie",
    "modal",
    "popup",
    "overlay",
    "skip-link",
    "breadcrumb",
    "navbar",
    "nav-bar",
    "topbar",
    "header-bar",
    "footer-bar",
];

/// Role attribute values that mark a container as non-content
const BOILERPLATE_ROLES: &[&str] = &["navigation", "banner", "complementary", "contentinfo"];

/// Selectors that typically hold the main content, tried in order
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "[role='article']",
    ".content",
    ".main-content",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".page-content",
];

/// Minimum text length for a class-matched container to count as content
const CONTENT_THRESHOLD: usize = 100;

/// Result of extracting one page
#[derive(Debug, Default)]
pub struct ExtractedContent {
    pub title: String,
    pub body_text: String,
    pub images: Vec<String>,
    pub table_content: Option<String>,
}

/// HTML content extractor with precompiled selector tables
pub struct Extractor {
    content_selectors: Vec<Selector>,
    title_selector: Selector,
    h1_selector: Selector,
    og_title_selector: Selector,
    twitter_title_selector: Selector,
    body_selector: Selector,
    container_selector: Selector,
    img_selector: Selector,
    table_selector: Selector,
    row_selector: Selector,
    cell_selector: Selector,
    styled_selector: Selector,
    css_url: Regex,
    invisible_chars: Regex,
    whitespace: Regex,
    pipe_runs: Regex,
    bullet_runs: Regex,
}

impl Extractor {
    /// Compiles all selectors and regexes; an entry that fails to parse
    /// fails construction
    pub fn new() -> Result<Self, String> {
        let parse = |s: &str| Selector::parse(s).map_err(|e| format!("selector {s:?}: {e}"));

        let content_selectors = CONTENT_SELECTORS
            .iter()
            .map(|s| parse(s))
            .collect::<Result<Vec<_>, _>>()?;

        let regex = |p: &str| Regex::new(p).map_err(|e| format!("regex {p:?}: {e}"));

        Ok(Self {
            content_selectors,
            title_selector: parse("title")?,
            h1_selector: parse("h1")?,
            og_title_selector: parse("meta[property='og:title']")?,
            twitter_title_selector: parse("meta[name='twitter:title']")?,
            body_selector: parse("body")?,
            container_selector: parse("div, section")?,
            img_selector: parse("img")?,
            table_selector: parse("table")?,
            row_selector: parse("tr")?,
            cell_selector: parse("th, td")?,
            styled_selector: parse("[style]")?,
            css_url: regex(r#"url\(['"]?([^'")]+)['"]?\)"#)?,
            invisible_chars: regex(
                "[\u{200b}-\u{200f}\u{202a}-\u{202e}\u{2060}-\u{206f}\u{feff}]",
            )?,
            whitespace: regex(r"\s+")?,
            pipe_runs: regex(r"\s*\|+\s*")?,
            bullet_runs: regex(r"\s*•+\s*")?,
        })
    }

    /// Extracts title, body text, images, and table content from one page
    pub fn extract(&self, html: &str, url: &str) -> ExtractedContent {
        let document = Html::parse_document(html);

        let title = self.extract_title(&document, url);
        let body_text = self.extract_body_text(&document);
        let images = self.extract_images(&document, url);
        let table_content = self.extract_table_content(&document);

        ExtractedContent {
            title,
            body_text,
            images,
            table_content,
        }
    }

    /// Title fallback chain: `<title>` → `<h1>` → `og:title` →
    /// `twitter:title` → the URL itself
    fn extract_title(&self, document: &Html, url: &str) -> String {
        if let Some(el) = document.select(&self.title_selector).next() {
            let text = element_text(el);
            if !text.is_empty() {
                return text;
            }
        }

        if let Some(el) = document.select(&self.h1_selector).next() {
            let text = element_text(el);
            if !text.is_empty() {
                return text;
            }
        }

        for selector in [&self.og_title_selector, &self.twitter_title_selector] {
            if let Some(content) = document
                .select(selector)
                .next()
                .and_then(|el| el.value().attr("content"))
            {
                let content = content.trim();
                if !content.is_empty() {
                    return content.to_string();
                }
            }
        }

        tracing::warn!("Could not extract title from {}, using URL as fallback", url);
        url.to_string()
    }

    /// Extracts the main body text with boilerplate subtrees removed
    fn extract_body_text(&self, document: &Html) -> String {
        let container = self.find_content_container(document);

        let mut text = String::new();
        if let Some(container) = container {
            collect_text(container, &mut text);

            // Tables inside the container, flattened row by row
            for table in container.select(&self.table_selector) {
                if let Some(table_text) = self.table_text(table) {
                    text.push(' ');
                    text.push_str(&table_text);
                }
            }
        }

        self.clean_text(&text)
    }

    /// Finds the most plausible content container, in priority order:
    /// semantic/content selectors, the largest non-boilerplate
    /// div/section, then `<body>`
    fn find_content_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        for (i, selector) in self.content_selectors.iter().enumerate() {
            if let Some(el) = document.select(selector).next() {
                // Semantic elements are trusted as-is; class-matched
                // containers must hold substantial text
                if i < 4 || visible_text_len(el) > CONTENT_THRESHOLD {
                    return Some(el);
                }
            }
        }

        if let Some(el) = self.find_largest_container(document) {
            return Some(el);
        }

        document.select(&self.body_selector).next()
    }

    /// Largest div/section by visible text length, skipping containers
    /// whose class/id/role marks them as navigation chrome
    fn find_largest_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document
            .select(&self.container_selector)
            .filter(|el| !is_boilerplate(el))
            .map(|el| (visible_text_len(el), el))
            .filter(|(len, _)| *len > CONTENT_THRESHOLD)
            .max_by_key(|(len, _)| *len)
            .map(|(_, el)| el)
    }

    /// Collects image URLs from `src`, `srcset`, lazy-load attributes, and
    /// inline background styles, resolved absolute and deduplicated in
    /// document order
    fn extract_images(&self, document: &Html, base_url: &str) -> Vec<String> {
        let base = Url::parse(base_url).ok();
        let mut images = Vec::new();

        let push = |candidate: &str, images: &mut Vec<String>| {
            let candidate = candidate.trim();
            if candidate.is_empty() || candidate.starts_with("data:") {
                return;
            }
            let absolute = match &base {
                Some(base) => match base.join(candidate) {
                    Ok(u) => u.to_string(),
                    Err(_) => return,
                },
                None => candidate.to_string(),
            };
            if !images.contains(&absolute) {
                images.push(absolute);
            }
        };

        for img in document.select(&self.img_selector) {
            if let Some(src) = img.value().attr("src") {
                if !src.ends_with(".ico") && !src.ends_with(".svg") {
                    push(src, &mut images);
                }
            }
            if let Some(srcset) = img.value().attr("srcset") {
                for item in srcset.split(',') {
                    if let Some(first) = item.split_whitespace().next() {
                        push(first, &mut images);
                    }
                }
            }
            for attr in ["data-src", "data-lazy-src"] {
                if let Some(src) = img.value().attr(attr) {
                    push(src, &mut images);
                }
            }
        }

        // Background images declared inline
        for el in document.select(&self.styled_selector) {
            let Some(style) = el.value().attr("style") else {
                continue;
            };
            if !style.to_lowercase().contains("background") {
                continue;
            }
            for caps in self.css_url.captures_iter(style) {
                if let Some(m) = caps.get(1) {
                    push(m.as_str(), &mut images);
                }
            }
        }

        images
    }

    /// All table content on the page, flattened
    fn extract_table_content(&self, document: &Html) -> Option<String> {
        let tables: Vec<String> = document
            .select(&self.table_selector)
            .filter_map(|table| self.table_text(table))
            .collect();

        if tables.is_empty() {
            None
        } else {
            Some(tables.join(" "))
        }
    }

    /// One table as `cell | cell` rows, one row per line
    fn table_text(&self, table: ElementRef) -> Option<String> {
        let mut rows = Vec::new();

        for tr in table.select(&self.row_selector) {
            let cells: Vec<String> = tr
                .select(&self.cell_selector)
                .map(element_text)
                .filter(|cell| !cell.is_empty())
                .collect();
            if !cells.is_empty() {
                rows.push(cells.join(" | "));
            }
        }

        if rows.is_empty() {
            None
        } else {
            Some(rows.join("\n"))
        }
    }

    /// Normalizes extracted text: strips invisible characters, collapses
    /// whitespace, removes pipe/bullet separator runs left over from
    /// layout markup
    fn clean_text(&self, text: &str) -> String {
        let text = self.invisible_chars.replace_all(text, "");
        let text = self.whitespace.replace_all(&text, " ");
        let text = self.pipe_runs.replace_all(&text, " ");
        let text = self.bullet_runs.replace_all(&text, " ");
        text.trim().to_string()
    }
}

/// Trimmed text of a single element
fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Visible text length, boilerplate subtrees excluded
fn visible_text_len(el: ElementRef) -> usize {
    let mut text = String::new();
    collect_text(el, &mut text);
    text.trim().len()
}

/// Walks an element's subtree collecting text, skipping boilerplate
/// elements wholesale
fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !is_boilerplate(&child_el) {
                collect_text(child_el, out);
            }
        }
    }
}

/// Whether an element is navigation chrome rather than content
fn is_boilerplate(el: &ElementRef) -> bool {
    let value = el.value();

    if REMOVE_TAGS.contains(&value.name()) {
        return true;
    }

    if let Some(role) = value.attr("role") {
        if BOILERPLATE_ROLES.contains(&role) {
            return true;
        }
    }

    let class_and_id = format!(
        "{} {}",
        value.attr("class").unwrap_or(""),
        value.attr("id").unwrap_or("")
    )
    .to_lowercase();

    BOILERPLATE_KEYWORDS
        .iter()
        .any(|keyword| class_and_id.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new().unwrap()
    }

    #[test]
    fn test_title_from_title_tag() {
        let html = "<html><head><title>Page Title</title></head><body></body></html>";
        let result = extractor().extract(html, "http://example.com/p");
        assert_eq!(result.title, "Page Title");
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let html = "<html><body><h1>Heading Title</h1></body></html>";
        let result = extractor().extract(html, "http://example.com/p");
        assert_eq!(result.title, "Heading Title");
    }

    #[test]
    fn test_title_falls_back_to_og_title() {
        let html = r#"<html><head><meta property="og:title" content="OG Title"></head><body></body></html>"#;
        let result = extractor().extract(html, "http://example.com/p");
        assert_eq!(result.title, "OG Title");
    }

    #[test]
    fn test_title_falls_back_to_url() {
        let html = "<html><body></body></html>";
        let result = extractor().extract(html, "http://example.com/p");
        assert_eq!(result.title, "http://example.com/p");
    }

    #[test]
    fn test_body_text_from_main() {
        let html = r#"
            <html><body>
                <nav>Home About Contact</nav>
                <main><p>Actual page content lives here.</p></main>
                <footer>Copyright</footer>
            </body></html>
        "#;
        let result = extractor().extract(html, "http://example.com/p");
        assert!(result.body_text.contains("Actual page content"));
        assert!(!result.body_text.contains("Copyright"));
        assert!(!result.body_text.contains("About"));
    }

    #[test]
    fn test_script_and_style_stripped() {
        let html = r#"
            <html><body>
                <script>var secret = 1;</script>
                <style>.x { color: red }</style>
                <p>Visible words only.</p>
            </body></html>
        "#;
        let result = extractor().extract(html, "http://example.com/p");
        assert!(result.body_text.contains("Visible words"));
        assert!(!result.body_text.contains("secret"));
        assert!(!result.body_text.contains("color"));
    }

    #[test]
    fn test_boilerplate_class_stripped() {
        let html = r#"
            <html><body>
                <div class="sidebar">Related posts</div>
                <div><p>The story itself, long enough to matter.</p></div>
            </body></html>
        "#;
        let result = extractor().extract(html, "http://example.com/p");
        assert!(!result.body_text.contains("Related posts"));
    }

    #[test]
    fn test_table_rows_flattened() {
        let html = r#"
            <html><body><main>
                <p>Specs below.</p>
                <table>
                    <tr><th>UPC</th><th>Price</th></tr>
                    <tr><td>abc123</td><td>51.77</td></tr>
                </table>
            </main></body></html>
        "#;
        let result = extractor().extract(html, "http://example.com/p");
        // Pipe separators are cleaned out of body text but survive in the
        // dedicated table field
        assert!(result.body_text.contains("UPC Price"));
        assert!(result.body_text.contains("abc123 51.77"));
        assert!(result.table_content.unwrap().contains("abc123 | 51.77"));
    }

    #[test]
    fn test_images_resolved_and_deduped() {
        let html = r#"
            <html><body>
                <img src="/img/a.jpg">
                <img src="/img/a.jpg">
                <img data-src="/img/lazy.png">
                <img src="data:image/png;base64,xyz">
            </body></html>
        "#;
        let result = extractor().extract(html, "http://example.com/page");
        assert_eq!(
            result.images,
            vec![
                "http://example.com/img/a.jpg",
                "http://example.com/img/lazy.png"
            ]
        );
    }

    #[test]
    fn test_srcset_parsed() {
        let html = r#"<html><body><img srcset="/img/small.jpg 480w, /img/big.jpg 1080w"></body></html>"#;
        let result = extractor().extract(html, "http://example.com/page");
        assert_eq!(
            result.images,
            vec![
                "http://example.com/img/small.jpg",
                "http://example.com/img/big.jpg"
            ]
        );
    }

    #[test]
    fn test_background_image_from_style() {
        let html = r#"<html><body><div style="background-image: url('/img/hero.jpg')">Hero section text content</div></body></html>"#;
        let result = extractor().extract(html, "http://example.com/page");
        assert!(result
            .images
            .contains(&"http://example.com/img/hero.jpg".to_string()));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let html = "<html><body><main><p>Spaced     out\n\n\ntext</p></main></body></html>";
        let result = extractor().extract(html, "http://example.com/p");
        assert_eq!(result.body_text, "Spaced out text");
    }

    #[test]
    fn test_zero_width_chars_removed() {
        let html = "<html><body><main><p>Obfus\u{200b}cated content here</p></main></body></html>";
        let result = extractor().extract(html, "http://example.com/p");
        assert!(result.body_text.contains("Obfuscated"));
    }
}
