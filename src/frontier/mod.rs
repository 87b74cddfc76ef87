//! Crawl frontier: pending-and-visited URL bookkeeping
//!
//! The frontier owns all crawl state — the FIFO queue of discovered URLs,
//! the visited set, per-URL depths, and the page budget. No other component
//! mutates this state; the discovery loop drives it through [`Frontier::next`]
//! and [`Frontier::add_links`].

use crate::url::{is_same_domain, normalize_url, should_skip};
use regex::Regex;
use std::collections::{HashMap, HashSet, VecDeque};
use url::Url;

/// A discovered URL waiting to be dequeued, with the depth it was found at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: u32,
}

/// Ordered work queue of (url, depth) pairs with breadth-first semantics
///
/// Queue order is FIFO, which gives the breadth-first traversal guarantee:
/// all depth-`d` pages are dequeued before any depth-`d+1` page discovered
/// from them. Links whose depth would exceed `max_depth` are still enqueued;
/// the cost is paid at dequeue time by the depth filter in [`Frontier::next`].
/// That keeps queue growth bounded by the number of distinct same-domain
/// URLs rather than by depth.
pub struct Frontier {
    base_url: String,
    max_pages: usize,
    max_depth: u32,
    url_pattern: Option<Regex>,

    queue: VecDeque<FrontierEntry>,
    /// URLs currently in `queue`, for O(1) duplicate suppression against
    /// pending (not just visited) entries
    pending: HashSet<String>,
    visited: HashSet<String>,
    depth_of: HashMap<String, u32>,
    scraped_count: usize,
}

impl Frontier {
    /// Creates a frontier seeded with the normalized start URL at depth 0
    pub fn new(
        start_url: &str,
        max_pages: usize,
        max_depth: u32,
        url_pattern: Option<Regex>,
    ) -> Self {
        let seed = normalize_url(start_url);

        let mut queue = VecDeque::new();
        let mut pending = HashSet::new();
        queue.push_back(FrontierEntry {
            url: seed.clone(),
            depth: 0,
        });
        pending.insert(seed.clone());

        Self {
            base_url: seed,
            max_pages,
            max_depth,
            url_pattern,
            queue,
            pending,
            visited: HashSet::new(),
            depth_of: HashMap::new(),
            scraped_count: 0,
        }
    }

    /// Returns the next URL to crawl with its depth, or `None` when the
    /// queue is empty or the page budget is exhausted
    ///
    /// Entries that are already visited, exceed `max_depth`, or match the
    /// skip denylist are discarded until an acceptable one surfaces. On
    /// acceptance the URL is marked visited, its depth recorded, and the
    /// budget charged. Iterative by construction — a queue full of
    /// skippable entries drains in one bounded loop.
    pub fn next(&mut self) -> Option<(String, u32)> {
        loop {
            if self.scraped_count >= self.max_pages {
                return None;
            }

            let entry = self.queue.pop_front()?;
            self.pending.remove(&entry.url);

            if self.visited.contains(&entry.url) {
                continue;
            }
            if entry.depth > self.max_depth {
                tracing::debug!("Depth limit: discarding {} (depth {})", entry.url, entry.depth);
                continue;
            }
            if should_skip(&entry.url) {
                continue;
            }

            self.visited.insert(entry.url.clone());
            self.depth_of.insert(entry.url.clone(), entry.depth);
            self.scraped_count += 1;
            return Some((entry.url, entry.depth));
        }
    }

    /// Resolves discovered hrefs against `base_url` and enqueues the ones
    /// worth crawling at `current_depth + 1`
    ///
    /// A link is enqueued iff it is same-domain with the crawl's start URL,
    /// not yet visited, not skip-matched, matches the optional URL pattern
    /// (searched anywhere in the URL, not anchored), and is not already
    /// pending in the queue. A link appearing twice on one page is enqueued
    /// once.
    pub fn add_links(&mut self, base_url: &str, hrefs: &[String], current_depth: u32) {
        let base = match Url::parse(base_url) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("Cannot resolve links against {}: {}", base_url, e);
                return;
            }
        };

        for href in hrefs {
            let href = href.trim();
            if href.is_empty() {
                continue;
            }

            let absolute = match base.join(href) {
                Ok(u) => u.to_string(),
                Err(_) => continue,
            };
            let normalized = normalize_url(&absolute);

            if !is_same_domain(&normalized, &self.base_url) {
                continue;
            }
            if self.visited.contains(&normalized) {
                continue;
            }
            if should_skip(&normalized) {
                continue;
            }
            if let Some(pattern) = &self.url_pattern {
                if !pattern.is_match(&normalized) {
                    continue;
                }
            }
            if self.pending.contains(&normalized) {
                continue;
            }

            tracing::debug!(
                "Added to queue: {} (depth {})",
                normalized,
                current_depth + 1
            );
            self.pending.insert(normalized.clone());
            self.queue.push_back(FrontierEntry {
                url: normalized,
                depth: current_depth + 1,
            });
        }
    }

    /// Recorded depth of a URL in the crawl tree (0 if never dequeued)
    pub fn depth_of(&self, url: &str) -> u32 {
        self.depth_of
            .get(&normalize_url(url))
            .copied()
            .unwrap_or(0)
    }

    /// Number of entries currently queued
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs accepted so far
    pub fn scraped_count(&self) -> usize {
        self.scraped_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontier(max_pages: usize, max_depth: u32) -> Frontier {
        Frontier::new("http://example.com", max_pages, max_depth, None)
    }

    #[test]
    fn test_seed_dequeued_first() {
        let mut f = frontier(10, 3);
        let (url, depth) = f.next().unwrap();
        assert_eq!(url, "http://example.com/");
        assert_eq!(depth, 0);
    }

    #[test]
    fn test_budget_limits_dequeues() {
        let mut f = frontier(2, 3);
        let links: Vec<String> = (0..10).map(|i| format!("/page{}", i)).collect();

        let (root, depth) = f.next().unwrap();
        f.add_links(&root, &links, depth);

        assert!(f.next().is_some());
        assert!(f.next().is_none(), "budget of 2 must stop the third dequeue");
        assert_eq!(f.scraped_count(), 2);
    }

    #[test]
    fn test_bfs_ordering() {
        let mut f = frontier(100, 3);

        let (root, d0) = f.next().unwrap();
        f.add_links(&root, &["/a".to_string(), "/b".to_string()], d0);

        let (a, da) = f.next().unwrap();
        assert_eq!(a, "http://example.com/a");
        assert_eq!(da, 1);

        // Children of /a go behind /b
        f.add_links(&a, &["/a/child".to_string()], da);

        let (b, db) = f.next().unwrap();
        assert_eq!(b, "http://example.com/b");
        assert_eq!(db, 1);

        let (child, dc) = f.next().unwrap();
        assert_eq!(child, "http://example.com/a/child");
        assert_eq!(dc, 2);
    }

    #[test]
    fn test_duplicate_link_on_page_enqueued_once() {
        let mut f = frontier(100, 3);
        let (root, d0) = f.next().unwrap();

        f.add_links(
            &root,
            &["/dup".to_string(), "/dup".to_string(), "/dup/".to_string()],
            d0,
        );
        assert_eq!(f.queue_len(), 1);
    }

    #[test]
    fn test_duplicate_across_pages_suppressed_by_pending() {
        let mut f = frontier(100, 3);
        let (root, d0) = f.next().unwrap();
        f.add_links(&root, &["/a".to_string(), "/b".to_string()], d0);

        let (a, da) = f.next().unwrap();
        // /b is pending, not yet visited; must not be enqueued again
        f.add_links(&a, &["/b".to_string()], da);
        assert_eq!(f.queue_len(), 1);
    }

    #[test]
    fn test_offsite_links_filtered() {
        let mut f = frontier(100, 3);
        let (root, d0) = f.next().unwrap();
        f.add_links(&root, &["http://other.com/page".to_string()], d0);
        assert_eq!(f.queue_len(), 0);
    }

    #[test]
    fn test_skip_patterns_filtered_at_enqueue() {
        let mut f = frontier(100, 3);
        let (root, d0) = f.next().unwrap();
        f.add_links(
            &root,
            &["/login".to_string(), "/asset.pdf".to_string(), "/ok".to_string()],
            d0,
        );
        assert_eq!(f.queue_len(), 1);
    }

    #[test]
    fn test_url_pattern_filters_unmatched() {
        let pattern = Regex::new("/books/").unwrap();
        let mut f = Frontier::new("http://example.com", 100, 3, Some(pattern));

        let (root, d0) = f.next().unwrap();
        f.add_links(
            &root,
            &["/books/book1".to_string(), "/articles/article1".to_string()],
            d0,
        );

        assert_eq!(f.queue_len(), 1);
        let (url, _) = f.next().unwrap();
        assert_eq!(url, "http://example.com/books/book1");
    }

    #[test]
    fn test_over_depth_enqueued_but_not_dequeued() {
        let mut f = frontier(100, 0);
        let (root, d0) = f.next().unwrap();

        // Depth 1 exceeds max_depth 0 but still enters the queue
        f.add_links(&root, &["/deep".to_string()], d0);
        assert_eq!(f.queue_len(), 1);

        // Filtered at dequeue time
        assert!(f.next().is_none());
    }

    #[test]
    fn test_all_skippable_queue_drains_without_recursion() {
        let mut f = frontier(100, 3);
        let (root, d0) = f.next().unwrap();

        let links: Vec<String> = (0..5000).map(|i| format!("/cart{}", i)).collect();
        // Skip-matched links never enter the queue in the first place
        f.add_links(&root, &links, d0);
        assert_eq!(f.queue_len(), 0);
        assert!(f.next().is_none());
    }

    #[test]
    fn test_relative_links_resolved() {
        let mut f = frontier(100, 3);
        let (root, d0) = f.next().unwrap();
        f.add_links(&root, &["sub/page".to_string()], d0);

        let (url, _) = f.next().unwrap();
        assert_eq!(url, "http://example.com/sub/page");
    }

    #[test]
    fn test_depth_of_recorded() {
        let mut f = frontier(100, 3);
        let (root, d0) = f.next().unwrap();
        f.add_links(&root, &["/a".to_string()], d0);
        let (a, _) = f.next().unwrap();

        assert_eq!(f.depth_of(&root), 0);
        assert_eq!(f.depth_of(&a), 1);
        assert_eq!(f.depth_of("http://example.com/unknown"), 0);
    }
}
