//! URL handling: normalization, domain membership, and skip filtering
//!
//! Everything in this module is a pure function over URL strings. The
//! frontier calls these to decide what enters and leaves the crawl queue.

mod domain;
mod filter;
mod normalize;

pub use domain::is_same_domain;
pub use filter::should_skip;
pub use normalize::normalize_url;
