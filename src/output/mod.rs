//! Output module: durable JSONL sink with idempotent writes
//!
//! The writer is the only component that touches the output file, and
//! append is the only mutation the sink ever undergoes — no rewriting, no
//! deletion. Idempotency is keyed purely by URL, which is what makes a
//! crashed run resumable: re-running with resume enabled reproduces a
//! superset of the prior output with no duplicate URLs.

mod writer;

pub use writer::{timestamped_path, JsonlWriter};
