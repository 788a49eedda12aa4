//! Progress-callback trait for per-submission batch events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! events as [`crate::extract::extract_batch`] and
//! [`crate::stream::extract_stream`] work through their inputs.
//!
//! # Example
//!
//! ```rust
//! use edgar_clean::{ExtractionConfig, ExtractionProgressCallback, ExtractionStats};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl ExtractionProgressCallback for CountingCallback {
//!     fn on_filing_complete(&self, index: usize, total: usize, stats: &ExtractionStats) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{}/{}: {:.2} % kept", index + 1, total, stats.percent_kept);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ExtractionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::ExtractionStats;
use std::sync::Arc;

/// Called by the batch entry points as each submission is processed.
///
/// Submissions are fetched concurrently, so `on_filing_start`,
/// `on_filing_complete` and `on_filing_error` may be called from different
/// tasks in any order. All methods default to no-ops.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once before any submission is fetched.
    fn on_batch_start(&self, total: usize) {
        let _ = total;
    }

    /// Called before a submission is resolved.
    ///
    /// # Arguments
    /// * `index` — 0-based position of the input in the batch
    /// * `total` — number of inputs in the batch
    /// * `input` — the path or URL being processed
    fn on_filing_start(&self, index: usize, total: usize, input: &str) {
        let _ = (index, total, input);
    }

    /// Called when a submission was cleaned successfully.
    fn on_filing_complete(&self, index: usize, total: usize, stats: &ExtractionStats) {
        let _ = (index, total, stats);
    }

    /// Called when a submission failed; the batch carries on.
    fn on_filing_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after every submission has been attempted.
    ///
    /// Only the eager [`crate::extract::extract_batch`] fires this; a stream
    /// has no natural end from the producer's side.
    fn on_batch_complete(&self, total: usize, succeeded: usize) {
        let _ = (total, succeeded);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
