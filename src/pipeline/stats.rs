//! Keep-ratio bookkeeping.
//!
//! Lengths are counted in characters, not bytes: a submission with Latin-1
//! punctuation decoded to multi-byte UTF-8 should not look larger than it is.

use crate::error::EdgarError;
use crate::output::ExtractionStats;

/// Measure how much of `original` survived as `cleaned`.
///
/// An empty `original` has no meaningful ratio and is rejected with
/// [`EdgarError::EmptySubmission`] instead of producing NaN.
pub fn compute(
    original: &str,
    cleaned: &str,
    documents_kept: usize,
    documents_total: usize,
) -> Result<ExtractionStats, EdgarError> {
    let original_chars = original.chars().count();
    if original_chars == 0 {
        return Err(EdgarError::EmptySubmission);
    }
    let current_chars = cleaned.chars().count();
    let percent_kept = current_chars as f64 / original_chars as f64 * 100.0;

    Ok(ExtractionStats {
        original_chars,
        current_chars,
        percent_kept,
        documents_kept,
        documents_total,
    })
}
