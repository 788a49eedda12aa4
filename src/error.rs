//! Error types for the edgar-clean library.
//!
//! A single error type, [`EdgarError`], covers everything that stops *one*
//! submission from producing output: an unreadable input, a failed download,
//! an empty submission, a bad configuration.
//!
//! Degenerate-but-valid submissions are **not** errors. A filing with no
//! header, no `<DOCUMENT>` blocks, or no document of an allowed form type
//! yields an empty cleaned text and zero counts in
//! [`crate::output::ExtractionStats`].
//!
//! Batch entry points return one `Result` per input, so a failure here never
//! aborts the other submissions of a run. [`EdgarError::BatchFailed`] exists
//! for callers that want to turn a partially failed batch into an error after
//! the fact.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgar-clean library.
#[derive(Debug, Error)]
pub enum EdgarError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Submission file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a usable file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your connection and the --user-agent value (EDGAR rejects anonymous clients).")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Pipeline errors ───────────────────────────────────────────────────
    /// The submission contained no characters, so no keep ratio exists.
    #[error("Submission is empty: cannot compute the percentage of text kept")]
    EmptySubmission,

    // ── Batch errors ──────────────────────────────────────────────────────
    /// At least one submission of a batch failed.
    ///
    /// Returned by [`crate::output::BatchReport::into_result`] when the
    /// caller wants to treat any failure as an error.
    #[error("{failed}/{total} submissions failed")]
    BatchFailed { failed: usize, total: usize },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed, or an exclusion pattern does not compile.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EdgarError {
    /// `true` for failures caused by the network rather than the input.
    ///
    /// Batch callers use this to decide whether re-queueing a filing is
    /// worthwhile.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EdgarError::DownloadFailed { .. } | EdgarError::DownloadTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_submission_display() {
        let msg = EdgarError::EmptySubmission.to_string();
        assert!(msg.contains("empty"), "got: {msg}");
    }

    #[test]
    fn batch_failed_display() {
        let e = EdgarError::BatchFailed {
            failed: 2,
            total: 7,
        };
        assert!(e.to_string().contains("2/7"));
    }

    #[test]
    fn download_timeout_display() {
        let e = EdgarError::DownloadTimeout {
            url: "https://www.sec.gov/Archives/edgar/data/320193/0000320193-20-000096.txt".into(),
            secs: 30,
        };
        assert!(e.to_string().contains("30s"));
        assert!(e.to_string().contains("0000320193-20-000096"));
    }

    #[test]
    fn file_not_found_display() {
        let e = EdgarError::FileNotFound {
            path: PathBuf::from("/data/missing.txt"),
        };
        assert!(e.to_string().contains("/data/missing.txt"));
    }

    #[test]
    fn transient_classification() {
        assert!(EdgarError::DownloadTimeout {
            url: "u".into(),
            secs: 1
        }
        .is_transient());
        assert!(!EdgarError::EmptySubmission.is_transient());
        assert!(!EdgarError::InvalidConfig("x".into()).is_transient());
    }
}
