//! Result types produced by the extraction pipeline.
//!
//! [`ExtractionOutput`] and [`ExtractionStats`] are plain serialisable data:
//! computed once per submission, never mutated afterwards. The CLI's `--json`
//! mode serialises them directly.

use crate::error::EdgarError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cleaned text of one submission plus what was measured along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// Plain ASCII prose of every kept document.
    pub text: String,
    /// The `<SEC-HEADER>`/`<IMS-HEADER>` block removed before segmentation.
    pub header: Option<String>,
    pub stats: ExtractionStats,
}

/// Size and document counts for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Length of the raw submission, in characters.
    pub original_chars: usize,
    /// Length of the cleaned text, in characters.
    pub current_chars: usize,
    /// `100 * current_chars / original_chars`.
    pub percent_kept: f64,
    pub documents_kept: usize,
    pub documents_total: usize,
}

impl ExtractionStats {
    /// Render the `<FileStats>` block prepended to written output when
    /// [`crate::config::ExtractionConfig::include_stats`] is set.
    ///
    /// The percentage uses the shortest round-trip float form and always
    /// keeps its decimal point (`25.0`, never `25`).
    pub fn file_stats_block(&self) -> String {
        format!(
            "<FileStats>\n\n    <OriginalChars>{}</OriginalChars>\n\n    <CurrentChars>{}</CurrentChars>\n\n    <PercentKept>{:?}</PercentKept>\n\n</FileStats>\n\n",
            self.original_chars, self.current_chars, self.percent_kept
        )
    }
}

/// The operator summary line, e.g. `4.27 % and 1/12 documents kept.`
impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} % and {}/{} documents kept.",
            self.percent_kept, self.documents_kept, self.documents_total
        )
    }
}

/// Structure of a submission as seen by the segmenter and filter, without
/// running the stripping stages. Returned by [`crate::extract::inspect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSummary {
    pub original_chars: usize,
    pub has_header: bool,
    pub documents: Vec<DocumentInfo>,
}

impl SubmissionSummary {
    pub fn documents_kept(&self) -> usize {
        self.documents.iter().filter(|d| d.kept).count()
    }
}

/// One `<DOCUMENT>` span of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// 0-based position in the submission.
    pub index: usize,
    /// Value of the `<TYPE>` tag, if any.
    pub doc_type: Option<String>,
    /// Value of the `<FILENAME>` tag, if any.
    pub filename: Option<String>,
    /// Length of the span in characters, tags included.
    pub chars: usize,
    /// Whether the configured policy keeps this document.
    pub kept: bool,
}

/// Outcome for one input of a batch.
#[derive(Debug)]
pub struct FilingResult {
    /// 0-based position of the input in the batch.
    pub index: usize,
    /// The path or URL as supplied.
    pub input: String,
    pub result: Result<ExtractionOutput, EdgarError>,
}

/// Every outcome of an eager batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<FilingResult>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Collapse the report into the successful outputs, or
    /// [`EdgarError::BatchFailed`] if any input failed.
    pub fn into_result(self) -> Result<Vec<ExtractionOutput>, EdgarError> {
        let failed = self.failed();
        if failed > 0 {
            return Err(EdgarError::BatchFailed {
                failed,
                total: self.total(),
            });
        }
        self.results
            .into_iter()
            .map(|r| r.result)
            .collect()
    }
}
