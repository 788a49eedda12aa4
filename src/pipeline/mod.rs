//! Pipeline stages for submission-to-text extraction.
//!
//! Each submodule implements exactly one transformation step over a single
//! text buffer. [`Pipeline`] composes them in a fixed order; nothing branches
//! back and nothing inside one run is concurrent.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ segment ──▶ classify ──▶ strip ──▶ normalize ──▶ stats
//! (path/URL) (header,   (allowlist,  (XBRL,     (entities,    (keep
//!             documents) exclusions)  tables,    non-ASCII)    ratio)
//!                                     markup)
//! ```
//!
//! 1. [`input`]     — read a local file or download a URL; the only stage
//!    with I/O, and not part of [`Pipeline`] itself
//! 2. [`segment`]   — close `<TYPE>` tags, excise the header, find documents
//! 3. [`classify`]  — keep documents of an allowed form type with no
//!    excluded attachment
//! 4. [`strip`]     — remove non-prose spans and tags, collapse whitespace
//! 5. [`normalize`] — decode character references, replace non-ASCII
//! 6. [`stats`]     — characters before and after, documents kept

pub mod classify;
pub mod input;
pub mod normalize;
pub mod segment;
pub mod stats;
pub mod strip;

use crate::config::ExtractionConfig;
use crate::error::EdgarError;
use crate::output::{DocumentInfo, ExtractionOutput, SubmissionSummary};
use classify::DocumentFilter;
use tracing::{debug, info};

/// The compiled, immutable extraction pipeline.
///
/// Build once per configuration and share freely: `run` takes `&self`, holds
/// no state between calls, and the type is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct Pipeline {
    filter: DocumentFilter,
    recollapse_whitespace: bool,
}

impl Pipeline {
    /// Compile the filtering policy of `config`.
    pub fn new(config: &ExtractionConfig) -> Result<Self, EdgarError> {
        Ok(Self {
            filter: DocumentFilter::new(&config.allowed_types, &config.excluded_patterns)?,
            recollapse_whitespace: config.recollapse_whitespace,
        })
    }

    /// The document filter this pipeline applies.
    pub fn filter(&self) -> &DocumentFilter {
        &self.filter
    }

    /// Run every stage over one submission.
    ///
    /// # Errors
    /// [`EdgarError::EmptySubmission`] for a zero-length submission. Missing
    /// headers and submissions without any kept document are not errors;
    /// they produce an empty text.
    pub fn run(&self, submission: &str) -> Result<ExtractionOutput, EdgarError> {
        if submission.is_empty() {
            return Err(EdgarError::EmptySubmission);
        }

        // ── Stage 1: Segment ─────────────────────────────────────────────
        let text = segment::close_type_tags(submission).into_owned();
        let (header, text) = segment::take_header(text);
        let documents = segment::split_documents(&text);
        debug!(
            "Segmented {} documents (header: {})",
            documents.len(),
            header.is_some()
        );

        // ── Stage 2: Classify ────────────────────────────────────────────
        let kept = self.filter.filter(&documents);

        // ── Stages 3–4: Strip and normalise ──────────────────────────────
        let joined = kept.join("\n");
        let cleaned = clean_text(&joined, self.recollapse_whitespace);
        debug!("Cleaned {} → {} bytes", joined.len(), cleaned.len());

        // ── Stage 5: Stats ───────────────────────────────────────────────
        let stats = stats::compute(submission, &cleaned, kept.len(), documents.len())?;
        info!("{}", stats);

        Ok(ExtractionOutput {
            text: cleaned,
            header,
            stats,
        })
    }

    /// Segment and classify a submission without stripping anything.
    pub fn inspect(&self, submission: &str) -> Result<SubmissionSummary, EdgarError> {
        if submission.is_empty() {
            return Err(EdgarError::EmptySubmission);
        }
        let text = segment::close_type_tags(submission).into_owned();
        let (header, text) = segment::take_header(text);
        let documents = segment::split_documents(&text)
            .into_iter()
            .enumerate()
            .map(|(index, doc)| DocumentInfo {
                index,
                doc_type: segment::type_label(doc).map(str::to_string),
                filename: segment::filename(doc).map(str::to_string),
                chars: doc.chars().count(),
                kept: self.filter.keeps(doc),
            })
            .collect();

        Ok(SubmissionSummary {
            original_chars: submission.chars().count(),
            has_header: header.is_some(),
            documents,
        })
    }
}

/// Strip and normalise already-joined document text.
///
/// This is everything after classification. Running it on its own output
/// changes nothing beyond collapsing whitespace runs introduced by the
/// non-ASCII pass, which makes it the natural unit for idempotence checks.
pub fn clean_text(joined: &str, recollapse_whitespace: bool) -> String {
    let stripped = strip::strip_content(joined);
    let decoded = normalize::decode_entities(&stripped);
    let ascii = normalize::replace_non_ascii(&decoded);
    if recollapse_whitespace {
        strip::collapse_whitespace(&ascii)
    } else {
        ascii
    }
}
