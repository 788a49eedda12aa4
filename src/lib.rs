//! # edgar-clean
//!
//! Turn SEC EDGAR full-text submissions into clean plain text.
//!
//! ## Why this crate?
//!
//! A full-text submission (`0000320193-20-000096.txt` and friends) bundles
//! the filer header, the main report, every exhibit, XBRL instance data,
//! embedded PDFs and uuencoded graphics into one SGML-wrapped file. Text
//! mining wants only the prose of the main report. This crate keeps the
//! documents of the form types you care about, strips everything that is
//! not prose and reports how much survived.
//!
//! ## Pipeline Overview
//!
//! ```text
//! submission
//!  │
//!  ├─ 1. Input      read a local file or download from EDGAR
//!  ├─ 2. Segment    close <TYPE> tags, excise the header, split documents
//!  ├─ 3. Classify   keep allowed form types, drop PDF attachments
//!  ├─ 4. Strip      XBRL, tables, privacy banners, markup, whitespace runs
//!  ├─ 5. Normalize  decode character references, non-ASCII → space
//!  └─ 6. Stats      characters kept, documents kept
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgar_clean::{extract, ExtractionConfig, FormSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder().forms(FormSet::TenK).build()?;
//!     let output = extract("0000320193-20-000096.txt", &config).await?;
//!     println!("{}", output.text);
//!     eprintln!("{}", output.stats);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `edgar-clean` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! edgar-clean = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod forms;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, FormSet, PDF_ATTACHMENT_PATTERN};
pub use error::EdgarError;
pub use extract::{
    assemble_document, extract, extract_batch, extract_from_bytes, extract_sync, extract_text,
    extract_to_file, inspect, write_output,
};
pub use output::{
    BatchReport, DocumentInfo, ExtractionOutput, ExtractionStats, FilingResult, SubmissionSummary,
};
pub use pipeline::Pipeline;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{extract_stream, FilingStream};
