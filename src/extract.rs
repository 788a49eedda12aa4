//! Eager extraction entry points.
//!
//! The pure core is [`extract_text`]: one submission string in, one
//! [`ExtractionOutput`] out, no I/O. Everything else here wraps it with
//! input resolution ([`extract`]), output writing ([`extract_to_file`]) or a
//! batch loop ([`extract_batch`]). Use [`crate::stream::extract_stream`]
//! instead of `extract_batch` to consume results as they finish.

use crate::config::ExtractionConfig;
use crate::error::EdgarError;
use crate::output::{BatchReport, ExtractionOutput, ExtractionStats, SubmissionSummary};
use crate::pipeline::{input, Pipeline};
use crate::stream::process_filing;
use futures::stream::{self, StreamExt};
use std::path::Path;
use tracing::info;

/// Clean one submission already held in memory.
///
/// Compiles the configuration on every call; build a
/// [`Pipeline`] yourself when cleaning many submissions in a loop.
///
/// # Errors
/// - [`EdgarError::InvalidConfig`] if an exclusion pattern does not compile
/// - [`EdgarError::EmptySubmission`] if `submission` is empty
///
/// # Example
/// ```rust
/// use edgar_clean::{extract_text, ExtractionConfig};
///
/// let submission = "<DOCUMENT>\n<TYPE>10-K\n<TEXT>\nRevenue grew.\n</TEXT>\n</DOCUMENT>";
/// let output = extract_text(submission, &ExtractionConfig::default()).unwrap();
/// assert!(output.text.contains("Revenue grew."));
/// assert_eq!(output.stats.documents_kept, 1);
/// ```
pub fn extract_text(
    submission: &str,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, EdgarError> {
    Pipeline::new(config)?.run(submission)
}

/// Clean a submission given as raw bytes, decoding them lossily as UTF-8.
pub fn extract_from_bytes(
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, EdgarError> {
    extract_text(&input::decode_bytes(bytes), config)
}

/// Read a submission from a local path or HTTP(S) URL and clean it.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Input errors (not found, permission denied, download failure or
/// timeout), configuration errors, and [`EdgarError::EmptySubmission`].
pub async fn extract(
    input_str: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, EdgarError> {
    let input_str = input_str.as_ref();
    info!("Starting extraction: {}", input_str);

    let pipeline = Pipeline::new(config)?;
    let submission = input::resolve_input(input_str, config).await?;
    pipeline.run(&submission)
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input_str: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, EdgarError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| EdgarError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(input_str, config))
}

/// Clean a submission and write the result directly to a file.
///
/// Uses atomic write (temp file + rename) so a crash never leaves a
/// half-written text behind for a later run to mistake as finished.
pub async fn extract_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, EdgarError> {
    let output = extract(input_str, config).await?;
    write_output(&output, output_path.as_ref(), config).await?;
    Ok(output.stats)
}

/// Write an already-extracted output to `path`, atomically.
pub async fn write_output(
    output: &ExtractionOutput,
    path: &Path,
    config: &ExtractionConfig,
) -> Result<(), EdgarError> {
    let write_err = |source| EdgarError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("txt.tmp");
    let written = match tokio::fs::write(&tmp_path, assemble_document(output, config)).await {
        Ok(()) => tokio::fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        // The original error is reported; a failed cleanup is not.
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }
    Ok(())
}

/// Clean many submissions concurrently, one result per input.
///
/// A failing input never stops the others; its error is recorded in the
/// report. Results come back in input order. At most `config.concurrency`
/// submissions are in flight at once.
///
/// # Errors
/// Only configuration errors are returned directly.
pub async fn extract_batch<I, S>(
    inputs: I,
    config: &ExtractionConfig,
) -> Result<BatchReport, EdgarError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let pipeline = Pipeline::new(config)?;
    let inputs: Vec<String> = inputs.into_iter().map(Into::into).collect();
    let total = inputs.len();
    info!("Starting batch of {} submissions", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut results: Vec<_> = stream::iter(inputs.into_iter().enumerate())
        .map(|(index, input)| process_filing(&pipeline, index, total, input, config))
        .buffer_unordered(config.concurrency)
        .collect()
        .await;
    results.sort_by_key(|r| r.index);

    let report = BatchReport { results };
    info!(
        "Batch complete: {}/{} submissions succeeded",
        report.succeeded(),
        total
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, report.succeeded());
    }

    Ok(report)
}

/// List the documents of a submission and whether the configured policy
/// keeps each of them, without cleaning anything.
pub async fn inspect(
    input_str: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<SubmissionSummary, EdgarError> {
    let pipeline = Pipeline::new(config)?;
    let submission = input::resolve_input(input_str.as_ref(), config).await?;
    pipeline.inspect(&submission)
}

/// The text written to disk for one output: the optional `<FileStats>`
/// block followed by the cleaned text.
pub fn assemble_document(output: &ExtractionOutput, config: &ExtractionConfig) -> String {
    if config.include_stats {
        let mut doc = output.stats.file_stats_block();
        doc.push_str(&output.text);
        doc
    } else {
        output.text.clone()
    }
}
