//! Streaming batch API: emit each submission's result as soon as it is done.
//!
//! Unlike the eager [`crate::extract::extract_batch`], which returns only
//! after every input has been attempted, [`extract_stream`] yields a
//! [`FilingResult`] per input in completion order. Callers that write each
//! cleaned text to disk as it arrives never hold more than
//! `config.concurrency` submissions in memory.

use crate::config::ExtractionConfig;
use crate::error::EdgarError;
use crate::output::FilingResult;
use crate::pipeline::{input, Pipeline};
use futures::stream::{self, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::{info, warn};

/// A boxed stream of per-submission results.
pub type FilingStream = Pin<Box<dyn Stream<Item = FilingResult> + Send>>;

/// Clean many submissions, streaming results as they complete.
///
/// Results arrive in completion order, not input order; use
/// [`FilingResult::index`] to restore it. `on_batch_start` fires here;
/// `on_batch_complete` is left to the consumer, which alone knows when it
/// has drained the stream.
///
/// # Returns
/// - `Ok(FilingStream)` — one item per input, failures included
/// - `Err(EdgarError)` — the configuration does not compile
///
/// # Example
/// ```rust,no_run
/// use edgar_clean::{extract_stream, ExtractionConfig};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let inputs = vec!["0000320193-20-000096.txt".to_string()];
/// let mut results = extract_stream(inputs, &ExtractionConfig::default())?;
/// while let Some(filing) = results.next().await {
///     match filing.result {
///         Ok(out) => println!("{}: {}", filing.input, out.stats),
///         Err(e) => eprintln!("{}: {e}", filing.input),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn extract_stream<I, S>(inputs: I, config: &ExtractionConfig) -> Result<FilingStream, EdgarError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let pipeline = Arc::new(Pipeline::new(config)?);
    let inputs: Vec<String> = inputs.into_iter().map(Into::into).collect();
    let total = inputs.len();
    info!("Starting streaming batch of {} submissions", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let concurrency = config.concurrency;
    let config_clone = config.clone();

    let s = stream::iter(inputs.into_iter().enumerate().map(move |(index, input)| {
        let pipeline = Arc::clone(&pipeline);
        let cfg = config_clone.clone();
        async move { process_filing(&pipeline, index, total, input, &cfg).await }
    }))
    .buffer_unordered(concurrency);

    Ok(Box::pin(s))
}

/// Resolve and clean one input of a batch, firing progress callbacks.
///
/// Never fails: the outcome, good or bad, is carried in the returned
/// [`FilingResult`].
pub(crate) async fn process_filing(
    pipeline: &Pipeline,
    index: usize,
    total: usize,
    input_str: String,
    config: &ExtractionConfig,
) -> FilingResult {
    if let Some(ref cb) = config.progress_callback {
        cb.on_filing_start(index, total, &input_str);
    }

    let result = match input::resolve_input(&input_str, config).await {
        Ok(submission) => pipeline.run(&submission),
        Err(e) => Err(e),
    };

    match &result {
        Ok(output) => {
            if let Some(ref cb) = config.progress_callback {
                cb.on_filing_complete(index, total, &output.stats);
            }
        }
        Err(e) => {
            warn!("Submission {} ({}) failed: {}", index + 1, input_str, e);
            if let Some(ref cb) = config.progress_callback {
                cb.on_filing_error(index, total, &e.to_string());
            }
        }
    }

    FilingResult {
        index,
        input: input_str,
        result,
    }
}
