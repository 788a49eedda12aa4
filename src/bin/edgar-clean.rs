//! CLI binary for edgar-clean.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig`, drives the streaming batch API and writes results.

use anyhow::{Context, Result};
use clap::Parser;
use edgar_clean::pipeline::input::{is_url, output_paths};
use edgar_clean::{
    assemble_document, extract_from_bytes, extract_stream, inspect, write_output, EdgarError,
    ExtractionConfig, ExtractionOutput, ExtractionProgressCallback, ExtractionStats, FormSet,
    Pipeline, ProgressCallback, SubmissionSummary,
};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const STDIN_INPUT: &str = "-";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch and one log line per
/// submission. Submissions finish out of order when concurrency > 1, so the
/// per-filing state is keyed by batch index.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Start time and input name of every submission in flight.
    in_flight: Mutex<HashMap<usize, (Instant, String)>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading submissions…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            in_flight: Mutex::new(HashMap::new()),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} filings  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Cleaning");
        self.bar.reset_eta();
    }

    /// Remove the in-flight entry for `index`, returning its input name and
    /// elapsed seconds.
    fn finish(&self, index: usize) -> (String, f64) {
        self.in_flight
            .lock()
            .unwrap()
            .remove(&index)
            .map(|(t, input)| (input, t.elapsed().as_secs_f64()))
            .unwrap_or_default()
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total: usize) {
        self.activate_bar(total);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Cleaning {total} submissions…"))
        ));
    }

    fn on_filing_start(&self, index: usize, _total: usize, input: &str) {
        self.in_flight
            .lock()
            .unwrap()
            .insert(index, (Instant::now(), input.to_string()));
        self.bar.set_message(input.to_string());
    }

    fn on_filing_complete(&self, index: usize, total: usize, stats: &ExtractionStats) {
        let (input, secs) = self.finish(index);
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}  {}",
            green("✓"),
            index + 1,
            total,
            input,
            dim(&stats.to_string()),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_filing_error(&self, index: usize, total: usize, error: &str) {
        let (input, secs) = self.finish(index);

        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}  {}",
            red("✗"),
            index + 1,
            total,
            input,
            red(&msg),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total: usize, succeeded: usize) {
        let failed = total.saturating_sub(succeeded);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} submissions cleaned successfully",
                green("✔"),
                bold(&succeeded.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} submissions cleaned  ({} failed)",
                if failed == total { red("✘") } else { cyan("⚠") },
                bold(&succeeded.to_string()),
                total,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Clean one submission to stdout
  edgar-clean 0000320193-20-000096.txt

  # Clean to a file, with the <FileStats> block on top
  edgar-clean --stats 0000320193-20-000096.txt -o apple-10k.txt

  # Download straight from EDGAR
  edgar-clean --user-agent "Jane Doe jane@example.com" \
    https://www.sec.gov/Archives/edgar/data/320193/0000320193-20-000096.txt

  # Clean a directory of quarterly reports, 8 at a time
  edgar-clean --forms 10q -c 8 --output-dir clean/ raw/*.txt

  # Only keep exact form types
  edgar-clean --form-type 10-K --form-type 10-K/A filing.txt

  # Show which documents would be kept, without cleaning
  edgar-clean --inspect-only filing.txt

  # Read from stdin
  zcat filing.txt.gz | edgar-clean - > filing.clean.txt

FORM PRESETS (--forms):
  10k   10-K, 10-K405, 10KSB, 10-KSB, 10KSB40, amendments, 10-KT transition reports
  10q   10-Q, 10QSB, 10-QSB, amendments, 10-QT transition reports
  10x   10k + 10q (default)
  1x    Regulation A: 1-A, 1-A/A, 1-K, 1-SA, 1-U, 1-Z

ENVIRONMENT VARIABLES:
  EDGAR_CLEAN_USER_AGENT    User-Agent for downloads. SEC asks for a name and
                            contact e-mail; requests without one may be refused.
  RUST_LOG                  Override the log filter (e.g. edgar_clean=debug)
"#;

/// Extract clean plain text from SEC EDGAR full-text submissions.
#[derive(Parser, Debug)]
#[command(
    name = "edgar-clean",
    version,
    about = "Extract clean plain text from SEC EDGAR full-text submissions",
    long_about = "Extract the prose of selected form types (10-K, 10-Q, Regulation A, ...) from \
SEC EDGAR full-text submission files. Removes the filer header, exhibits, XBRL, tables, markup \
and non-ASCII characters, and reports how much of each submission was kept.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local submission paths, HTTP/HTTPS URLs, or `-` for stdin.
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<String>,

    /// Write cleaned text to this file instead of stdout (single input).
    #[arg(short, long, env = "EDGAR_CLEAN_OUTPUT", conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write one `<name>.txt` per input into this directory.
    #[arg(long, env = "EDGAR_CLEAN_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Form-type preset whose documents are kept.
    #[arg(long, env = "EDGAR_CLEAN_FORMS", value_enum, default_value = "10x")]
    forms: FormsArg,

    /// Keep only this exact form type (repeatable; replaces --forms).
    #[arg(long = "form-type", value_name = "TYPE")]
    form_types: Vec<String>,

    /// Drop documents matching this regex (repeatable).
    #[arg(long = "exclude", value_name = "REGEX")]
    excludes: Vec<String>,

    /// Keep PDF attachments (drop the default `<FILENAME>…\.pdf` rule).
    #[arg(long, env = "EDGAR_CLEAN_NO_DEFAULT_EXCLUSIONS")]
    no_default_exclusions: bool,

    /// Prepend a <FileStats> block to written output.
    #[arg(long, env = "EDGAR_CLEAN_STATS")]
    stats: bool,

    /// Collapse whitespace runs left by entity decoding and non-ASCII replacement.
    #[arg(long, env = "EDGAR_CLEAN_RECOLLAPSE_WHITESPACE")]
    recollapse_whitespace: bool,

    /// Output structured JSON (ExtractionOutput) instead of plain text.
    #[arg(long, env = "EDGAR_CLEAN_JSON", conflicts_with_all = ["output", "output_dir"])]
    json: bool,

    /// List documents and the keep decision for each, no cleaning.
    #[arg(long)]
    inspect_only: bool,

    /// Number of submissions processed concurrently.
    #[arg(short, long, env = "EDGAR_CLEAN_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "EDGAR_CLEAN_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// User-Agent header for downloads.
    #[arg(long, env = "EDGAR_CLEAN_USER_AGENT")]
    user_agent: Option<String>,

    /// Disable progress bar.
    #[arg(long, env = "EDGAR_CLEAN_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "EDGAR_CLEAN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "EDGAR_CLEAN_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormsArg {
    #[value(name = "10k")]
    TenK,
    #[value(name = "10q")]
    TenQ,
    #[value(name = "10x")]
    TenX,
    #[value(name = "1x")]
    RegulationA,
}

impl From<FormsArg> for FormSet {
    fn from(v: FormsArg) -> Self {
        match v {
            FormsArg::TenK => FormSet::TenK,
            FormsArg::TenQ => FormSet::TenQ,
            FormsArg::TenX => FormSet::TenX,
            FormsArg::RegulationA => FormSet::RegulationA,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    check_inputs(&cli)?;

    let progress_cb = if show_progress && !is_stdin(&cli) {
        Some(CliProgressCallback::new())
    } else {
        None
    };
    let config = build_config(&cli, progress_cb.clone().map(|cb| cb as ProgressCallback))?;

    // ── Stdin ────────────────────────────────────────────────────────────
    if is_stdin(&cli) {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read submission from stdin")?;

        if cli.inspect_only {
            let text = String::from_utf8_lossy(&bytes);
            let summary = Pipeline::new(&config)?.inspect(&text)?;
            return print_summary(&cli, STDIN_INPUT, &summary);
        }

        let output = extract_from_bytes(&bytes, &config).context("Extraction failed")?;
        let target = match (&cli.output_dir, &cli.output) {
            (Some(dir), _) => Some(dir.join("stdin.txt")),
            (None, path) => path.clone(),
        };
        emit(&cli, &config, target.as_deref(), &output).await?;
        if !cli.quiet {
            eprintln!("{}", output.stats);
        }
        return Ok(());
    }

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        for input in &cli.inputs {
            let summary = inspect(input, &config)
                .await
                .with_context(|| format!("Failed to inspect {input}"))?;
            print_summary(&cli, input, &summary)?;
        }
        return Ok(());
    }

    // ── Run extraction ───────────────────────────────────────────────────
    let total = cli.inputs.len();
    let started = Instant::now();
    let mut succeeded = 0usize;
    let targets = output_targets(&cli)?;
    let mut results = extract_stream(cli.inputs.clone(), &config).context("Invalid configuration")?;

    while let Some(filing) = results.next().await {
        let output = match filing.result {
            Ok(output) => output,
            Err(e) => {
                // The progress bar has already printed this one.
                if !show_progress {
                    eprintln!("{} {}: {}", red("✗"), filing.input, e);
                }
                continue;
            }
        };

        let target = targets[filing.index].as_deref();
        match emit(&cli, &config, target, &output).await {
            Ok(path) => {
                succeeded += 1;
                if !cli.quiet && !show_progress {
                    let target = path
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stdout".to_string());
                    eprintln!(
                        "{}  {}  {}  →  {}",
                        green("✔"),
                        filing.input,
                        output.stats,
                        bold(&target)
                    );
                }
            }
            Err(e) => eprintln!("{} {}: {:#}", red("✗"), filing.input, e),
        }
    }

    if let Some(cb) = progress_cb {
        cb.on_batch_complete(total, succeeded);
    } else if !cli.quiet && total > 1 {
        eprintln!(
            "Cleaned {}/{} submissions in {}ms",
            succeeded,
            total,
            started.elapsed().as_millis()
        );
    }

    if succeeded < total {
        return Err(EdgarError::BatchFailed {
            failed: total - succeeded,
            total,
        }
        .into());
    }
    Ok(())
}

fn is_stdin(cli: &Cli) -> bool {
    cli.inputs.len() == 1 && cli.inputs[0] == STDIN_INPUT
}

/// Reject input/output combinations that have no sensible meaning.
fn check_inputs(cli: &Cli) -> Result<()> {
    if cli.inputs.len() > 1 && cli.inputs.iter().any(|i| i == STDIN_INPUT) {
        anyhow::bail!("`-` (stdin) cannot be combined with other inputs");
    }
    if cli.inputs.len() > 1 && !cli.inspect_only && cli.output_dir.is_none() && !cli.json {
        anyhow::bail!("Several inputs need --output-dir (or --json)");
    }
    if cli.inputs.len() > 1 && cli.output.is_some() {
        anyhow::bail!("--output takes a single input; use --output-dir for several");
    }
    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .forms(cli.forms.into())
        .recollapse_whitespace(cli.recollapse_whitespace)
        .include_stats(cli.stats)
        .concurrency(cli.concurrency)
        .download_timeout_secs(cli.download_timeout);

    if !cli.form_types.is_empty() {
        builder = builder.allowed_types(cli.form_types.iter().cloned());
    }
    if cli.no_default_exclusions {
        builder = builder.no_exclusions();
    }
    for pattern in &cli.excludes {
        builder = builder.exclude_pattern(pattern.clone());
    }
    if let Some(ref agent) = cli.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Where each input's cleaned text goes, in input order; `None` is stdout.
///
/// Resolved before any submission is processed so that a batch can never
/// write two inputs to the same file or overwrite one of its own inputs.
fn output_targets(cli: &Cli) -> Result<Vec<Option<PathBuf>>> {
    match (&cli.output_dir, &cli.output) {
        (Some(dir), _) => Ok(output_paths(&cli.inputs, dir)?
            .into_iter()
            .map(Some)
            .collect()),
        (None, Some(path)) => {
            for input in cli.inputs.iter().filter(|i| !is_url(i)) {
                if same_file(Path::new(input), path) {
                    anyhow::bail!("--output {} would overwrite its own input", path.display());
                }
            }
            Ok(vec![Some(path.clone()); cli.inputs.len()])
        }
        (None, None) => Ok(vec![None; cli.inputs.len()]),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Deliver one output to `target`, or to stdout when there is none.
async fn emit(
    cli: &Cli,
    config: &ExtractionConfig,
    target: Option<&Path>,
    output: &ExtractionOutput,
) -> Result<Option<PathBuf>> {
    if let Some(path) = target {
        write_output(output, path, config)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(Some(path.to_path_buf()));
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        let json = serde_json::to_string(output).context("Failed to serialise output")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else {
        let doc = assemble_document(output, config);
        handle
            .write_all(doc.as_bytes())
            .context("Failed to write to stdout")?;
        if !doc.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }
    Ok(None)
}

fn print_summary(cli: &Cli, input: &str, summary: &SubmissionSummary) -> Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).context("Failed to serialize summary")?
        );
        return Ok(());
    }

    println!("File:         {}", input);
    println!("Characters:   {}", summary.original_chars);
    println!("Header:       {}", if summary.has_header { "yes" } else { "no" });
    println!(
        "Documents:    {}/{} kept",
        summary.documents_kept(),
        summary.documents.len()
    );
    for doc in &summary.documents {
        println!(
            "  {} {:>3}  {:<12} {:<28} {:>10} chars",
            if doc.kept { green("✓") } else { dim("·") },
            doc.index + 1,
            doc.doc_type.as_deref().unwrap_or("?"),
            doc.filename.as_deref().unwrap_or("-"),
            doc.chars,
        );
    }
    println!();
    Ok(())
}
