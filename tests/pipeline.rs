//! Integration tests for edgar-clean.
//!
//! Every fixture is a literal submission assembled below, so these tests
//! need neither network access nor sample files on disk beyond what they
//! write into a temporary directory.

use edgar_clean::pipeline::clean_text;
use edgar_clean::{
    extract, extract_batch, extract_stream, extract_text, extract_to_file, inspect, EdgarError,
    ExtractionConfig, ExtractionProgressCallback, ExtractionStats, FormSet, NoopProgressCallback,
};
use futures::StreamExt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── Fixtures ─────────────────────────────────────────────────────────────────

const HEADER: &str = "<SEC-HEADER>0000950123-20-000001.hdr.sgml : 20200131\n\
ACCESSION NUMBER:\t\t0000950123-20-000001\n\
CONFORMED SUBMISSION TYPE:\t10-K\n\
COMPANY CONFORMED NAME:\t\t\tACME WIDGETS INC\n\
</SEC-HEADER>\n";

fn document(form_type: &str, filename: &str, body: &str) -> String {
    format!(
        "<DOCUMENT>\n<TYPE>{form_type}\n<SEQUENCE>1\n<FILENAME>{filename}\n<TEXT>\n{body}\n</TEXT>\n</DOCUMENT>\n"
    )
}

/// A 10-K with one exhibit, one XBRL instance and one PDF copy of the report.
fn annual_report() -> String {
    let mut s = String::from("<SEC-DOCUMENT>0000950123-20-000001.txt : 20200131\n");
    s.push_str(HEADER);
    s.push_str(&document(
        "10-K",
        "acme-10k.htm",
        "<HTML><BODY><P>Item 7. Management discussed revenue growth.</P>\n\
         <TABLE><TR><TD>Revenue</TD><TD>1,234</TD></TR></TABLE>\n\
         <P>Risk factors are described below.</P></BODY></HTML>",
    ));
    s.push_str(&document(
        "EX-21",
        "ex21.htm",
        "<P>Subsidiaries of the registrant: Acme Europe GmbH.</P>",
    ));
    s.push_str(&document(
        "EX-101.INS",
        "acme-20191231.xml",
        "<XBRL>\n<xbrli:xbrl>us-gaap:Revenues 1234</xbrli:xbrl>\n</XBRL>",
    ));
    s.push_str(&document("10-K", "acme-10k.pdf", "%PDF-1.4 binary junk"));
    s.push_str("</SEC-DOCUMENT>\n");
    s
}

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ── Pipeline behaviour ───────────────────────────────────────────────────────

#[test]
fn test_single_document_prose_survives() {
    let submission = "<DOCUMENT>\n<TYPE>10-K\n<TEXT>\n<P>hello    world</P>\n</TEXT>\n</DOCUMENT>";
    let out = extract_text(submission, &ExtractionConfig::default()).unwrap();

    assert_eq!(words(&out.text), ["10-K", "hello", "world"]);
    assert!(out.text.contains("hello world"));
    assert_eq!(out.stats.documents_kept, 1);
    assert_eq!(out.stats.documents_total, 1);
    assert!(out.header.is_none());
}

#[test]
fn test_annual_report_keeps_only_main_document() {
    let out = extract_text(&annual_report(), &ExtractionConfig::default()).unwrap();

    assert!(out.text.contains("Management discussed revenue growth."));
    assert!(out.text.contains("Risk factors are described below."));
    // Exhibit, XBRL instance and PDF copy are all dropped.
    assert!(!out.text.contains("Subsidiaries"));
    assert!(!out.text.contains("us-gaap"));
    assert!(!out.text.contains("%PDF"));
    // Table content goes with the table.
    assert!(!out.text.contains("1,234"));
    // The header is returned separately, never in the text.
    assert!(!out.text.contains("ACCESSION NUMBER"));
    assert!(out.header.as_deref().unwrap().contains("ACME WIDGETS INC"));

    assert_eq!(out.stats.documents_total, 4);
    assert_eq!(out.stats.documents_kept, 1);
    assert!(out.stats.percent_kept > 0.0 && out.stats.percent_kept < 100.0);
}

#[test]
fn test_pdf_attachment_kept_without_default_exclusions() {
    let config = ExtractionConfig::builder().no_exclusions().build().unwrap();
    let out = extract_text(&annual_report(), &config).unwrap();

    assert_eq!(out.stats.documents_kept, 2);
    assert!(out.text.contains("%PDF-1.4 binary junk"));
}

#[test]
fn test_custom_exclusion_drops_matching_document() {
    let config = ExtractionConfig::builder()
        .exclude_pattern("Risk factors")
        .build()
        .unwrap();
    let out = extract_text(&annual_report(), &config).unwrap();

    assert_eq!(out.stats.documents_kept, 0);
    assert_eq!(out.text, "");
}

#[test]
fn test_explicit_form_types_replace_preset() {
    let config = ExtractionConfig::builder()
        .allowed_types(["EX-21"])
        .build()
        .unwrap();
    let out = extract_text(&annual_report(), &config).unwrap();

    assert_eq!(out.stats.documents_kept, 1);
    assert!(out.text.contains("Acme Europe GmbH."));
    assert!(!out.text.contains("Management discussed"));
}

#[test]
fn test_quarterly_preset_drops_annual_report() {
    let config = ExtractionConfig::builder().forms(FormSet::TenQ).build().unwrap();
    let out = extract_text(&annual_report(), &config).unwrap();
    assert_eq!(out.stats.documents_kept, 0);
    assert_eq!(out.stats.documents_total, 4);
}

#[test]
fn test_regulation_a_offering() {
    let submission = document("1-A", "offering.htm", "<P>Offering circular.</P>");
    let config = ExtractionConfig::builder()
        .forms(FormSet::RegulationA)
        .build()
        .unwrap();
    let out = extract_text(&submission, &config).unwrap();
    assert!(out.text.contains("Offering circular."));

    let default_out = extract_text(&submission, &ExtractionConfig::default()).unwrap();
    assert_eq!(default_out.stats.documents_kept, 0);
}

#[test]
fn test_lowercase_containers_and_types() {
    let submission = "<document>\n<type>10-q\n<text>\nQuarterly prose.\n</text>\n</document>";
    let out = extract_text(submission, &ExtractionConfig::default()).unwrap();
    assert_eq!(out.stats.documents_kept, 1);
    assert!(out.text.contains("Quarterly prose."));
}

#[test]
fn test_ims_header_removed() {
    let submission = "<IMS-HEADER>\nFILER: OLD CORP\n</IMS-HEADER>\n\
        <DOCUMENT>\n<TYPE>10-K405\n<TEXT>\nLegacy annual report.\n</TEXT>\n</DOCUMENT>";
    let out = extract_text(submission, &ExtractionConfig::default()).unwrap();
    assert!(out.header.as_deref().unwrap().starts_with("<IMS-HEADER>"));
    assert!(!out.text.contains("OLD CORP"));
    assert!(out.text.contains("Legacy annual report."));
}

#[test]
fn test_privacy_banners_removed() {
    let submission = "-----BEGIN PRIVACY-ENHANCED MESSAGE-----\n\
        <DOCUMENT>\n<TYPE>10-K\n<TEXT>\nSigned prose.\n</TEXT>\n</DOCUMENT>\n\
        -----END PRIVACY-ENHANCED MESSAGE-----";
    let out = extract_text(submission, &ExtractionConfig::default()).unwrap();
    assert!(out.text.contains("Signed prose."));
    assert!(!out.text.contains("PRIVACY"));
}

#[test]
fn test_entities_decoded_and_output_is_ascii() {
    let body = "<P>AT&amp;T&#8217;s caf&eacute; &lt;unchanged&gt; \u{201C}quoted\u{201D}</P>";
    let submission = document("10-K", "a.htm", body);
    let out = extract_text(&submission, &ExtractionConfig::default()).unwrap();

    assert!(out.text.is_ascii());
    assert!(out.text.contains("AT&T s caf "));
    assert!(out.text.contains("<unchanged>"));
    assert!(out.text.contains(" quoted "));
}

#[test]
fn test_no_documents_yields_empty_text() {
    let out = extract_text("plain text with no containers at all", &ExtractionConfig::default())
        .unwrap();
    assert_eq!(out.text, "");
    assert_eq!(out.stats.current_chars, 0);
    assert_eq!(out.stats.percent_kept, 0.0);
    assert_eq!((out.stats.documents_kept, out.stats.documents_total), (0, 0));
}

#[test]
fn test_empty_submission_is_error() {
    let err = extract_text("", &ExtractionConfig::default()).unwrap_err();
    assert!(matches!(err, EdgarError::EmptySubmission));
}

/// Log sink shared between a test and the subscriber it installs.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_summary_line_is_logged() {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || sink.clone())
        .finish();

    let out = tracing::subscriber::with_default(subscriber, || {
        extract_text(&annual_report(), &ExtractionConfig::default()).unwrap()
    });

    let captured = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(captured.contains("INFO"), "got: {captured}");
    assert!(captured.contains(&out.stats.to_string()), "got: {captured}");
    assert!(captured.contains("% and 1/4 documents kept."));
}

// ── Properties ───────────────────────────────────────────────────────────────

fn property_fixtures() -> Vec<String> {
    vec![
        annual_report(),
        document("10-Q", "q.htm", "<P>caf\u{e9}     na\u{ef}ve\t\t\tprose</P>"),
        document("10-K", "k.htm", "no markup at all"),
        "<DOCUMENT>\n<TYPE>10-K\n</DOCUMENT><DOCUMENT>\n<TYPE>EX-99\n</DOCUMENT>".to_string(),
        "no documents".to_string(),
    ]
}

#[test]
fn test_kept_never_exceeds_total_and_output_ascii() {
    for fixture in property_fixtures() {
        let out = extract_text(&fixture, &ExtractionConfig::default()).unwrap();
        assert!(out.stats.documents_kept <= out.stats.documents_total);
        assert!(out.text.is_ascii(), "non-ASCII output for {fixture:?}");
        assert!(out.stats.current_chars <= out.stats.original_chars);
    }
}

#[test]
fn test_recollapse_leaves_no_long_whitespace_runs() {
    let config = ExtractionConfig::builder()
        .recollapse_whitespace(true)
        .build()
        .unwrap();
    for fixture in property_fixtures() {
        let out = extract_text(&fixture, &config).unwrap();
        let longest_run = out
            .text
            .split(|c: char| !c.is_whitespace())
            .map(|run| run.chars().count())
            .max()
            .unwrap_or(0);
        assert!(longest_run < 3, "whitespace run of {longest_run} in {:?}", out.text);
    }
}

#[test]
fn test_cleaning_is_idempotent_on_plain_prose() {
    let out = extract_text(&annual_report(), &ExtractionConfig::default()).unwrap();
    assert_eq!(clean_text(&out.text, false), out.text);
}

// ── I/O entry points ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_extract_reads_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "0000950123-20-000001.txt", &annual_report());

    let out = extract(path.to_str().unwrap(), &ExtractionConfig::default())
        .await
        .unwrap();
    assert_eq!(out.stats.documents_kept, 1);
    assert!(out.text.contains("revenue growth"));
}

#[test]
fn test_extract_blocking_with_tokio_test() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "filing.txt", &annual_report());
    let config = ExtractionConfig::default();

    let out = tokio_test::block_on(extract(path.to_str().unwrap(), &config)).unwrap();
    assert_eq!(out.stats.documents_total, 4);
}

#[tokio::test]
async fn test_extract_missing_file() {
    let err = extract("/no/such/dir/filing.txt", &ExtractionConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EdgarError::FileNotFound { .. }));
}

#[tokio::test]
async fn test_extract_to_file_with_stats_block() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "filing.txt", &annual_report());
    let output = dir.path().join("clean").join("filing.txt");

    let config = ExtractionConfig::builder().include_stats(true).build().unwrap();
    let stats = extract_to_file(input.to_str().unwrap(), &output, &config)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("<FileStats>\n\n    <OriginalChars>"));
    assert!(written.contains(&format!("<CurrentChars>{}</CurrentChars>", stats.current_chars)));
    assert!(written.contains("Management discussed revenue growth."));
    assert!(!output.with_extension("txt.tmp").exists());
}

#[tokio::test]
async fn test_inspect_reports_keep_decisions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "filing.txt", &annual_report());

    let summary = inspect(path.to_str().unwrap(), &ExtractionConfig::default())
        .await
        .unwrap();
    assert!(summary.has_header);
    assert_eq!(summary.documents.len(), 4);
    assert_eq!(summary.documents_kept(), 1);

    let pdf = &summary.documents[3];
    assert_eq!(pdf.doc_type.as_deref(), Some("10-K"));
    assert_eq!(pdf.filename.as_deref(), Some("acme-10k.pdf"));
    assert!(!pdf.kept);
}

// ── Batches ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct CountingCallback {
    started: AtomicUsize,
    completed: AtomicUsize,
    errors: AtomicUsize,
    batch_total: AtomicUsize,
    batch_succeeded: AtomicUsize,
}

impl ExtractionProgressCallback for CountingCallback {
    fn on_batch_start(&self, total: usize) {
        self.batch_total.store(total, Ordering::SeqCst);
    }
    fn on_filing_start(&self, _index: usize, _total: usize, _input: &str) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }
    fn on_filing_complete(&self, _index: usize, _total: usize, _stats: &ExtractionStats) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
    fn on_filing_error(&self, _index: usize, _total: usize, _error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
    fn on_batch_complete(&self, _total: usize, succeeded: usize) {
        self.batch_succeeded.store(succeeded, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_batch_isolates_failures_and_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_fixture(dir.path(), "a.txt", &annual_report());
    let second = write_fixture(dir.path(), "b.txt", &document("10-Q", "q.htm", "Quarter."));
    let missing = dir.path().join("missing.txt");

    let cb = Arc::new(CountingCallback::default());
    let config = ExtractionConfig::builder()
        .concurrency(2)
        .progress_callback(cb.clone())
        .build()
        .unwrap();

    let inputs = [&first, &missing, &second].map(|p| p.to_string_lossy().into_owned());
    let report = extract_batch(inputs.clone(), &config).await.unwrap();

    assert_eq!(report.total(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    for (i, result) in report.results.iter().enumerate() {
        assert_eq!(result.index, i);
        assert_eq!(result.input, inputs[i]);
    }
    assert!(matches!(
        report.results[1].result,
        Err(EdgarError::FileNotFound { .. })
    ));

    assert_eq!(cb.batch_total.load(Ordering::SeqCst), 3);
    assert_eq!(cb.started.load(Ordering::SeqCst), 3);
    assert_eq!(cb.completed.load(Ordering::SeqCst), 2);
    assert_eq!(cb.errors.load(Ordering::SeqCst), 1);
    assert_eq!(cb.batch_succeeded.load(Ordering::SeqCst), 2);

    let err = report.into_result().unwrap_err();
    assert!(matches!(err, EdgarError::BatchFailed { failed: 1, total: 3 }));
}

#[tokio::test]
async fn test_stream_yields_every_input() {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<String> = (0..5)
        .map(|i| {
            let body = format!("Report number {i}.");
            write_fixture(dir.path(), &format!("{i}.txt"), &document("10-K", "k.htm", &body))
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    let config = ExtractionConfig::builder()
        .concurrency(3)
        .progress_callback(Arc::new(NoopProgressCallback))
        .build()
        .unwrap();
    let mut results: Vec<_> = extract_stream(inputs, &config).unwrap().collect().await;
    results.sort_by_key(|r| r.index);

    assert_eq!(results.len(), 5);
    for (i, filing) in results.iter().enumerate() {
        let out = filing.result.as_ref().unwrap();
        assert!(out.text.contains(&format!("Report number {i}.")));
    }
}

#[test]
fn test_stream_rejects_invalid_config() {
    let mut config = ExtractionConfig::default();
    config.excluded_patterns.push("(unclosed".to_string());
    let result = extract_stream(Vec::<String>::new(), &config);
    assert!(matches!(result, Err(EdgarError::InvalidConfig(_))));
}
