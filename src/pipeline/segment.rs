//! Segmentation: find the header and the `<DOCUMENT>` spans of a submission.
//!
//! A full-text submission is one flat file: an optional `<SEC-HEADER>` block
//! (`<IMS-HEADER>` in filings from the early 1990s) followed by any number of
//! `<DOCUMENT>…</DOCUMENT>` containers, one per exhibit, graphic, XBRL
//! instance and so on. The dialect is SGML-like: `<TYPE>`, `<FILENAME>` and
//! friends are usually left unterminated, running to the end of the line.
//!
//! Everything here is pattern matching over the whole buffer with
//! non-greedy spans, so a malformed container never swallows its neighbours.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static RE_TYPE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(<TYPE>)([^\s<]+)(</TYPE>)?").unwrap());

// Either start marker may close with either end marker.
static RE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:IMS-HEADER|SEC-HEADER)>.*?</(?:IMS-HEADER|SEC-HEADER)>").unwrap()
});

static RE_DOCUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<DOCUMENT[ >].*?</DOCUMENT>").unwrap());

static RE_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<FILENAME>([^\s<]+)").unwrap());

/// Close every unterminated `<TYPE>X` as `<TYPE>X</TYPE>`.
///
/// The filter matches `<TYPE>10-K</TYPE>` as whole text, which an
/// unterminated `<TYPE>10-K` line never would. Tags that are already closed
/// are left alone, so the rewrite is idempotent.
pub fn close_type_tags(text: &str) -> Cow<'_, str> {
    RE_TYPE_TAG.replace_all(text, |caps: &Captures<'_>| {
        if caps.get(3).is_some() {
            caps[0].to_string()
        } else {
            format!("{}{}</TYPE>", &caps[1], &caps[2])
        }
    })
}

/// Locate the header block and remove it from the buffer.
///
/// Returns `(None, text)` unchanged when the submission has no header.
pub fn take_header(text: String) -> (Option<String>, String) {
    let header = match RE_HEADER.find(&text) {
        Some(m) => m.as_str().to_string(),
        None => return (None, text),
    };
    let rest = text.replace(&header, "");
    (Some(header), rest)
}

/// Every `<DOCUMENT>` span, in order of appearance.
///
/// Matching is case-insensitive and stops at the nearest `</DOCUMENT>`. The
/// opening tag must be followed by a space or `>`, so `<DOCUMENT-COUNT>` in a
/// header is never mistaken for a container.
pub fn split_documents(text: &str) -> Vec<&str> {
    RE_DOCUMENT.find_iter(text).map(|m| m.as_str()).collect()
}

/// The first `<TYPE>` value of a document span.
pub fn type_label(doc: &str) -> Option<&str> {
    RE_TYPE_TAG
        .captures(doc)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str())
}

/// The first `<FILENAME>` value of a document span.
pub fn filename(doc: &str) -> Option<&str> {
    RE_FILENAME
        .captures(doc)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
