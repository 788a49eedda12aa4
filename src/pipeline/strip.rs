//! Content stripping: reduce the kept documents to prose and whitespace.
//!
//! ## Rule Order
//!
//! The five rules run in a fixed order and the order is part of the
//! contract:
//!
//! 1. XBRL blocks and 2. tables go first, as whole spans. Their payloads are
//!    full of tags; stripping those tags individually would leave the numbers
//!    and cell labels behind as if they were prose.
//! 3. Privacy-enhanced-message banners are literal text, removed anywhere
//!    before the whitespace pass.
//! 4. The generic `<…>` strip is the catch-all and must come after every
//!    targeted removal.
//! 5. Whitespace collapsing runs last, cleaning up the gaps rules 1–4 leave.
//!
//! Every removal substitutes a single space so words on either side of a
//! tag never run together.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all stripping rules to the joined kept documents, in order.
pub fn strip_content(input: &str) -> String {
    let s = remove_xbrl(input);
    let s = remove_tables(&s);
    let s = remove_privacy_banners(&s);
    let s = remove_markup(&s);
    collapse_whitespace(&s)
}

// ── Rule 1: XBRL blocks ─────────────────────────────────────────────────────

static RE_XBRL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<XBRL[ >].*?</XBRL>").unwrap());

fn remove_xbrl(input: &str) -> String {
    RE_XBRL.replace_all(input, " ").into_owned()
}

// ── Rule 2: Tables ──────────────────────────────────────────────────────────

static RE_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<TABLE[ >].*?</TABLE>").unwrap());

fn remove_tables(input: &str) -> String {
    RE_TABLE.replace_all(input, " ").into_owned()
}

// ── Rule 3: Privacy-enhanced message banners ────────────────────────────────

static RE_PRIVACY_BEGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)-----BEGIN PRIVACY-ENHANCED MESSAGE-----").unwrap());

static RE_PRIVACY_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)-----END PRIVACY-ENHANCED MESSAGE-----").unwrap());

fn remove_privacy_banners(input: &str) -> String {
    let s = RE_PRIVACY_BEGIN.replace_all(input, " ");
    RE_PRIVACY_END.replace_all(&s, " ").into_owned()
}

// ── Rule 4: Remaining markup ────────────────────────────────────────────────

static RE_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<.*?>").unwrap());

fn remove_markup(input: &str) -> String {
    RE_MARKUP.replace_all(input, " ").into_owned()
}

// ── Rule 5: Whitespace runs ─────────────────────────────────────────────────

static RE_EXCESS_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{3,}").unwrap());

/// Replace every run of three or more whitespace characters with one space.
///
/// Runs of one or two are left alone: ordinary spacing and single line
/// breaks survive, layout padding does not.
pub fn collapse_whitespace(input: &str) -> String {
    RE_EXCESS_WHITESPACE.replace_all(input, " ").into_owned()
}

// ── Tests ────────────────────────────────────────────────────────────────────
