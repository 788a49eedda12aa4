//! SEC form-type codes recognised by the document filter.
//!
//! Every list the allowlist can be built from lives here, so extending the
//! defaults (say, adding a new small-business variant) means editing exactly
//! one place. Unit tests import the lists directly.
//!
//! Codes are matched case-insensitively against `<TYPE>…</TYPE>`, so the
//! spelling here only has to be right, not capitalised consistently with the
//! filings.

/// Annual reports.
pub const FORM_10K: &[&str] = &["10-K", "10-K405", "10KSB", "10-KSB", "10KSB40"];

/// Amended annual reports.
pub const FORM_10K_AMENDED: &[&str] = &["10-K/A", "10-K405/A", "10KSB/A", "10-KSB/A", "10KSB40/A"];

/// Annual transition reports and their amendments.
pub const FORM_10K_TRANSITION: &[&str] = &["10-KT", "10KT405", "10-KT/A", "10KT405/A"];

/// Quarterly reports.
pub const FORM_10Q: &[&str] = &["10-Q", "10QSB", "10-QSB"];

/// Amended quarterly reports.
pub const FORM_10Q_AMENDED: &[&str] = &["10-Q/A", "10QSB/A", "10-QSB/A"];

/// Quarterly transition reports and their amendments.
pub const FORM_10Q_TRANSITION: &[&str] = &["10-QT", "10-QT/A"];

/// Regulation A+ offering and reporting forms.
pub const FORM_REGULATION_A: &[&str] = &["1-A", "1-A/A", "1-K", "1-SA", "1-U", "1-Z"];

/// Every annual-report variant (10-K, amendments, transition forms).
pub fn annual() -> Vec<String> {
    collect(&[FORM_10K, FORM_10K_AMENDED, FORM_10K_TRANSITION])
}

/// Every quarterly-report variant (10-Q, amendments, transition forms).
pub fn quarterly() -> Vec<String> {
    collect(&[FORM_10Q, FORM_10Q_AMENDED, FORM_10Q_TRANSITION])
}

/// The default allowlist: all annual and quarterly variants.
pub fn ten_x() -> Vec<String> {
    let mut forms = annual();
    forms.extend(quarterly());
    forms
}

/// Regulation A+ forms.
pub fn regulation_a() -> Vec<String> {
    collect(&[FORM_REGULATION_A])
}

fn collect(groups: &[&[&str]]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|g| g.iter().map(|s| s.to_string()))
        .collect()
}
