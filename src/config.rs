//! Configuration types for submission text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. The filtering policy (allowed form
//! types, exclusion patterns) is plain data: it is compiled once into a
//! [`crate::pipeline::Pipeline`] and never mutated afterwards, so one config
//! can be shared by every concurrent extraction in a batch.

use crate::error::EdgarError;
use crate::forms;
use crate::progress::ProgressCallback;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exclusion rule applied by default: the document declares a PDF attachment.
pub const PDF_ATTACHMENT_PATTERN: &str = r"<FILENAME>.*?\.pdf";

/// Configuration for extracting clean text from EDGAR submissions.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgar_clean::{ExtractionConfig, FormSet};
///
/// let config = ExtractionConfig::builder()
///     .forms(FormSet::TenK)
///     .include_stats(true)
///     .build()
///     .unwrap();
/// assert!(config.allowed_types.iter().any(|t| t == "10-K405"));
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Form types whose documents are kept. Default: every 10-K and 10-Q variant.
    ///
    /// A document is a candidate when it contains `<TYPE>t</TYPE>` for any
    /// `t` here, compared case-insensitively.
    pub allowed_types: Vec<String>,

    /// Regular expressions that drop a document even when its type is allowed.
    /// Default: [`PDF_ATTACHMENT_PATTERN`].
    pub excluded_patterns: Vec<String>,

    /// Collapse whitespace runs again after entity decoding. Default: false.
    ///
    /// Entity decoding and non-ASCII replacement run after the whitespace
    /// collapse, so `&nbsp;&nbsp;&nbsp;` survives as a three-space run. The
    /// default keeps that behaviour so output stays comparable with earlier
    /// corpora; enable this for cleaner text.
    pub recollapse_whitespace: bool,

    /// Prepend a `<FileStats>` block to written output. Default: false.
    pub include_stats: bool,

    /// Number of submissions fetched and cleaned concurrently in batch mode. Default: 4.
    ///
    /// EDGAR throttles clients that exceed ten requests per second; keep this
    /// low when the inputs are URLs.
    pub concurrency: usize,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// `User-Agent` header sent with every download.
    ///
    /// EDGAR answers 403 to requests without a descriptive agent; the SEC asks
    /// for a company name and contact address.
    pub user_agent: String,

    /// Receives per-submission events from the batch entry points.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            allowed_types: FormSet::default().forms(),
            excluded_patterns: vec![PDF_ATTACHMENT_PATTERN.to_string()],
            recollapse_whitespace: false,
            include_stats: false,
            concurrency: 4,
            download_timeout_secs: 120,
            user_agent: concat!("edgar-clean/", env!("CARGO_PKG_VERSION")).to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("allowed_types", &self.allowed_types)
            .field("excluded_patterns", &self.excluded_patterns)
            .field("recollapse_whitespace", &self.recollapse_whitespace)
            .field("include_stats", &self.include_stats)
            .field("concurrency", &self.concurrency)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    /// Replace the allowlist with a preset.
    pub fn forms(mut self, set: FormSet) -> Self {
        self.config.allowed_types = set.forms();
        self
    }

    /// Replace the allowlist with explicit form types.
    pub fn allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Add one form type to the current allowlist.
    pub fn allow_type(mut self, form_type: impl Into<String>) -> Self {
        let form_type = form_type.into();
        if !self.config.allowed_types.contains(&form_type) {
            self.config.allowed_types.push(form_type);
        }
        self
    }

    /// Replace the exclusion rules.
    pub fn excluded_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.excluded_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Add one exclusion rule.
    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.excluded_patterns.push(pattern.into());
        self
    }

    /// Drop every exclusion rule, including the PDF default.
    pub fn no_exclusions(mut self) -> Self {
        self.config.excluded_patterns.clear();
        self
    }

    pub fn recollapse_whitespace(mut self, v: bool) -> Self {
        self.config.recollapse_whitespace = v;
        self
    }

    pub fn include_stats(mut self, v: bool) -> Self {
        self.config.include_stats = v;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, EdgarError> {
        let c = &self.config;
        if c.allowed_types.iter().all(|t| t.trim().is_empty()) {
            return Err(EdgarError::InvalidConfig(
                "At least one allowed form type is required".into(),
            ));
        }
        for pattern in &c.excluded_patterns {
            Regex::new(pattern).map_err(|e| {
                EdgarError::InvalidConfig(format!("Exclusion pattern '{pattern}' is invalid: {e}"))
            })?;
        }
        if c.concurrency == 0 {
            return Err(EdgarError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        if c.user_agent.trim().is_empty() {
            return Err(EdgarError::InvalidConfig(
                "User agent must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Preset allowlists built from the lists in [`crate::forms`].
///
/// | Preset | Forms |
/// |--------|-------|
/// | `TenK` | 10-K, 10-K405, 10-KSB … and amendments, transition reports |
/// | `TenQ` | 10-Q, 10-QSB … and amendments, transition reports |
/// | `TenX` | `TenK` + `TenQ` (default) |
/// | `RegulationA` | 1-A, 1-K, 1-SA, 1-U, 1-Z and amendments |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormSet {
    TenK,
    TenQ,
    #[default]
    TenX,
    RegulationA,
}

impl FormSet {
    /// Expand the preset into form-type codes.
    pub fn forms(self) -> Vec<String> {
        match self {
            FormSet::TenK => forms::annual(),
            FormSet::TenQ => forms::quarterly(),
            FormSet::TenX => forms::ten_x(),
            FormSet::RegulationA => forms::regulation_a(),
        }
    }
}
