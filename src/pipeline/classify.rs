//! Classification: decide which document spans survive.
//!
//! A span is kept when it declares an allowed form type **and** matches no
//! exclusion rule. The two tests are independent; exclusion is not a
//! priority override so much as the second half of an AND.
//!
//! Both lists come from [`crate::config::ExtractionConfig`] and are compiled
//! once in [`DocumentFilter::new`]. Filtering itself never fails: a
//! submission with nothing worth keeping is a valid, empty result.

use crate::error::EdgarError;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Compiled inclusion/exclusion policy.
#[derive(Debug, Clone)]
pub struct DocumentFilter {
    /// One alternation of every `<TYPE>t</TYPE>`; `None` keeps nothing.
    allowed: Option<Regex>,
    excluded: Vec<Regex>,
}

impl DocumentFilter {
    /// Compile the allowlist and exclusion rules.
    ///
    /// Allowed types are matched as literals, so `EX-99.1` means exactly that.
    /// Exclusion patterns are regular expressions used as written.
    pub fn new<S: AsRef<str>, P: AsRef<str>>(
        allowed_types: &[S],
        excluded_patterns: &[P],
    ) -> Result<Self, EdgarError> {
        let alternatives: Vec<String> = allowed_types
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        let allowed = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!("<TYPE>(?:{})</TYPE>", alternatives.join("|"));
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| EdgarError::InvalidConfig(format!("Allowlist does not compile: {e}")))?;
            Some(re)
        };

        let excluded = excluded_patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| {
                    EdgarError::InvalidConfig(format!(
                        "Exclusion pattern '{}' is invalid: {e}",
                        p.as_ref()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { allowed, excluded })
    }

    /// The span declares at least one allowed form type.
    pub fn is_allowed(&self, doc: &str) -> bool {
        self.allowed.as_ref().is_some_and(|re| re.is_match(doc))
    }

    /// The span matches at least one exclusion rule.
    pub fn is_excluded(&self, doc: &str) -> bool {
        self.excluded.iter().any(|re| re.is_match(doc))
    }

    /// Final decision for one span.
    pub fn keeps(&self, doc: &str) -> bool {
        self.is_allowed(doc) && !self.is_excluded(doc)
    }

    /// The kept spans, in their original order.
    pub fn filter<'a>(&self, docs: &[&'a str]) -> Vec<&'a str> {
        let kept: Vec<&'a str> = docs.iter().copied().filter(|d| self.keeps(d)).collect();
        debug!("Kept {}/{} documents", kept.len(), docs.len());
        kept
    }
}
