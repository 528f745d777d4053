//! Extraction options.
//!
//! The only tunable is the exclusion set: decoded text that exactly matches
//! one of its entries is dropped from the output. By default it holds the
//! prompts PowerPoint writes into master slides and empty placeholders.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Master body prompt as stored in the file, paragraphs separated by CR.
const MASTER_TEXT_PROMPT_CR: &str =
    "Click to edit Master text styles\rSecond level\rThird level\rFourth level\rFifth level";

/// Same prompt after CR -> LF paragraph normalization.
const MASTER_TEXT_PROMPT_LF: &str =
    "Click to edit Master text styles\nSecond level\nThird level\nFourth level\nFifth level";

/// Placeholder strings suppressed unless the caller supplies its own set.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "*",
    " ",
    MASTER_TEXT_PROMPT_CR,
    MASTER_TEXT_PROMPT_LF,
    "Click to edit Master title style",
];

/// Exact-match set of text fragments to leave out of the extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    entries: HashSet<String>,
}

impl ExclusionSet {
    /// A set that excludes nothing, keeping placeholder text as well.
    pub fn empty() -> Self {
        Self {
            entries: HashSet::new(),
        }
    }

    /// Build a set from caller-supplied strings.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `text` is excluded. Comparison is exact, not a substring match.
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains(text)
    }

    /// Number of excluded strings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set excludes nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

/// Options controlling a text extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Strings to exclude. `None` selects the built-in placeholder set,
    /// an empty list keeps all text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<String>>,
}

impl ExtractOptions {
    /// Options using the built-in exclusion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the exclusion set with the given strings.
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = Some(exclusions.into_iter().map(Into::into).collect());
        self
    }

    /// Keep every decoded string, including master-slide placeholders.
    pub fn keep_all(self) -> Self {
        self.with_exclusions(Vec::<String>::new())
    }

    /// Load options from a JSON document such as `{"exclusions": ["*"]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidOptions(e.to_string()))
    }

    /// Resolve the effective exclusion set.
    pub fn exclusion_set(&self) -> ExclusionSet {
        match &self.exclusions {
            Some(list) => ExclusionSet::new(list.iter().cloned()),
            None => ExclusionSet::default(),
        }
    }
}
