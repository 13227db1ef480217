use crate::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const UNK_TOKEN: &str = "<unk>";
pub const PAD_TOKEN: &str = "<pad>";
pub const BOS_TOKEN: &str = "<s>";
pub const EOS_TOKEN: &str = "</s>";

/// Special tokens in their canonical order. The legacy `.txt` loader always
/// prefixes these, whatever the caller configured.
pub const DEFAULT_SPECIALS: [&str; 4] = [UNK_TOKEN, PAD_TOKEN, BOS_TOKEN, EOS_TOKEN];

/// Ordering applied to the discovered (non-special) tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Alphabetic (byte-wise) order.
    #[default]
    Lexical,
    /// Ascending by occurrence count in the feature column.
    Frequency,
    /// Order in which tokens were first seen during the scan.
    None,
}

impl FromStr for SortMode {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "lexical" => Ok(SortMode::Lexical),
            "frequency" => Ok(SortMode::Frequency),
            "none" => Ok(SortMode::None),
            other => Err(VocabError::InvalidConfig(format!(
                "Unknown sort mode '{}'. Expected one of: lexical, frequency, none",
                other
            ))),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Lexical => write!(f, "lexical"),
            SortMode::Frequency => write!(f, "frequency"),
            SortMode::None => write!(f, "none"),
        }
    }
}

/// Which CSV text the frequency sort counts occurrences in.
///
/// `LastFile` reproduces the historical behavior where only the final CSV of
/// the scan was counted. `Corpus` counts over every scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyScope {
    #[default]
    LastFile,
    Corpus,
}

impl FromStr for FrequencyScope {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "last-file" => Ok(FrequencyScope::LastFile),
            "corpus" => Ok(FrequencyScope::Corpus),
            other => Err(VocabError::InvalidConfig(format!(
                "Unknown frequency scope '{}'. Expected one of: last-file, corpus",
                other
            ))),
        }
    }
}

impl fmt::Display for FrequencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyScope::LastFile => write!(f, "last-file"),
            FrequencyScope::Corpus => write!(f, "corpus"),
        }
    }
}

/// Settings for inferring a vocabulary from CSV data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabConfig {
    /// How discovered tokens are ordered after the specials
    pub sort: SortMode,
    /// Tokens always placed first, in this order
    pub specials: Vec<String>,
    /// Counting scope used by `SortMode::Frequency`
    pub frequency_scope: FrequencyScope,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            sort: SortMode::default(),
            specials: DEFAULT_SPECIALS.iter().map(|s| s.to_string()).collect(),
            frequency_scope: FrequencyScope::default(),
        }
    }
}

impl VocabConfig {
    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_specials<I, S>(mut self, specials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specials = specials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_frequency_scope(mut self, scope: FrequencyScope) -> Self {
        self.frequency_scope = scope;
        self
    }

    /// Special tokens must be distinct, otherwise the vocabulary would hold
    /// duplicates.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for special in &self.specials {
            if !seen.insert(special.as_str()) {
                return Err(VocabError::InvalidConfig(format!(
                    "Special token '{}' is listed more than once",
                    special
                )));
            }
        }
        Ok(())
    }
}
