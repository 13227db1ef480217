use crate::config::FrequencyScope;
use crate::{Result, VocabError};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Anything that can produce the raw tokens a vocabulary is inferred from.
pub trait TokenSource {
    fn scan(&self) -> Result<TokenScan>;
}

/// Tokens discovered by a scan, with the term counts needed to rank them.
///
/// Tokens are kept in first-seen order. Cell text is not retained: each
/// whitespace-separated term is counted once for the latest document and
/// once for the whole corpus, so memory grows with the number of distinct
/// terms rather than with the number of rows.
#[derive(Debug, Clone, Default)]
pub struct TokenScan {
    tokens: Vec<String>,
    seen: HashSet<String>,
    last_counts: HashMap<String, usize>,
    corpus_counts: HashMap<String, usize>,
    documents: usize,
}

impl TokenScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document (one CSV file) as a list of cell values.
    /// Each cell is split on whitespace.
    pub fn add_document<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.last_counts.clear();
        for cell in cells {
            for token in cell.as_ref().split_whitespace() {
                if self.seen.insert(token.to_string()) {
                    self.tokens.push(token.to_string());
                }
                *self.last_counts.entry(token.to_string()).or_default() += 1;
                *self.corpus_counts.entry(token.to_string()).or_default() += 1;
            }
        }
        self.documents += 1;
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Non-overlapping literal occurrences of `token` in the cells in scope.
    /// `LastFile` only looks at the most recently added document.
    ///
    /// `token` holds no whitespace, so every match lies inside a single
    /// term and the count can be taken over the term counts.
    pub fn count_occurrences(&self, token: &str, scope: FrequencyScope) -> usize {
        if token.is_empty() {
            return 0;
        }
        let counts = match scope {
            FrequencyScope::LastFile => &self.last_counts,
            FrequencyScope::Corpus => &self.corpus_counts,
        };
        counts
            .iter()
            .map(|(term, n)| term.matches(token).count() * n)
            .sum()
    }
}

/// Every `*.csv` file directly inside a folder, read through one column.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
    feature: String,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>, feature: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            feature: feature.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// CSV files in the folder, sorted by path so scans are reproducible.
    pub fn csv_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(VocabError::SourceNotFound(self.dir.clone()));
        }

        // Hidden files (macOS `._*` sidecars, editor temp files) are skipped.
        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };
        let pattern = format!(
            "{}/*.csv",
            glob::Pattern::escape(&self.dir.to_string_lossy())
        );
        let mut files = Vec::new();
        for entry in glob::glob_with(&pattern, options)? {
            files.push(entry?);
        }
        files.sort();
        Ok(files)
    }

    fn read_column(&self, path: &Path) -> Result<Vec<String>> {
        let mut reader = csv::Reader::from_path(path)?;
        let column = reader
            .headers()?
            .iter()
            .position(|h| h == self.feature)
            .ok_or_else(|| VocabError::MissingColumn {
                file: path.to_path_buf(),
                column: self.feature.clone(),
            })?;

        let mut cells = Vec::new();
        for record in reader.records() {
            let record = record?;
            cells.push(record.get(column).unwrap_or_default().to_string());
        }
        Ok(cells)
    }
}

impl TokenSource for CsvDirectorySource {
    fn scan(&self) -> Result<TokenScan> {
        info!("Inferring {} vocab from {}", self.feature, self.dir.display());

        let files = self.csv_files()?;
        let mut scan = TokenScan::new();
        for (i, path) in files.iter().enumerate() {
            let cells = self.read_column(path)?;
            debug!(
                "[{}/{}] {}: {} rows",
                i + 1,
                files.len(),
                path.display(),
                cells.len()
            );
            scan.add_document(cells);
        }

        debug!(
            "Found {} distinct tokens in {} CSV files",
            scan.tokens().len(),
            files.len()
        );
        Ok(scan)
    }
}
