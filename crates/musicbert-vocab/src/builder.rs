use crate::cache::VocabCache;
use crate::config::{FrequencyScope, SortMode, VocabConfig};
use crate::source::{CsvDirectorySource, TokenScan, TokenSource};
use crate::vocabulary::Vocabulary;
use crate::{Result, VocabError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Loads a vocabulary from its cache file, or infers one from a token source
/// and writes it to the cache.
#[derive(Debug, Clone, Default)]
pub struct VocabBuilder {
    config: VocabConfig,
    cache: Option<VocabCache>,
}

impl VocabBuilder {
    pub fn new(config: VocabConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache = Some(VocabCache::new(path));
        self
    }

    pub fn config(&self) -> &VocabConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&VocabCache> {
        self.cache.as_ref()
    }

    /// Returns the cached vocabulary when the cache file exists. Otherwise
    /// `source` is required: it is scanned, the result ordered and, if a
    /// cache path was set, persisted.
    pub fn build(&self, source: Option<&dyn TokenSource>) -> Result<Vocabulary> {
        let infer = || -> Result<Vocabulary> {
            let source = source.ok_or(VocabError::MissingSource)?;
            self.infer(source)
        };

        match &self.cache {
            Some(cache) => cache.load_or_build(infer),
            None => infer(),
        }
    }

    /// Scan `source` and order its tokens, ignoring any cache.
    pub fn infer(&self, source: &dyn TokenSource) -> Result<Vocabulary> {
        self.config.validate()?;
        let scan = source.scan()?;
        Ok(order_tokens(&scan, &self.config))
    }
}

/// Drop the specials from the scanned tokens, sort the rest and put the
/// specials back in front.
pub fn order_tokens(scan: &TokenScan, config: &VocabConfig) -> Vocabulary {
    let specials: HashSet<&str> = config.specials.iter().map(String::as_str).collect();
    let mut rest: Vec<String> = scan
        .tokens()
        .iter()
        .filter(|token| !specials.contains(token.as_str()))
        .cloned()
        .collect();

    match config.sort {
        SortMode::Lexical => rest.sort(),
        SortMode::Frequency => {
            let scope = config.frequency_scope;
            if scope == FrequencyScope::LastFile && scan.document_count() > 1 {
                warn!(
                    "Frequency sort counts only the last of {} scanned files; \
                     use the corpus scope to count all of them",
                    scan.document_count()
                );
            }
            // Lexical first so equal counts keep a stable order.
            rest.sort();
            rest.sort_by_cached_key(|token| scan.count_occurrences(token, scope));
        }
        SortMode::None => {}
    }

    Vocabulary::assemble(&config.specials, rest)
}

/// Load the vocabulary at `path`, or infer it from the `feature` column of
/// the CSV files in `csv_dir` and save it to `path`.
///
/// When `path` is `None` the inferred vocabulary is not saved. Inference
/// needs both `csv_dir` and `feature`.
pub fn get_vocab(
    csv_dir: Option<&Path>,
    feature: Option<&str>,
    path: Option<&Path>,
    config: &VocabConfig,
) -> Result<Vocabulary> {
    let source = match (csv_dir, feature) {
        (Some(dir), Some(feature)) => Some(CsvDirectorySource::new(dir, feature)),
        _ => None,
    };

    let mut builder = VocabBuilder::new(config.clone());
    if let Some(path) = path {
        builder = builder.with_cache_path(path);
    }
    builder.build(source.as_ref().map(|s| s as &dyn TokenSource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedSource {
        documents: Vec<Vec<&'static str>>,
        calls: Cell<usize>,
    }

    impl FixedSource {
        fn new(documents: Vec<Vec<&'static str>>) -> Self {
            Self {
                documents,
                calls: Cell::new(0),
            }
        }
    }

    impl TokenSource for FixedSource {
        fn scan(&self) -> Result<TokenScan> {
            self.calls.set(self.calls.get() + 1);
            let mut scan = TokenScan::new();
            for doc in &self.documents {
                scan.add_document(doc.iter().copied());
            }
            Ok(scan)
        }
    }

    fn two_specials() -> VocabConfig {
        VocabConfig::default().with_specials(["<unk>", "<pad>"])
    }

    #[test]
    fn test_lexical_sort() {
        let source = FixedSource::new(vec![vec!["a b", "b c"], vec!["a"]]);
        let vocab = VocabBuilder::new(two_specials()).build(Some(&source)).unwrap();
        assert_eq!(vocab.tokens(), &["<unk>", "<pad>", "a", "b", "c"]);
    }

    #[test]
    fn test_specials_in_data_are_not_duplicated() {
        let source = FixedSource::new(vec![vec!["z <pad> a <unk>"]]);
        let vocab = VocabBuilder::new(two_specials()).build(Some(&source)).unwrap();
        assert_eq!(vocab.tokens(), &["<unk>", "<pad>", "a", "z"]);
    }

    #[test]
    fn test_none_sort_keeps_scan_order() {
        let source = FixedSource::new(vec![vec!["q b", "a"], vec!["b c"]]);
        let config = two_specials().with_sort(SortMode::None);
        let vocab = VocabBuilder::new(config).build(Some(&source)).unwrap();

        let rest: HashSet<&str> = vocab.tokens()[2..].iter().map(String::as_str).collect();
        assert_eq!(rest, HashSet::from(["q", "b", "a", "c"]));
        assert_eq!(&vocab.tokens()[..2], &["<unk>", "<pad>"]);
    }

    #[test]
    fn test_frequency_sort_last_file() {
        // Only the second document is counted: y=2, x=1, z=0.
        let source = FixedSource::new(vec![vec!["z z z z"], vec!["y x y"]]);
        let config = two_specials().with_sort(SortMode::Frequency);
        let vocab = VocabBuilder::new(config).build(Some(&source)).unwrap();
        assert_eq!(vocab.tokens(), &["<unk>", "<pad>", "z", "x", "y"]);
    }

    #[test]
    fn test_frequency_sort_corpus() {
        let source = FixedSource::new(vec![vec!["z z z z"], vec!["y x y"]]);
        let config = two_specials()
            .with_sort(SortMode::Frequency)
            .with_frequency_scope(FrequencyScope::Corpus);
        let vocab = VocabBuilder::new(config).build(Some(&source)).unwrap();
        assert_eq!(vocab.tokens(), &["<unk>", "<pad>", "x", "y", "z"]);
    }

    #[test]
    fn test_frequency_ties_are_lexical() {
        let source = FixedSource::new(vec![vec!["d c b a"]]);
        let config = two_specials().with_sort(SortMode::Frequency);
        let vocab = VocabBuilder::new(config).build(Some(&source)).unwrap();
        assert_eq!(vocab.tokens(), &["<unk>", "<pad>", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_missing_source_is_precondition_error() {
        let builder = VocabBuilder::new(VocabConfig::default());
        assert!(matches!(builder.build(None), Err(VocabError::MissingSource)));
    }

    #[test]
    fn test_duplicate_specials_fail_before_scanning() {
        let source = FixedSource::new(vec![vec!["a"]]);
        let config = VocabConfig::default().with_specials(["<s>", "<s>"]);
        let result = VocabBuilder::new(config).build(Some(&source));

        assert!(matches!(result, Err(VocabError::InvalidConfig(_))));
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_cache_skips_second_scan() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("vocab/events.json");
        let source = FixedSource::new(vec![vec!["b a"]]);
        let builder = VocabBuilder::new(two_specials()).with_cache_path(&path);

        let first = builder.build(Some(&source)).unwrap();
        assert_eq!(source.calls.get(), 1);
        assert!(path.exists());

        let second = builder.build(Some(&source)).unwrap();
        assert_eq!(source.calls.get(), 1);
        assert_eq!(first, second);
    }
}
