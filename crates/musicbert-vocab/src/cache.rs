use crate::Result;
use crate::config::DEFAULT_SPECIALS;
use crate::vocabulary::Vocabulary;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Lines of a legacy dictionary starting with this are padding entries.
pub const LEGACY_FILLER_PREFIX: &str = "madeupword";

/// On-disk vocabulary encoding, chosen by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabFormat {
    /// `.json`: a JSON array of strings.
    Json,
    /// `.txt`: fairseq-style dictionary, `<token> <count>` per line.
    ///
    /// Loading always yields the four canonical specials first, whatever
    /// specials the caller configured. Writing produces plain lines.
    Legacy,
    /// Anything else: one token per line.
    Plain,
}

impl VocabFormat {
    /// A bare `.json` or `.txt` name counts too, even though
    /// `Path::extension` sees no extension there.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        if name.ends_with(".json") {
            VocabFormat::Json
        } else if name.ends_with(".txt") {
            VocabFormat::Legacy
        } else {
            VocabFormat::Plain
        }
    }
}

/// A vocabulary file used as a read-through cache for inferred vocabularies.
#[derive(Debug, Clone)]
pub struct VocabCache {
    path: PathBuf,
    format: VocabFormat,
}

impl VocabCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = VocabFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> VocabFormat {
        self.format
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Vocabulary> {
        let data = fs::read_to_string(&self.path)?;
        match self.format {
            VocabFormat::Json => {
                info!("Loading JSON vocab from {}", self.path.display());
                let tokens: Vec<String> = serde_json::from_str(&data)?;
                Ok(Vocabulary::from(tokens))
            }
            VocabFormat::Legacy => {
                info!("Loading fairseq formatted vocab from {}", self.path.display());
                Ok(parse_legacy(&data))
            }
            VocabFormat::Plain => {
                info!("Loading plaintext vocab from {}", self.path.display());
                Ok(data.lines().map(str::trim).collect())
            }
        }
    }

    /// Write the vocabulary, creating parent directories as needed.
    pub fn store(&self, vocab: &Vocabulary) -> Result<()> {
        info!("Saving vocabulary to {}", self.path.display());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = match self.format {
            VocabFormat::Json => serde_json::to_string(vocab)?,
            VocabFormat::Legacy | VocabFormat::Plain => {
                let mut out = String::new();
                for token in vocab {
                    out.push_str(token);
                    out.push('\n');
                }
                out
            }
        };
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Load the cached vocabulary if present, otherwise build and store it.
    /// Nothing is written when `build` fails.
    pub fn load_or_build<F>(&self, build: F) -> Result<Vocabulary>
    where
        F: FnOnce() -> Result<Vocabulary>,
    {
        if self.exists() {
            return self.load();
        }
        let vocab = build()?;
        self.store(&vocab)?;
        Ok(vocab)
    }
}

fn parse_legacy(data: &str) -> Vocabulary {
    let file_tokens = data
        .lines()
        .filter(|line| !line.starts_with(LEGACY_FILLER_PREFIX))
        .filter_map(|line| line.split_whitespace().next());

    let mut tokens: Vec<String> = DEFAULT_SPECIALS.iter().map(|s| s.to_string()).collect();
    tokens.extend(
        file_tokens
            .filter(|token| !DEFAULT_SPECIALS.contains(token))
            .map(str::to_string),
    );
    Vocabulary::from(tokens)
}
