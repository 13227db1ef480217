use crate::Result;
use crate::builder::get_vocab;
use crate::config::{PAD_TOKEN, VocabConfig};
use crate::vocabulary::Vocabulary;
use std::collections::HashMap;
use std::path::Path;

/// Index HuggingFace losses ignore. MusicBERT pads with index 1 instead, so
/// both conventions have to be decodable.
pub const PAD_INDEX: i64 = -100;

/// Token lookups in both directions.
///
/// `index_to_token` keeps the pad token at its vocabulary position and also
/// at [`PAD_INDEX`]. `token_to_index` maps the pad token only to
/// [`PAD_INDEX`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexMapping {
    pub index_to_token: HashMap<i64, String>,
    pub token_to_index: HashMap<String, i64>,
}

impl IndexMapping {
    pub fn from_vocab(vocab: &Vocabulary) -> Self {
        let mut index_to_token: HashMap<i64, String> = vocab
            .iter()
            .enumerate()
            .map(|(i, token)| (i as i64, token.clone()))
            .collect();
        let mut token_to_index: HashMap<String, i64> = vocab
            .iter()
            .enumerate()
            .map(|(i, token)| (token.clone(), i as i64))
            .collect();

        index_to_token.insert(PAD_INDEX, PAD_TOKEN.to_string());
        token_to_index.insert(PAD_TOKEN.to_string(), PAD_INDEX);

        Self {
            index_to_token,
            token_to_index,
        }
    }

    pub fn token(&self, index: i64) -> Option<&str> {
        self.index_to_token.get(&index).map(String::as_str)
    }

    pub fn index(&self, token: &str) -> Option<i64> {
        self.token_to_index.get(token).copied()
    }

    pub fn into_parts(self) -> (HashMap<i64, String>, HashMap<String, i64>) {
        (self.index_to_token, self.token_to_index)
    }
}

/// Build the vocabulary with default settings and return
/// `(index_to_token, token_to_index)`.
pub fn handle_vocab(
    csv_dir: Option<&Path>,
    feature: Option<&str>,
    path: Option<&Path>,
) -> Result<(HashMap<i64, String>, HashMap<String, i64>)> {
    let vocab = get_vocab(csv_dir, feature, path, &VocabConfig::default())?;
    Ok(IndexMapping::from_vocab(&vocab).into_parts())
}
