use serde::{Deserialize, Serialize};

/// Ordered list of tokens. Position in the list is the token's index.
///
/// Vocabularies inferred from CSV data start with the configured special
/// tokens and contain no duplicates. Vocabularies loaded from disk are
/// returned as stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Specials first, in order, then the remaining tokens as given.
    pub fn assemble(specials: &[String], rest: Vec<String>) -> Self {
        let mut tokens = Vec::with_capacity(specials.len() + rest.len());
        tokens.extend(specials.iter().cloned());
        tokens.extend(rest);
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.position(token).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_puts_specials_first() {
        let specials = vec!["<unk>".to_string(), "<pad>".to_string()];
        let vocab = Vocabulary::assemble(&specials, vec!["a".to_string(), "b".to_string()]);

        assert_eq!(vocab.tokens(), &["<unk>", "<pad>", "a", "b"]);
        assert_eq!(vocab.position("<pad>"), Some(1));
        assert_eq!(vocab.get(3), Some("b"));
        assert_eq!(vocab.get(4), None);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let vocab: Vocabulary = ["<unk>", "x"].into_iter().collect();
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["<unk>","x"]"#);

        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
    }
}
