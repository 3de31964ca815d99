use std::collections::HashMap;

use sonnet_dict::SyllableDictionary;
use sonnet_types::{EncodedLine, WordId};
use tracing::debug;

use crate::normalize_token;

/// Word ↔ id mapping. Ids are dictionary row positions, contiguous from `0`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, WordId>,
}

impl Vocabulary {
    /// Assign every dictionary word its row position, in load order.
    pub fn from_dictionary(dict: &SyllableDictionary) -> Self {
        let mut words = Vec::with_capacity(dict.len());
        let mut ids = HashMap::with_capacity(dict.len());
        for (idx, record) in dict.iter().enumerate() {
            ids.insert(record.word.clone(), idx as WordId);
            words.push(record.word.clone());
        }
        debug!("vocabulary built with {} words", words.len());
        Self { words, ids }
    }

    pub fn id(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    pub fn word(&self, id: WordId) -> Option<&str> {
        self.words.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.ids.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(id, word)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> + '_ {
        self.words
            .iter()
            .enumerate()
            .map(|(idx, word)| (idx as WordId, word.as_str()))
    }

    /// The plain word → id map.
    pub fn as_map(&self) -> &HashMap<String, WordId> {
        &self.ids
    }
}

/// Turns tokenized lines into vocabulary ids.
///
/// Unknown and blank tokens are dropped rather than replaced, so an encoded
/// line can be shorter than its token list.
#[derive(Clone, Copy, Debug)]
pub struct Encoder<'v> {
    vocab: &'v Vocabulary,
}

impl<'v> Encoder<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn encode_token(&self, token: &str) -> Option<WordId> {
        let normalized = normalize_token(token, |form| self.vocab.contains(form))?;
        self.vocab.id(&normalized.form)
    }

    pub fn encode_line<S: AsRef<str>>(&self, tokens: &[S]) -> EncodedLine {
        tokens
            .iter()
            .filter_map(|token| self.encode_token(token.as_ref()))
            .collect()
    }

    /// Map ids back to words, skipping ids outside the vocabulary.
    pub fn decode_line(&self, ids: &[WordId]) -> Vec<&'v str> {
        ids.iter().filter_map(|&id| self.vocab.word(id)).collect()
    }
}
