use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use sonnet_lexicon::normalize_token;

use crate::dataset::Dataset;

/// Summary of a prepared dataset, printed by the `sonnet-prep` binary.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub vocabulary_size: usize,
    pub poems: usize,
    pub lines: usize,
    pub tokens: usize,
    pub encoded_tokens: usize,
    pub dropped_tokens: usize,
    /// Most frequent tokens with no dictionary entry, lowercased.
    pub out_of_vocabulary: Vec<OovWord>,
    /// Number of lines per total syllable count.
    pub syllable_totals: BTreeMap<u32, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OovWord {
    pub word: String,
    pub count: usize,
}

impl DatasetReport {
    pub fn from_dataset(dataset: &Dataset, top_oov: usize) -> Self {
        let vocab = dataset.vocabulary();
        let mut oov: HashMap<String, usize> = HashMap::new();
        let mut syllable_totals = BTreeMap::new();
        let mut tokens = 0usize;
        let mut encoded_tokens = 0usize;

        for row in dataset.rows() {
            tokens += row.tokens.len();
            encoded_tokens += row.encoded.len();
            let total: u32 = row.syllables.iter().map(|&n| u32::from(n)).sum();
            *syllable_totals.entry(total).or_insert(0) += 1;

            for token in row.tokens {
                if normalize_token(token, |form| vocab.contains(form)).is_none() {
                    *oov.entry(token.to_lowercase()).or_insert(0) += 1;
                }
            }
        }

        let mut out_of_vocabulary: Vec<OovWord> = oov
            .into_iter()
            .map(|(word, count)| OovWord { word, count })
            .collect();
        out_of_vocabulary.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        out_of_vocabulary.truncate(top_oov);

        Self {
            vocabulary_size: vocab.len(),
            poems: dataset.poem_count(),
            lines: dataset.len(),
            tokens,
            encoded_tokens,
            dropped_tokens: tokens - encoded_tokens,
            out_of_vocabulary,
            syllable_totals,
        }
    }
}
