use std::path::Path;
use std::time::Instant;

use sonnet_corpus::{Corpus, CorpusError, SegmentOptions, segment_str, tokenize};
use sonnet_dict::{DictError, LoadMode, SyllableDictionary};
use sonnet_lexicon::{Encoder, SyllableResolver, Vocabulary};
use sonnet_types::{EncodedLine, PoemLine, SyllableCountLine, TokenizedLine, WordId};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dictionary(#[from] DictError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

#[derive(Clone, Copy, Debug)]
pub struct PipelineOptions {
    pub dict_mode: LoadMode,
    pub segment: SegmentOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            dict_mode: LoadMode::Mmap,
            segment: SegmentOptions::default(),
        }
    }
}

/// Vocabulary, encoded lines, line metadata and syllable counts, with the
/// three per-line collections aligned by index.
pub type DatasetParts = (
    Vocabulary,
    Vec<EncodedLine>,
    Vec<PoemLine>,
    Vec<SyllableCountLine>,
);

/// Training-ready view of a corpus. Every per-line vector has one entry per
/// corpus line, in corpus order.
#[derive(Clone, Debug)]
pub struct Dataset {
    vocabulary: Vocabulary,
    poem_count: usize,
    lines: Vec<PoemLine>,
    tokens: Vec<TokenizedLine>,
    syllables: Vec<SyllableCountLine>,
    encoded: Vec<EncodedLine>,
}

/// One line of a [`Dataset`] with everything derived from it.
#[derive(Clone, Copy, Debug)]
pub struct DatasetRow<'a> {
    pub line: &'a PoemLine,
    pub tokens: &'a [String],
    pub syllables: &'a [u8],
    pub encoded: &'a [WordId],
}

impl Dataset {
    /// Tokenize, resolve and encode every line of a segmented corpus.
    pub fn build(dict: &SyllableDictionary, corpus: Corpus) -> Self {
        let poem_count = corpus.poem_count();
        let lines = corpus.into_lines();

        let resolver = SyllableResolver::new(dict);
        let tokens: Vec<TokenizedLine> = lines.iter().map(|l| tokenize(&l.raw_text)).collect();
        let syllables: Vec<SyllableCountLine> =
            tokens.iter().map(|t| resolver.resolve_line(t)).collect();
        info!("parsing done: {} lines tokenized", tokens.len());

        let vocabulary = Vocabulary::from_dictionary(dict);
        let encoder = Encoder::new(&vocabulary);
        let encoded: Vec<EncodedLine> = tokens.iter().map(|t| encoder.encode_line(t)).collect();
        info!("encoding done: {} words in vocabulary", vocabulary.len());

        Self {
            vocabulary,
            poem_count,
            lines,
            tokens,
            syllables,
            encoded,
        }
    }

    /// Run the whole pipeline over dictionary and corpus text in memory.
    pub fn from_text(
        dict_text: &str,
        corpus_text: &str,
        segment: SegmentOptions,
    ) -> Result<Self, PipelineError> {
        let dict = SyllableDictionary::parse(dict_text)?;
        let corpus = segment_str(corpus_text, segment)?;
        Ok(Self::build(&dict, corpus))
    }

    /// Run the whole pipeline over a dictionary file and a corpus file.
    pub fn from_files(
        dict_path: impl AsRef<Path>,
        corpus_path: impl AsRef<Path>,
        options: PipelineOptions,
    ) -> Result<Self, PipelineError> {
        let start = Instant::now();
        let dict = SyllableDictionary::load_with_mode(dict_path, options.dict_mode)?;
        let corpus = Corpus::from_file(corpus_path, options.segment)?;
        info!("loading done in {} ms", start.elapsed().as_millis());
        Ok(Self::build(&dict, corpus))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn poem_count(&self) -> usize {
        self.poem_count
    }

    pub fn lines(&self) -> &[PoemLine] {
        &self.lines
    }

    pub fn tokens(&self) -> &[TokenizedLine] {
        &self.tokens
    }

    pub fn syllables(&self) -> &[SyllableCountLine] {
        &self.syllables
    }

    pub fn encoded(&self) -> &[EncodedLine] {
        &self.encoded
    }

    /// The observation matrix: one encoded row per line.
    pub fn observations(&self) -> &[EncodedLine] {
        &self.encoded
    }

    pub fn rows(&self) -> impl Iterator<Item = DatasetRow<'_>> + '_ {
        self.lines
            .iter()
            .zip(&self.tokens)
            .zip(&self.syllables)
            .zip(&self.encoded)
            .map(|(((line, tokens), syllables), encoded)| DatasetRow {
                line,
                tokens,
                syllables,
                encoded,
            })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_parts(self) -> DatasetParts {
        (self.vocabulary, self.encoded, self.lines, self.syllables)
    }
}
