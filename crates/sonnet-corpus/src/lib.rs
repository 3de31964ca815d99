//! Segment a flat sonnet corpus into numbered poems and tokenize its lines.
//!
//! A corpus is a stream of printed lines in which a line holding nothing but
//! a numeral opens the next poem:
//!
//! ```text
//!                    1
//!   From fairest creatures we desire increase,
//!   That thereby beauty's rose might never die,
//! ```
//!
//! Markers are numbered by ordinal position, not by their printed digits.
//! See [`segment`] for the exact rules and [`tokenize`] for how line text is
//! split into word tokens.
//!
//! ```rust
//! use sonnet_corpus::{SegmentOptions, segment_str, tokenize};
//!
//! let corpus = segment_str("1\nFirst line\n2\nThird line\n", SegmentOptions::default()).unwrap();
//! assert_eq!(corpus.poem_count(), 2);
//! assert_eq!(tokenize("a summer's day?"), vec!["a", "summer's", "day"]);
//! ```

pub mod segment;
pub mod tokenize;

pub use segment::{
    BlankLines, Corpus, CorpusError, SegmentOptions, is_poem_marker, segment, segment_str,
};
pub use tokenize::{is_word_char, tokenize};
