//! Shared types for syllable dictionaries and segmented sonnet corpora.
//!
//! The dictionary side is a set of [`SyllableRecord`]s, one per word, each
//! holding the mid-line syllable count plus the optional alternate and
//! end-of-line pronunciations. The corpus side is a flat sequence of
//! [`PoemLine`]s keyed by `(poem_id, line_index)`. Derived per-line
//! sequences ([`TokenizedLine`], [`SyllableCountLine`], [`EncodedLine`]) are
//! plain vectors so they stay cheap to hand to a training loop.
//!
//! Use [`parse_count_field`] to interpret one numeric column of a dictionary
//! row and [`SyllableRecord::count_at`] to pick the pronunciation for a
//! position in the line.
//!
//! ```rust
//! use sonnet_types::{CountField, LinePosition, SyllableRecord, parse_count_field};
//!
//! assert_eq!(parse_count_field("E2"), Some(CountField::EndOfLine(2)));
//! let love = SyllableRecord {
//!     word: "love".into(),
//!     syllables: 1,
//!     other_syllables: None,
//!     end_line_syllables: Some(2),
//! };
//! assert_eq!(love.count_at(LinePosition::Final), 2);
//! ```

use std::fmt;

/// Prefix tagging a dictionary count as an end-of-line pronunciation.
pub const END_MARKER: char = 'E';

/// Integer id of a word in the vocabulary (its dictionary row position).
pub type WordId = u32;

/// Word tokens extracted from one line of raw text, in order.
pub type TokenizedLine = Vec<String>;

/// One syllable count per token of a [`TokenizedLine`].
pub type SyllableCountLine = Vec<u8>;

/// Vocabulary ids for the known tokens of a line, in order.
pub type EncodedLine = Vec<WordId>;

/// Where a word sits within its line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LinePosition {
    Interior,
    Final,
}

impl LinePosition {
    /// Position of token `idx` in a line of `len` tokens.
    pub fn of(idx: usize, len: usize) -> Self {
        if idx + 1 == len {
            LinePosition::Final
        } else {
            LinePosition::Interior
        }
    }
}

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LinePosition::Interior => "interior",
            LinePosition::Final => "final",
        })
    }
}

/// One numeric column of a dictionary row.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CountField {
    /// A pronunciation usable anywhere in the line.
    Plain(u8),
    /// A pronunciation only used when the word ends a line (`E<n>`).
    EndOfLine(u8),
}

impl CountField {
    /// The syllable count regardless of marker.
    pub fn value(self) -> u8 {
        match self {
            CountField::Plain(n) | CountField::EndOfLine(n) => n,
        }
    }

    pub fn is_end_of_line(self) -> bool {
        matches!(self, CountField::EndOfLine(_))
    }
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountField::Plain(n) => write!(f, "{n}"),
            CountField::EndOfLine(n) => write!(f, "{END_MARKER}{n}"),
        }
    }
}

/// Parse a count column such as `2` or `E1`.
///
/// Returns `None` for anything that is not a bare decimal number, optionally
/// prefixed by [`END_MARKER`].
pub fn parse_count_field(token: &str) -> Option<CountField> {
    let (digits, end_marked) = match token.strip_prefix(END_MARKER) {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u8 = digits.parse().ok()?;
    Some(if end_marked {
        CountField::EndOfLine(value)
    } else {
        CountField::Plain(value)
    })
}

/// Syllable counts for one dictionary word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyllableRecord {
    /// Lowercase canonical spelling.
    pub word: String,
    /// Count used mid-line.
    pub syllables: u8,
    /// Alternate mid-line pronunciation.
    pub other_syllables: Option<u8>,
    /// Count used when the word ends a line.
    pub end_line_syllables: Option<u8>,
}

impl SyllableRecord {
    /// Count for a word at `position`, preferring the end-of-line
    /// pronunciation on the final token.
    pub fn count_at(&self, position: LinePosition) -> u8 {
        match position {
            LinePosition::Final => self.end_line_syllables.unwrap_or(self.syllables),
            LinePosition::Interior => self.syllables,
        }
    }

    /// Every count the word may take at `position`, primary first, without
    /// duplicates.
    pub fn candidates(&self, position: LinePosition) -> Vec<u8> {
        let mut out = vec![self.syllables];
        let extra = [
            self.other_syllables,
            match position {
                LinePosition::Final => self.end_line_syllables,
                LinePosition::Interior => None,
            },
        ];
        for n in extra.into_iter().flatten() {
            if !out.contains(&n) {
                out.push(n);
            }
        }
        out
    }
}

/// A line of a poem, identified by its poem and its index within it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoemLine {
    /// 1-based ordinal of the poem in the corpus.
    pub poem_id: u32,
    /// 0-based position of the line within its poem.
    pub line_index: u32,
    pub raw_text: String,
}
