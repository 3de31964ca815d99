//! Load syllable dictionaries into an ordered, read-only record set.
//!
//! The source format is one word per row followed by one or two counts:
//!
//! ```text
//! love 1 E2
//! heaven 2 1
//! even E1 2
//! ```
//!
//! A plain second count is an alternate mid-line pronunciation; an
//! `E`-prefixed count applies only when the word ends a line. Some rows carry
//! the end-marked count in the first column instead, so every row goes
//! through [`parse_row`], which returns a corrected [`SyllableRecord`] with
//! end-marked values always in `end_line_syllables`.
//!
//! Record order is the row order of the source and is the basis for
//! vocabulary ids, so the dictionary keeps records in a `Vec` and only uses
//! the hash map as a position index.
//!
//! # Example
//! ```no_run
//! use sonnet_dict::{LoadMode, SyllableDictionary};
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = SyllableDictionary::load_with_mode("Syllable_dictionary.txt", LoadMode::Mmap)?;
//! let love = dict.get("love").expect("love in dictionary");
//! println!("love: {} (end of line {:?})", love.syllables, love.end_line_syllables);
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p sonnet-dict --example stats -- <dictionary>`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::{FromStr, Utf8Error};

use memmap2::Mmap;
use sonnet_types::{CountField, SyllableRecord, WordId, parse_count_field};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Strategy for loading the dictionary file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, no copy of the raw text).
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Why a single dictionary row was rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RowDefect {
    #[error("no syllable counts")]
    NoCounts,
    #[error("unparseable count {0:?}")]
    InvalidCount(String),
    #[error("only an end-of-line count, no mid-line count")]
    NoMidLineCount,
    #[error("both counts carry the end-of-line marker")]
    BothEndMarked,
    #[error("expected at most 2 counts, got {0}")]
    TooManyCounts(usize),
}

#[derive(Debug, Error)]
pub enum DictError {
    #[error("failed to read dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: dictionary is not valid utf-8")]
    Utf8 {
        line: usize,
        #[source]
        source: Utf8Error,
    },
    #[error("line {line}: malformed dictionary row {row:?}: {defect}")]
    MalformedRow {
        line: usize,
        row: String,
        defect: RowDefect,
    },
    #[error("line {line}: duplicate word {word:?} (first defined on line {first_line})")]
    DuplicateWord {
        line: usize,
        word: String,
        first_line: usize,
    },
}

/// Ordered set of syllable records, immutable once loaded.
#[derive(Clone, Debug, Default)]
pub struct SyllableDictionary {
    records: Vec<SyllableRecord>,
    positions: HashMap<String, usize>,
}

impl SyllableDictionary {
    /// Load a dictionary file, memory-mapping it.
    ///
    /// Use [`load_with_mode`](Self::load_with_mode) to read into an owned
    /// buffer instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictError> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a dictionary file choosing between mmap and owned buffers.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self, DictError> {
        let path = path.as_ref();
        let buffer = load_file(path, mode)?;
        let dict = Self::parse_bytes(buffer.as_slice())?;
        debug!("parsed {} via {:?}", path.display(), mode);
        Ok(dict)
    }

    /// Parse dictionary text already held in memory.
    pub fn parse(text: &str) -> Result<Self, DictError> {
        Self::parse_bytes(text.as_bytes())
    }

    fn parse_bytes(bytes: &[u8]) -> Result<Self, DictError> {
        let mut records = Vec::new();
        let mut positions = HashMap::new();
        let mut source_lines = Vec::new();

        for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
            let line = lineno + 1;
            let row = std::str::from_utf8(strip_cr(raw_line))
                .map_err(|source| DictError::Utf8 { line, source })?;
            let record = match parse_row(row) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(defect) => {
                    return Err(DictError::MalformedRow {
                        line,
                        row: row.to_string(),
                        defect,
                    });
                }
            };

            match positions.entry(record.word.clone()) {
                Entry::Occupied(slot) => {
                    return Err(DictError::DuplicateWord {
                        line,
                        word: record.word,
                        first_line: source_lines[*slot.get()],
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(records.len());
                }
            }
            records.push(record);
            source_lines.push(line);
        }

        let dict = Self { records, positions };
        if dict.is_empty() {
            warn!("syllable dictionary has no rows");
        } else {
            info!(
                "loaded {} syllable records ({} end-of-line, {} alternate)",
                dict.len(),
                dict.end_marked_count(),
                dict.alternate_count()
            );
        }
        Ok(dict)
    }

    /// Record for an already-normalized word.
    pub fn get(&self, word: &str) -> Option<&SyllableRecord> {
        self.positions.get(word).map(|&idx| &self.records[idx])
    }

    /// Row position of a word, which doubles as its vocabulary id.
    pub fn position(&self, word: &str) -> Option<WordId> {
        self.positions.get(word).map(|&idx| idx as WordId)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    /// Record at row position `id`.
    pub fn record(&self, id: WordId) -> Option<&SyllableRecord> {
        self.records.get(id as usize)
    }

    /// All records in load order.
    pub fn records(&self) -> &[SyllableRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyllableRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of words with an end-of-line pronunciation.
    pub fn end_marked_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.end_line_syllables.is_some())
            .count()
    }

    /// Number of words with an alternate mid-line pronunciation.
    pub fn alternate_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.other_syllables.is_some())
            .count()
    }
}

impl FromStr for SyllableDictionary {
    type Err = DictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse one dictionary row into a corrected record.
///
/// Blank rows yield `Ok(None)`. An end-marked count in the first column is
/// moved to `end_line_syllables` and the plain count becomes `syllables`.
pub fn parse_row(row: &str) -> Result<Option<SyllableRecord>, RowDefect> {
    let mut tokens = row.split_ascii_whitespace();
    let Some(word) = tokens.next() else {
        return Ok(None);
    };
    let fields = tokens
        .map(|t| parse_count_field(t).ok_or_else(|| RowDefect::InvalidCount(t.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let (syllables, other_syllables, end_line_syllables) = match fields.as_slice() {
        [] => return Err(RowDefect::NoCounts),
        [CountField::Plain(n)] => (*n, None, None),
        [CountField::EndOfLine(_)] => return Err(RowDefect::NoMidLineCount),
        [CountField::Plain(n), CountField::Plain(alt)] => (*n, Some(*alt), None),
        [CountField::Plain(n), CountField::EndOfLine(end)]
        | [CountField::EndOfLine(end), CountField::Plain(n)] => (*n, None, Some(*end)),
        [CountField::EndOfLine(_), CountField::EndOfLine(_)] => {
            return Err(RowDefect::BothEndMarked);
        }
        _ => return Err(RowDefect::TooManyCounts(fields.len())),
    };

    Ok(Some(SyllableRecord {
        word: word.to_lowercase(),
        syllables,
        other_syllables,
        end_line_syllables,
    }))
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer, DictError> {
    let io_err = |source| DictError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .map_err(io_err),
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(io_err)?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
