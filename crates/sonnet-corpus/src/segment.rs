use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use sonnet_types::PoemLine;
use thiserror::Error;
use tracing::{debug, info, warn};

/// What to do with blank or whitespace-only lines inside a poem.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BlankLines {
    /// Keep them as empty lines that take a `line_index`.
    Keep,
    /// Remove them before numbering.
    #[default]
    Drop,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SegmentOptions {
    pub blank_lines: BlankLines,
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corpus contains no poem markers")]
    EmptyCorpus,
}

/// A segmented corpus: every content line tagged with its poem and index.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    lines: Vec<PoemLine>,
    // Offset into `lines` where each poem begins; poem N is at N - 1.
    poem_starts: Vec<usize>,
}

impl Corpus {
    /// Read and segment a corpus file line by line.
    pub fn from_file(path: impl AsRef<Path>, options: SegmentOptions) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let io_err = |source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_err)?);
        let lines = reader.lines().collect::<Result<Vec<_>, _>>().map_err(io_err)?;
        debug!("read {} raw lines from {}", lines.len(), path.display());
        segment(lines, options)
    }

    /// All content lines in source order.
    pub fn lines(&self) -> &[PoemLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<PoemLine> {
        self.lines
    }

    /// Number of poems, including poems with no content lines.
    pub fn poem_count(&self) -> usize {
        self.poem_starts.len()
    }

    /// Lines of the poem with 1-based `poem_id`.
    pub fn poem(&self, poem_id: u32) -> Option<&[PoemLine]> {
        let idx = (poem_id as usize).checked_sub(1)?;
        let start = *self.poem_starts.get(idx)?;
        let end = self
            .poem_starts
            .get(idx + 1)
            .copied()
            .unwrap_or(self.lines.len());
        Some(&self.lines[start..end])
    }

    /// Iterate poems as `(poem_id, lines)` pairs in order.
    pub fn poems(&self) -> impl Iterator<Item = (u32, &[PoemLine])> + '_ {
        (1..=self.poem_starts.len() as u32)
            .filter_map(move |id| self.poem(id).map(|lines| (id, lines)))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Whether a raw line is a poem-boundary marker (only a numeral).
pub fn is_poem_marker(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(char::is_numeric)
}

/// Split a stream of raw lines into poems.
///
/// The Nth marker opens poem N. Content lines are trimmed and numbered from 0
/// within their poem; blank lines follow `options.blank_lines`. Lines before
/// the first marker belong to no poem and are dropped. Fails with
/// [`CorpusError::EmptyCorpus`] when no marker is found.
pub fn segment<I, S>(lines: I, options: SegmentOptions) -> Result<Corpus, CorpusError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut poem_starts = Vec::new();
    let mut next_index = 0u32;
    let mut preamble = 0usize;

    for raw in lines {
        let raw = raw.as_ref();
        if is_poem_marker(raw) {
            poem_starts.push(out.len());
            next_index = 0;
            continue;
        }

        let text = raw.trim();
        if text.is_empty() && options.blank_lines == BlankLines::Drop {
            continue;
        }
        if poem_starts.is_empty() {
            preamble += 1;
            continue;
        }

        out.push(PoemLine {
            poem_id: poem_starts.len() as u32,
            line_index: next_index,
            raw_text: text.to_string(),
        });
        next_index += 1;
    }

    if poem_starts.is_empty() {
        return Err(CorpusError::EmptyCorpus);
    }
    if preamble > 0 {
        warn!("dropped {preamble} line(s) before the first poem marker");
    }
    info!("segmented {} poems, {} lines", poem_starts.len(), out.len());

    Ok(Corpus {
        lines: out,
        poem_starts,
    })
}

/// Segment corpus text already held in memory.
pub fn segment_str(text: &str, options: SegmentOptions) -> Result<Corpus, CorpusError> {
    segment(text.lines(), options)
}
