use sonnet_dict::SyllableDictionary;
use sonnet_types::{LinePosition, SyllableCountLine};
use tracing::trace;

use crate::{Lookup, lookup};

/// Per-token syllable counts with end-of-line pronunciations.
///
/// The last token of a line takes the word's end-of-line count when the
/// dictionary has one; every other token takes the mid-line count. Unknown
/// words count as `0` so a stray token never sinks a whole line.
#[derive(Clone, Copy, Debug)]
pub struct SyllableResolver<'d> {
    dict: &'d SyllableDictionary,
}

impl<'d> SyllableResolver<'d> {
    pub fn new(dict: &'d SyllableDictionary) -> Self {
        Self { dict }
    }

    pub fn lookup(&self, token: &str) -> Option<Lookup<'d>> {
        lookup(self.dict, token)
    }

    /// Count for one token, or `None` if the word is unknown.
    pub fn resolve_token(&self, token: &str, position: LinePosition) -> Option<u8> {
        self.lookup(token).map(|hit| hit.record.count_at(position))
    }

    /// Counts for a whole line, same length and order as `tokens`.
    pub fn resolve_line<S: AsRef<str>>(&self, tokens: &[S]) -> SyllableCountLine {
        tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                let position = LinePosition::of(idx, tokens.len());
                self.resolve_token(token.as_ref(), position)
                    .unwrap_or_else(|| {
                        trace!("no syllable count for {:?}", token.as_ref());
                        0
                    })
            })
            .collect()
    }

    /// Every count a token may take at `position`; empty if unknown.
    pub fn candidates(&self, token: &str, position: LinePosition) -> Vec<u8> {
        self.lookup(token)
            .map(|hit| hit.record.candidates(position))
            .unwrap_or_default()
    }

    /// Sum of [`resolve_line`](Self::resolve_line).
    pub fn line_total<S: AsRef<str>>(&self, tokens: &[S]) -> u32 {
        self.resolve_line(tokens).iter().map(|&n| u32::from(n)).sum()
    }
}
