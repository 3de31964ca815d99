//! Dictionary lookups for sonnet tokens: normalization, syllables, ids.
//!
//! Every token goes through the same normalization before it touches the
//! dictionary or the vocabulary, so syllable counts and encodings always agree
//! on which word a token means.
//!
//! # How it works
//! 1. Lowercase the token and use it if it is known.
//! 2. Otherwise strip one leading and one trailing apostrophe and retry.
//! 3. Otherwise remove the remaining apostrophes (`summer's` → `summers`).
//! 4. Forms made only of apostrophes or whitespace never match.
//!
//! The outcome is an explicit `Option` with provenance ([`LookupSource`]).
//! [`SyllableResolver`] collapses a miss to a count of `0`, while [`Encoder`]
//! drops the token.
//!
//! # Example
//! ```no_run
//! use sonnet_dict::SyllableDictionary;
//! use sonnet_lexicon::{Encoder, SyllableResolver, Vocabulary};
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = SyllableDictionary::load("Syllable_dictionary.txt")?;
//! let tokens = ["Shall", "I", "compare", "thee", "to", "a", "summer's", "day"];
//!
//! let counts = SyllableResolver::new(&dict).resolve_line(&tokens);
//! let vocab = Vocabulary::from_dictionary(&dict);
//! let ids = Encoder::new(&vocab).encode_line(&tokens);
//! println!("{counts:?} {ids:?}");
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p sonnet-lexicon --example scan -- <dictionary> "<line>"`.

pub mod encoder;
pub mod resolver;

use sonnet_dict::SyllableDictionary;
use sonnet_types::{SyllableRecord, WordId};

pub use encoder::{Encoder, Vocabulary};
pub use resolver::SyllableResolver;

/// Which normalization step produced a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LookupSource {
    /// The lowercased token itself.
    Exact,
    /// One leading and/or trailing apostrophe removed.
    ApostropheStripped,
    /// Every apostrophe removed.
    ApostropheRemoved,
}

/// A token resolved to a known word form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NormalizedToken {
    pub form: String,
    pub source: LookupSource,
}

/// A token resolved against a dictionary.
#[derive(Clone, Debug)]
pub struct Lookup<'d> {
    pub form: String,
    pub source: LookupSource,
    pub id: WordId,
    pub record: &'d SyllableRecord,
}

/// Normalize a token against a caller-provided existence check.
///
/// `is_known` typically delegates to `SyllableDictionary::contains` or
/// `Vocabulary::contains`, which keeps the resolver and the encoder on the
/// same rules.
pub fn normalize_token<F>(token: &str, is_known: F) -> Option<NormalizedToken>
where
    F: Fn(&str) -> bool,
{
    let lower = token.to_lowercase();
    let accept = |form: &str| !is_blank_form(form) && is_known(form);

    if accept(&lower) {
        return Some(NormalizedToken {
            form: lower,
            source: LookupSource::Exact,
        });
    }

    let stripped = strip_apostrophes(&lower);
    if stripped != lower && accept(stripped) {
        return Some(NormalizedToken {
            form: stripped.to_string(),
            source: LookupSource::ApostropheStripped,
        });
    }

    if stripped.contains('\'') {
        let removed = stripped.replace('\'', "");
        if accept(&removed) {
            return Some(NormalizedToken {
                form: removed,
                source: LookupSource::ApostropheRemoved,
            });
        }
    }

    None
}

/// Look a raw token up in the dictionary.
pub fn lookup<'d>(dict: &'d SyllableDictionary, token: &str) -> Option<Lookup<'d>> {
    let normalized = normalize_token(token, |form| dict.contains(form))?;
    let id = dict.position(&normalized.form)?;
    let record = dict.record(id)?;
    Some(Lookup {
        form: normalized.form,
        source: normalized.source,
        id,
        record,
    })
}

/// Remove at most one apostrophe from each end of a word.
pub fn strip_apostrophes(word: &str) -> &str {
    let word = word.strip_prefix('\'').unwrap_or(word);
    word.strip_suffix('\'').unwrap_or(word)
}

/// Forms that carry no word at all: empty, or only apostrophes and whitespace.
pub fn is_blank_form(form: &str) -> bool {
    form.chars().all(|c| c == '\'' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn known(words: &[&str]) -> impl Fn(&str) -> bool {
        let set: HashSet<String> = words.iter().map(|w| w.to_string()).collect();
        move |form| set.contains(form)
    }

    #[test]
    fn exact_match_wins_over_fallback() {
        let norm = normalize_token("'Tis", known(&["'tis", "tis"])).unwrap();
        assert_eq!(norm.form, "'tis");
        assert_eq!(norm.source, LookupSource::Exact);
    }

    #[test]
    fn strips_edge_apostrophes() {
        let norm = normalize_token("'Gainst'", known(&["gainst"])).unwrap();
        assert_eq!(norm.form, "gainst");
        assert_eq!(norm.source, LookupSource::ApostropheStripped);
    }

    #[test]
    fn strips_only_one_apostrophe_per_end() {
        let norm = normalize_token("''love''", known(&["'love'", "love"])).unwrap();
        assert_eq!(norm.form, "'love'");
        assert_eq!(norm.source, LookupSource::ApostropheStripped);

        let norm = normalize_token("''love''", known(&["love"])).unwrap();
        assert_eq!(norm.source, LookupSource::ApostropheRemoved);
    }

    #[test]
    fn removes_inner_apostrophe_last() {
        let norm = normalize_token("summer's", known(&["summers"])).unwrap();
        assert_eq!(norm.form, "summers");
        assert_eq!(norm.source, LookupSource::ApostropheRemoved);

        let norm = normalize_token("summer's", known(&["summers", "summer's"])).unwrap();
        assert_eq!(norm.source, LookupSource::Exact);
    }

    #[test]
    fn blank_forms_never_match() {
        let anything = |_: &str| true;
        assert!(normalize_token("", anything).is_none());
        assert!(normalize_token("'", anything).is_none());
        assert!(normalize_token("''", anything).is_none());
        assert!(normalize_token(" ", anything).is_none());
    }

    #[test]
    fn apostrophe_only_tokens_are_blank() {
        assert!(is_blank_form("''"));
        assert!(is_blank_form("' '"));
        assert!(is_blank_form("'''"));
        assert!(!is_blank_form("'t"));
        assert!(normalize_token("'''", |_: &str| true).is_none());
    }

    #[test]
    fn unknown_tokens_miss() {
        assert!(normalize_token("Rosalind", known(&["rose"])).is_none());
    }

    #[test]
    fn lookup_returns_row_position() {
        let dict = SyllableDictionary::parse("thee 1\nsummers 2\nday 1 E2\n").unwrap();
        let hit = lookup(&dict, "Summer's").unwrap();
        assert_eq!(hit.id, 1);
        assert_eq!(hit.record.syllables, 2);
        assert_eq!(hit.source, LookupSource::ApostropheRemoved);
        assert!(lookup(&dict, "winter's").is_none());
    }
}
