use std::path::PathBuf;

use sonnet_corpus::{BlankLines, Corpus, CorpusError, SegmentOptions, tokenize};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sonnets.txt")
}

#[test]
fn segments_fixture_into_ordinal_poems() {
    let corpus = Corpus::from_file(fixture(), SegmentOptions::default()).expect("segment fixture");
    assert_eq!(corpus.poem_count(), 3);
    assert_eq!(corpus.poem(1).unwrap().len(), 14);
    assert_eq!(corpus.poem(2).unwrap().len(), 14);
    assert_eq!(corpus.poem(3).unwrap().len(), 2);
    assert_eq!(corpus.len(), 30);

    let couplet = &corpus.poem(1).unwrap()[12];
    assert_eq!(couplet.raw_text, "Pity the world, or else this glutton be,");
    assert_eq!(couplet.line_index, 12);
}

#[test]
fn line_indices_are_contiguous_per_poem() {
    for blank_lines in [BlankLines::Drop, BlankLines::Keep] {
        let corpus =
            Corpus::from_file(fixture(), SegmentOptions { blank_lines }).expect("segment fixture");
        for (poem_id, lines) in corpus.poems() {
            for (expected, line) in lines.iter().enumerate() {
                assert_eq!(line.poem_id, poem_id);
                assert_eq!(line.line_index as usize, expected);
            }
        }
    }
}

#[test]
fn keeping_blank_lines_counts_stanza_gaps() {
    let corpus = Corpus::from_file(
        fixture(),
        SegmentOptions {
            blank_lines: BlankLines::Keep,
        },
    )
    .expect("segment fixture");
    // Sonnet 1 is followed by two blank lines, sonnet 18 by one.
    assert_eq!(corpus.poem(1).unwrap().len(), 16);
    assert_eq!(corpus.poem(2).unwrap().len(), 15);
}

#[test]
fn first_line_of_sonnet_18_tokenizes() {
    let corpus = Corpus::from_file(fixture(), SegmentOptions::default()).expect("segment fixture");
    let line = &corpus.poem(2).unwrap()[0];
    let tokens = tokenize(&line.raw_text);
    assert_eq!(tokens.len(), 8);
    assert_eq!(tokens[6], "summer's");
    assert_eq!(tokens[7], "day");
}

#[test]
fn file_without_markers_is_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prose.txt");
    std::fs::write(&path, "no numbers here\nnone at all\n").unwrap();
    let err = Corpus::from_file(&path, SegmentOptions::default()).unwrap_err();
    assert!(matches!(err, CorpusError::EmptyCorpus));
}

#[test]
fn missing_file_is_io_error() {
    let err = Corpus::from_file("no/such/corpus.txt", SegmentOptions::default()).unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }));
}
