use sonnet_corpus::{SegmentOptions, segment_str, tokenize};
use sonnet_dict::SyllableDictionary;
use sonnet_lexicon::{Encoder, LookupSource, SyllableResolver, Vocabulary};

const DICT: &str = "\
a 1
compare 2
day 1 E2
i 1
love 1 E2
shall 1
summers 2
thee 1
to 1
lovely 2
art 1
more 1
thou 1
and 1
temperate 3
";

const CORPUS: &str = "\
                   18
Shall I compare thee to a summer's day?
Thou art more lovely and more temperate:
";

#[test]
fn sonnet_18_opening_line() {
    let dict = SyllableDictionary::parse(DICT).unwrap();
    let resolver = SyllableResolver::new(&dict);
    let tokens = tokenize("Shall I compare thee to a summer's day?");
    assert_eq!(
        tokens,
        vec!["Shall", "I", "compare", "thee", "to", "a", "summer's", "day"]
    );

    let counts = resolver.resolve_line(&tokens);
    assert_eq!(counts.len(), 8);
    assert_eq!(counts[7], dict.get("day").unwrap().end_line_syllables.unwrap());
    assert_eq!(counts[6], dict.get("summers").unwrap().syllables);
}

#[test]
fn apostrophe_fallback_agrees_between_resolver_and_encoder() {
    let dict = SyllableDictionary::parse(DICT).unwrap();
    let vocab = Vocabulary::from_dictionary(&dict);
    let resolver = SyllableResolver::new(&dict);
    let encoder = Encoder::new(&vocab);

    let hit = resolver.lookup("summer's").expect("fallback hit");
    assert_ne!(hit.source, LookupSource::Exact);
    assert_eq!(hit.form, "summers");
    assert_eq!(encoder.encode_token("summer's"), vocab.id("summers"));
    assert_eq!(hit.id, vocab.id("summers").unwrap());
}

#[test]
fn whole_poem_keeps_count_alignment() {
    let dict = SyllableDictionary::parse(DICT).unwrap();
    let vocab = Vocabulary::from_dictionary(&dict);
    let resolver = SyllableResolver::new(&dict);
    let encoder = Encoder::new(&vocab);
    let corpus = segment_str(CORPUS, SegmentOptions::default()).unwrap();

    for line in corpus.lines() {
        let tokens = tokenize(&line.raw_text);
        let counts = resolver.resolve_line(&tokens);
        let encoded = encoder.encode_line(&tokens);
        assert_eq!(counts.len(), tokens.len());
        assert!(encoded.len() <= tokens.len());
    }

    let second = tokenize(&corpus.poem(1).unwrap()[1].raw_text);
    assert_eq!(resolver.line_total(&second), 10);
}
