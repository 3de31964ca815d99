use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use sonnet_corpus::tokenize;
use sonnet_dict::{LoadMode, SyllableDictionary};
use sonnet_lexicon::{Encoder, SyllableResolver, Vocabulary};
use sonnet_types::LinePosition;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_path = args.next().map(PathBuf::from).context(
        "usage: cargo run -p sonnet-lexicon --example scan -- <dictionary> [--demo | <line>]",
    )?;
    let next = args.next();
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let lines: Vec<String> = match next.as_deref() {
        Some("--demo") => vec![
            "Shall I compare thee to a summer's day?".into(),
            "Thou art more lovely and more temperate:".into(),
            "Rough winds do shake the darling buds of May,".into(),
        ],
        Some(line) => vec![line.to_string()],
        None => bail!(
            "usage: cargo run -p sonnet-lexicon --example scan -- <dictionary> [--demo | <line>]"
        ),
    };

    let dict = SyllableDictionary::load_with_mode(&dict_path, LoadMode::Mmap)
        .with_context(|| format!("loading dictionary from {}", dict_path.display()))?;
    let resolver = SyllableResolver::new(&dict);
    let vocab = Vocabulary::from_dictionary(&dict);
    let encoder = Encoder::new(&vocab);

    println!("Dictionary: {}", dict_path.display());

    for line in lines {
        let tokens = tokenize(&line);
        println!("\nLine: {}", line);
        for (idx, token) in tokens.iter().enumerate() {
            let position = LinePosition::of(idx, tokens.len());
            match resolver.lookup(token) {
                Some(hit) => println!(
                    "  {:<12} {:<10} id {:<5} {:?} [{:?}]",
                    token,
                    hit.form,
                    hit.id,
                    hit.record.candidates(position),
                    hit.source
                ),
                None => println!("  {:<12} (unknown)", token),
            }
        }
        println!(
            "  syllables {:?} = {}",
            resolver.resolve_line(&tokens),
            resolver.line_total(&tokens)
        );
        println!("  encoded   {:?}", encoder.encode_line(&tokens));
    }

    Ok(())
}
