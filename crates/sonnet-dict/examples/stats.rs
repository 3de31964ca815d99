use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use sonnet_dict::{LoadMode, SyllableDictionary};
use sonnet_types::LinePosition;

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p sonnet-dict --example stats -- <path-to-dictionary>")?;

    let dict = SyllableDictionary::load_with_mode(&path, LoadMode::Mmap)
        .with_context(|| format!("loading dictionary from {}", path.display()))?;

    let mut histogram = [0usize; 8];
    for record in dict.iter() {
        let bucket = (record.syllables as usize).min(histogram.len() - 1);
        histogram[bucket] += 1;
    }

    println!("Dictionary: {}", path.display());
    println!("Words        : {}", dict.len());
    println!("End-of-line  : {}", dict.end_marked_count());
    println!("Alternates   : {}", dict.alternate_count());
    for (syllables, count) in histogram.iter().enumerate().skip(1) {
        println!("{} syllable(s): {}", syllables, count);
    }

    // Spot-check a couple of words that shift at the end of a line.
    for word in ["love", "even", "heaven"] {
        match dict.get(word) {
            Some(record) => println!(
                "'{}' mid-line {} / end of line {}",
                word,
                record.count_at(LinePosition::Interior),
                record.count_at(LinePosition::Final)
            ),
            None => println!("'{}' not in dictionary", word),
        }
    }

    Ok(())
}
