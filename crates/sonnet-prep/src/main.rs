use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use sonnet_corpus::{BlankLines, SegmentOptions};
use sonnet_dict::LoadMode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sonnet_prep::{Dataset, DatasetReport, PipelineOptions};

const DEFAULT_DICT_PATH: &str = "Syllable_dictionary.txt";
const DEFAULT_CORPUS_PATH: &str = "shakespeare.txt";
const DEFAULT_TOP_OOV: usize = 20;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!(
        "using dictionary at {} (mode: {:?})",
        config.dict_path.display(),
        config.dict_mode
    );
    info!("using corpus at {}", config.corpus_path.display());
    if config.blank_lines == BlankLines::Keep {
        info!("keeping blank lines inside poems");
    }

    let start = Instant::now();
    let options = PipelineOptions {
        dict_mode: config.dict_mode,
        segment: SegmentOptions {
            blank_lines: config.blank_lines,
        },
    };
    let dataset = Dataset::from_files(&config.dict_path, &config.corpus_path, options)
        .with_context(|| {
            format!(
                "preparing dataset from {} and {}",
                config.dict_path.display(),
                config.corpus_path.display()
            )
        })?;
    info!(
        "dataset of {} lines built in {} ms",
        dataset.len(),
        start.elapsed().as_millis()
    );

    let report = DatasetReport::from_dataset(&dataset, config.top_oov);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    dict_path: PathBuf,
    corpus_path: PathBuf,
    dict_mode: LoadMode,
    blank_lines: BlankLines,
    top_oov: usize,
}

/// Values given on the command line. Each flag accepts `--flag value` and
/// `--flag=value`.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    dict: Option<PathBuf>,
    corpus: Option<PathBuf>,
    dict_mode: Option<LoadMode>,
    top_oov: Option<usize>,
    keep_blank_lines: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> CliArgs {
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--keep-blank-lines" {
            cli.keep_blank_lines = true;
            continue;
        }
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
            None => (arg, None),
        };
        if !matches!(
            flag.as_str(),
            "--dict" | "--corpus" | "--dict-mode" | "--top-oov"
        ) {
            warn!("ignoring unknown argument {flag}");
            continue;
        }
        let Some(value) = inline.or_else(|| args.next()) else {
            warn!("missing value for {flag}");
            continue;
        };
        match flag.as_str() {
            "--dict" => cli.dict = Some(PathBuf::from(value)),
            "--corpus" => cli.corpus = Some(PathBuf::from(value)),
            "--dict-mode" => match parse_load_mode(&value) {
                Some(mode) => cli.dict_mode = Some(mode),
                None => warn!("ignoring --dict-mode {value:?}, expected mmap or owned"),
            },
            _ => match value.parse::<usize>() {
                Ok(n) => cli.top_oov = Some(n),
                Err(_) => warn!("ignoring --top-oov {value:?}, expected a count"),
            },
        }
    }
    cli
}

fn load_config() -> Config {
    let cli = parse_args(env::args().skip(1));

    let dict_path = cli
        .dict
        .or_else(|| env::var("SONNET_DICT_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_PATH));
    let corpus_path = cli
        .corpus
        .or_else(|| env::var("SONNET_CORPUS_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_PATH));
    let dict_mode = cli
        .dict_mode
        .or_else(|| {
            let raw = env::var("SONNET_DICT_MODE").ok()?;
            let mode = parse_load_mode(&raw);
            if mode.is_none() {
                warn!("ignoring SONNET_DICT_MODE={raw:?}, expected mmap or owned");
            }
            mode
        })
        .unwrap_or(LoadMode::Mmap);
    let blank_lines = if cli.keep_blank_lines {
        BlankLines::Keep
    } else {
        env::var("SONNET_BLANK_LINES")
            .ok()
            .and_then(|raw| {
                let policy = parse_blank_lines(&raw);
                if policy.is_none() {
                    warn!("ignoring SONNET_BLANK_LINES={raw:?}, expected keep or drop");
                }
                policy
            })
            .unwrap_or_default()
    };
    let top_oov = cli
        .top_oov
        .or_else(|| {
            let raw = env::var("SONNET_TOP_OOV").ok()?;
            let n = raw.parse::<usize>().ok();
            if n.is_none() {
                warn!("ignoring SONNET_TOP_OOV={raw:?}, expected a count");
            }
            n
        })
        .unwrap_or(DEFAULT_TOP_OOV);

    Config {
        dict_path,
        corpus_path,
        dict_mode,
        blank_lines,
        top_oov,
    }
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn parse_blank_lines(raw: &str) -> Option<BlankLines> {
    match raw.to_ascii_lowercase().as_str() {
        "keep" => Some(BlankLines::Keep),
        "drop" => Some(BlankLines::Drop),
        _ => None,
    }
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_tracing() {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn args(raw: &[&str]) -> CliArgs {
        parse_args(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn flags_accept_both_value_forms() {
        let spaced = args(&[
            "--dict",
            "d.txt",
            "--corpus",
            "c.txt",
            "--dict-mode",
            "owned",
            "--top-oov",
            "5",
        ]);
        let inline = args(&[
            "--dict=d.txt",
            "--corpus=c.txt",
            "--dict-mode=owned",
            "--top-oov=5",
        ]);
        assert_eq!(spaced, inline);
        assert_eq!(spaced.dict, Some(PathBuf::from("d.txt")));
        assert_eq!(spaced.corpus, Some(PathBuf::from("c.txt")));
        assert_eq!(spaced.dict_mode, Some(LoadMode::Owned));
        assert_eq!(spaced.top_oov, Some(5));
        assert!(!spaced.keep_blank_lines);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cli = args(&["--top-oov=abc", "--dict-mode", "foo", "--keep-blank-lines"]);
        assert_eq!(cli.top_oov, None);
        assert_eq!(cli.dict_mode, None);
        assert!(cli.keep_blank_lines);

        let cli = args(&["--bogus", "--dict"]);
        assert_eq!(cli, CliArgs::default());
    }

    #[test]
    fn per_target_log_directives_survive() {
        let filter = env_filter(Some("sonnet_dict=debug,sonnet_corpus=warn"));
        let rendered = filter.to_string().to_lowercase();
        assert!(rendered.contains("sonnet_dict=debug"));
        assert!(rendered.contains("sonnet_corpus=warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let fallback = env_filter(None);
        assert_eq!(fallback.max_level_hint(), Some(LevelFilter::INFO));
    }
}
