//! Batch front end for the chapter transforms.
//!
//! Applies the same transforms as the editor to a stored chapter, a file or
//! stdin, and reports how much of the chapter store is filled.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chapterfix::bible::{self, ChapterRef};
use chapterfix::config::Config;
use chapterfix::logging;
use chapterfix::normalizer::{self, verses, Transform};
use chapterfix::store::ChapterStore;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "normalize_chapter")]
#[command(about = "Repair line breaks and verse boundaries in Bible chapter text")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply transforms and print the result, or save it back to the store
    Apply {
        /// Read text from this file instead of stdin
        #[arg(long, value_name = "FILE", conflicts_with = "chapter")]
        input: Option<PathBuf>,

        /// Read text from the store, e.g. "1 Corinthians 13"
        #[arg(long, value_name = "CHAPTER")]
        chapter: Option<String>,

        /// Transform to apply; repeatable, applied in order (default: fix, verses)
        #[arg(long = "step", value_enum)]
        steps: Vec<Step>,

        /// Characters removed by the strip step (default: CHAPTERFIX_STRIP)
        #[arg(long, value_name = "CHARS")]
        strip_chars: Option<String>,

        /// Write the result back to the store instead of printing it
        #[arg(long, requires = "chapter")]
        save: bool,

        /// Chapter store path (default: CHAPTER_STORE)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },

    /// Show how many chapters hold text
    Status {
        /// Chapter store path (default: CHAPTER_STORE)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,

        /// List chapters that are still empty
        #[arg(long)]
        missing: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a single verse from a stored chapter
    Verse {
        /// Chapter to read, e.g. "John 3"
        #[arg(long, value_name = "CHAPTER")]
        chapter: String,

        /// Verse number
        number: u32,

        /// Chapter store path (default: CHAPTER_STORE)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Step {
    /// Join wrapped lines
    Fix,
    /// One verse per line
    Verses,
    /// Remove symbols
    Strip,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    store: PathBuf,
    filled: usize,
    total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load().context("Failed to load configuration")?;
    logging::init_stderr_logging(config.log_level);

    match args.command {
        Commands::Apply {
            input,
            chapter,
            steps,
            strip_chars,
            save,
            store,
        } => {
            let strip = strip_chars.unwrap_or_else(|| config.strip_chars.clone());
            let transforms = build_transforms(&steps, &strip)?;
            let store_path = store.unwrap_or_else(|| config.store_path.clone());
            run_apply(input, chapter.as_deref(), &transforms, save, store_path)
        }
        Commands::Status {
            store,
            missing,
            json,
        } => {
            let store_path = store.unwrap_or_else(|| config.store_path.clone());
            run_status(store_path, missing, json)
        }
        Commands::Verse {
            chapter,
            number,
            store,
        } => {
            let store_path = store.unwrap_or_else(|| config.store_path.clone());
            run_verse(&chapter, number, store_path)
        }
    }
}

fn build_transforms(steps: &[Step], strip: &str) -> Result<Vec<Transform>> {
    let steps = if steps.is_empty() {
        &[Step::Fix, Step::Verses][..]
    } else {
        steps
    };

    steps
        .iter()
        .map(|step| match step {
            Step::Fix => Ok(Transform::FixLineBreaks),
            Step::Verses => Ok(Transform::NormalizeVerses),
            Step::Strip if strip.is_empty() => {
                bail!("--step strip needs --strip-chars or CHAPTERFIX_STRIP")
            }
            Step::Strip => Ok(Transform::StripChars(strip.to_string())),
        })
        .collect()
}

fn resolve_chapter(name: &str) -> Result<ChapterRef> {
    bible::parse_chapter_query(name)
        .or_else(|| ChapterRef::from_display(name).filter(ChapterRef::is_known))
        .with_context(|| format!("Unknown chapter: {name}"))
}

fn run_apply(
    input: Option<PathBuf>,
    chapter: Option<&str>,
    transforms: &[Transform],
    save: bool,
    store_path: PathBuf,
) -> Result<()> {
    let mut store = None;
    let text = match (input, chapter) {
        (Some(path), _) => fs_err::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, Some(name)) => {
            let reference = resolve_chapter(name)?;
            let opened = ChapterStore::open(store_path).context("Failed to open chapter store")?;
            let text = opened.chapter_text(&reference).to_string();
            store = Some((opened, reference));
            text
        }
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let names: Vec<&str> = transforms.iter().map(Transform::name).collect();
    tracing::info!("Applying {}", names.join(", "));
    let result = normalizer::apply_all(&text, transforms);

    match store {
        Some((mut store, reference)) if save => {
            store.set_chapter(&reference, result);
            store.save()?;
            println!("Saved {} to {}", reference.display(), store.path().display());
        }
        _ => println!("{result}"),
    }
    Ok(())
}

fn run_status(store_path: PathBuf, list_missing: bool, json: bool) -> Result<()> {
    let store = ChapterStore::open(store_path).context("Failed to open chapter store")?;
    let chapters = bible::chapter_list();

    let empty: Vec<String> = chapters
        .iter()
        .filter(|c| !store.is_filled(&c.key()))
        .map(ChapterRef::display)
        .collect();

    let report = StatusReport {
        store: store.path().to_path_buf(),
        filled: chapters.len() - empty.len(),
        total: chapters.len(),
        missing: if list_missing { empty } else { Vec::new() },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {}/{} chapters filled",
        report.store.display(),
        report.filled,
        report.total
    );
    for name in &report.missing {
        println!("  {name}");
    }
    Ok(())
}

fn run_verse(name: &str, number: u32, store_path: PathBuf) -> Result<()> {
    let reference = resolve_chapter(name)?;
    let store = ChapterStore::open(store_path).context("Failed to open chapter store")?;
    let text = store.chapter_text(&reference);

    match verses::verse_text(text, number) {
        Some(verse) => {
            println!("{verse}");
            Ok(())
        }
        None => bail!("{} has no verse {number}", reference.display()),
    }
}
