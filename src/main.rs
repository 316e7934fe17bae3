use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use podcast_feedparser::{outputs, parse_async, ParseOptions};

#[derive(Parser)]
#[command(name = "podcast-feedparser")]
#[command(about = "Convert podcast RSS feeds into normalized JSON", long_about = None)]
struct Cli {
    /// Directory holding the .xml/.txt feeds to convert
    #[arg(long, default_value = "inputs")]
    inputs: PathBuf,

    /// Each run writes into a timestamped subfolder of this directory
    #[arg(long, default_value = "outputs")]
    outputs: PathBuf,

    /// Keep surrounding whitespace in text fragments
    #[arg(long)]
    no_trim: bool,

    /// Match element names exactly as written
    #[arg(long)]
    no_lowercase: bool,
}

fn is_feed_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                e == "xml" || e == "txt"
            })
            .unwrap_or(false)
}

async fn process_feed(path: &Path, out_dir: &Path, options: &ParseOptions) {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("feed")
        .to_string();

    let xml = match fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(e) => {
            error!(file = %path.display(), "Unable to read feed: {}", e);
            return;
        }
    };

    let start = Instant::now();
    let podcast = match parse_async(xml, options.clone()).await {
        Ok(podcast) => podcast,
        Err(e) => {
            warn!(file = %path.display(), "Skipping feed: {}", e);
            return;
        }
    };

    match outputs::write_podcast(out_dir, &stem, &podcast) {
        Ok(written) => info!(
            file = %path.display(),
            output = %written.display(),
            episodes = podcast.episodes.len(),
            "Processed in {:?}",
            start.elapsed()
        ),
        Err(e) => error!(file = %path.display(), "Failed to write output: {}", e),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let options = ParseOptions {
        trim: !cli.no_trim,
        lowercase: !cli.no_lowercase,
    };

    let program_start = Instant::now();
    let startup_unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let out_dir = cli.outputs.join(startup_unix.to_string());

    let entries = match fs::read_dir(&cli.inputs) {
        Ok(it) => it,
        Err(e) => {
            error!("Unable to read directory '{}': {}", cli.inputs.display(), e);
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                warn!("Error reading a directory entry: {}", e);
                None
            }
        })
        .filter(|path| is_feed_file(path))
        .collect();
    paths.sort();

    for path in &paths {
        process_feed(path, &out_dir, &options).await;
    }

    info!(feeds = paths.len(), "Total runtime: {:?}", program_start.elapsed());
}
