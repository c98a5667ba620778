//! rehydrate: Restore full posts from a stream of dehydrated records
//!
//! Usage:
//!   # Read from a file, write to another
//!   rehydrate twitter.properties dehydrated.json rehydrated.json
//!
//!   # Read from stdin, write to stdout
//!   cat dehydrated.json | rehydrate twitter.properties - - > rehydrated.json
//!
//! Diagnostics (including posts that could not be found) go to stderr;
//! set RUST_LOG=debug for per-batch progress.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use rehydrate::{rehydrate, Settings};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
This tool processes a stream of JSON objects representing standoff
annotations on Tweets, fetching the full JSON representation of the
Tweets from the Twitter API, merging in the entities, and writing
the resulting JSON objects to the output.

API access uses the \"application only\" authentication scheme.
You must create a Twitter application, and provide its consumer
key and secret in a properties file:

  consumerKey=...
  consumerSecret=...

By default this tool fetches \"extended\" format tweets. To fetch them
in \"compatibility\" mode instead, add

  compatibilityMode=true

to your credentials file. Any setting can also be supplied through the
environment, e.g. REHYDRATE_CONSUMER_KEY.

Note that the API used is rate-limited - do not attempt to rehydrate
more than 6000 Tweets in any 15 minute window.";

#[derive(Parser, Debug)]
#[command(name = "rehydrate")]
#[command(about = "Rehydrate dehydrated Tweets via the Twitter API", long_about = None)]
#[command(after_long_help = AFTER_HELP)]
struct Args {
    /// Properties file containing the application's consumer key and secret
    #[arg(value_name = "CREDENTIALS")]
    credentials: PathBuf,

    /// File of dehydrated Tweets, i.e. a stream of JSON objects with "id"
    /// and "entities" properties ("-" for stdin)
    #[arg(value_name = "INPUT")]
    input: String,

    /// File to write rehydrated Tweets to ("-" for stdout)
    #[arg(value_name = "OUTPUT")]
    output: String,
}

/// `RUST_LOG`-style directives, falling back to `info` when none are given
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    // stdout may carry the output stream, so logs go to stderr
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = Settings::load(&args.credentials).with_context(|| {
        format!("Failed to load credentials from {}", args.credentials.display())
    })?;

    let reader: Box<dyn Read> = if args.input == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(
            File::open(&args.input).with_context(|| format!("Failed to open {}", args.input))?,
        ))
    };

    let writer: Box<dyn Write> = if args.output == "-" {
        Box::new(BufWriter::new(std::io::stdout().lock()))
    } else {
        Box::new(BufWriter::new(
            File::create(&args.output)
                .with_context(|| format!("Failed to create {}", args.output))?,
        ))
    };

    let summary = rehydrate(reader, writer, &settings).context("Rehydration failed")?;

    if summary.missing > 0 {
        tracing::warn!(
            "{} of {} posts could not be found",
            summary.missing,
            summary.records
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::prelude::*;

    fn enabled_at(directives: &str, level: Level) -> bool {
        let subscriber = tracing_subscriber::registry().with(log_filter(directives));
        tracing::subscriber::with_default(subscriber, || {
            if level == Level::DEBUG {
                tracing::enabled!(Level::DEBUG)
            } else if level == Level::INFO {
                tracing::enabled!(Level::INFO)
            } else {
                tracing::enabled!(Level::WARN)
            }
        })
    }

    #[test]
    fn test_info_by_default() {
        assert!(enabled_at("", Level::INFO));
        assert!(!enabled_at("", Level::DEBUG));
    }

    #[test]
    fn test_rust_log_debug_is_honoured() {
        assert!(enabled_at("debug", Level::DEBUG));
        assert!(enabled_at("rehydrate=debug", Level::DEBUG));
    }

    #[test]
    fn test_rust_log_can_quieten() {
        assert!(!enabled_at("warn", Level::INFO));
        assert!(enabled_at("warn", Level::WARN));
    }
}
