use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use serde_json::json;
use tsuzuri_core::{FansubParser, ParserConfig, Profiler, TsuzuriError};

/// Parse fansub file and directory names.
#[derive(Debug, Parser)]
#[command(name = "tsuzuri-parse", version, about)]
struct Cli {
    /// Names to parse; read one per line from stdin when omitted
    names: Vec<String>,

    /// Print one JSON object per name
    #[arg(long)]
    json: bool,

    /// Never treat extension-less names as directories
    #[arg(long)]
    no_directories: bool,

    /// Disable grammar memoization
    #[arg(long)]
    no_memo: bool,

    /// Report accumulated time per grammar on stderr when done
    #[arg(long)]
    profile: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Default, Clone, Copy)]
struct GrammarTiming {
    calls: u64,
    total: Duration,
}

type Timings = Arc<Mutex<BTreeMap<&'static str, GrammarTiming>>>;

fn init_logging(verbose: u8) {
    // RUST_LOG wins over -v
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => "warn",
            1 => "tsuzuri_core=debug",
            _ => "tsuzuri_core=trace",
        }
        .to_string()
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn build_parser(cli: &Cli, timings: &Timings) -> Result<FansubParser> {
    let mut config = ParserConfig::new()
        .with_memoize(!cli.no_memo)
        .with_directories(!cli.no_directories);

    if cli.profile {
        let sink = timings.clone();
        let profiler: Profiler = Arc::new(move |name: &'static str, elapsed: Duration| {
            let mut timings = sink.lock();
            let entry = timings.entry(name).or_default();
            entry.calls += 1;
            entry.total += elapsed;
        });
        config = config.with_profiler(profiler);
    }

    FansubParser::new(config).context("failed to build parser")
}

fn print_result(out: &mut impl Write, json: bool, name: &str, parser: &FansubParser) -> Result<()> {
    let result = parser.try_parse(name);
    if json {
        let line = match &result {
            Ok(entity) => json!({ "input": name, "entity": entity, "error": null }),
            Err(err) => json!({ "input": name, "entity": null, "error": err.to_string() }),
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    } else {
        match result {
            Ok(entity) => writeln!(out, "{name}\t{entity}")?,
            Err(TsuzuriError::Unrecognized { .. }) => writeln!(out, "{name}\t<unrecognized>")?,
            Err(err) => writeln!(out, "{name}\t<{err}>")?,
        }
    }
    Ok(())
}

fn report_profile(timings: &Timings) {
    let timings = timings.lock();
    eprintln!("{:<20} {:>10} {:>14} {:>12}", "grammar", "calls", "total", "mean");
    for (name, timing) in timings.iter() {
        let calls = u32::try_from(timing.calls).unwrap_or(u32::MAX).max(1);
        eprintln!(
            "{:<20} {:>10} {:>14?} {:>12?}",
            name,
            timing.calls,
            timing.total,
            timing.total / calls
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let timings = Timings::default();
    let parser = build_parser(&cli, &timings)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.names.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            print_result(&mut out, cli.json, line, &parser)?;
        }
    } else {
        for name in &cli.names {
            print_result(&mut out, cli.json, name, &parser)?;
        }
    }

    tracing::debug!(cached = parser.cache_len(), "done");
    if cli.profile {
        report_profile(&timings);
    }
    Ok(())
}
