//! Flotilla bot.
//!
//! Speaks the engine's text protocol on stdin/stdout. Stdout carries orders
//! only, so logs go to a per-process file (or stderr without `--log-dir`).

mod config;

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use flotilla_core::protocol::{read_frame, read_init, send_name, write_orders, TokenReader};
use flotilla_core::strategies::Prospector;
use flotilla_core::{Overmind, TurnSnapshot};
use tracing_subscriber::EnvFilter;

use config::BotConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Halite bot driven by the Flotilla move arbiter", long_about = None)]
struct Cli {
    /// Master seed for per-ship randomness. Defaults to the match seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Directory for the per-process log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// JSON file overriding overmind and prospector settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name announced to the engine.
    #[arg(long, default_value = "flotilla")]
    name: String,
}

fn init_logging(log_dir: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);
    match log_dir {
        Some(dir) => {
            let path = dir.join(format!("flotilla-{}.log", std::process::id()));
            let file = File::create(&path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Reads one frame, resolves it and writes the orders. Returns the state hash
/// of the frame as read.
fn play_turn<R: BufRead, W: Write>(
    reader: &mut TokenReader<R>,
    snapshot: &mut TurnSnapshot,
    overmind: &mut Overmind,
    out: &mut W,
) -> Result<u64> {
    read_frame(reader, snapshot)
        .with_context(|| format!("reading frame after turn {}", snapshot.turn()))?;
    let hash = snapshot.state_hash();
    tracing::debug!(turn = snapshot.turn(), hash, "frame read");

    let orders = overmind
        .step(snapshot)
        .with_context(|| format!("resolving turn {}", snapshot.turn()))?;
    write_orders(out, &orders)?;
    Ok(hash)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_dir.as_ref())?;
    let mut config = BotConfig::load(cli.config.as_deref())?;

    let stdin = io::stdin();
    let mut reader = TokenReader::new(stdin.lock());
    let mut out = BufWriter::new(io::stdout().lock());

    let mut snapshot = read_init(&mut reader).context("reading match header")?;
    config.overmind.seed = cli.seed.unwrap_or(snapshot.constants().game_seed);
    let mut overmind = Overmind::new(config.overmind, Prospector::new(config.prospector));
    tracing::info!(seed = config.overmind.seed, name = %cli.name, "bot ready");
    send_name(&mut out, &cli.name)?;

    let mut last_hash = None;
    while !reader.at_eof()? {
        match play_turn(&mut reader, &mut snapshot, &mut overmind, &mut out) {
            Ok(hash) => last_hash = Some(hash),
            Err(err) => {
                tracing::error!(turn = snapshot.turn(), last_hash, error = %err, "turn failed");
                return Err(err);
            }
        }
    }

    tracing::info!(turn = snapshot.turn(), last_hash, "engine closed the stream");
    Ok(())
}
