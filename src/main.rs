use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmwc::*;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cmwc", about = "CMWC random number generators and parameter search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write generator output to stdout as raw Little-Endian bytes, for external test suites
    Stream {
        /// Multiplier A
        #[arg(long, default_value_t = DEFAULT_MULTIPLIER)]
        multiplier: u32,
        /// Log2 of the lag count R
        #[arg(long, default_value_t = DEFAULT_LOG2_LAG_COUNT)]
        log2_lags: u32,
        /// Seed; operating system entropy if not set
        #[arg(long, env = "CMWC_SEED")]
        seed: Option<i64>,
    },
    /// Search for multipliers with long periods and print them
    Search {
        /// Modulus B, a power of two up to 2^32
        #[arg(long, default_value_t = 1u64 << 32)]
        modulus: u64,
        /// Lag count R, a power of two
        #[arg(long, default_value_t = 32)]
        lag_count: u64,
        /// Number of independent searches
        #[arg(long, default_value_t = 100)]
        count: usize,
        /// Candidates per search before giving up
        #[arg(long, default_value_t = params::DEFAULT_ATTEMPTS)]
        attempts: u32,
        /// Miller-Rabin rounds
        #[arg(long, default_value_t = params::DEFAULT_ROUNDS)]
        rounds: u32,
        /// Seed for candidate selection; time-derived if not set
        #[arg(long, env = "CMWC_SEED")]
        seed: Option<u64>,
    },
}

fn stream(multiplier: u32, log2_lags: u32, seed: Option<i64>) -> Result<()> {
    let mut rnd = Cmwc32::new(multiplier, log2_lags).context("invalid generator parameters")?;
    match seed {
        Some(seed) => rnd.seed(seed),
        None => rnd.seed_from_entropy(),
    }
    info!(multiplier, lag_count = rnd.lag_count(), "streaming");

    let mut stdout = std::io::stdout().lock();
    let mut v: Vec<u8> = Vec::with_capacity(0x10000);
    loop {
        v.extend_from_slice(&rnd.next().to_le_bytes());
        if v.len() >= 0x10000 {
            stdout.write_all(v.as_slice())?;
            v.clear();
        }
    }
}

fn search(modulus: u64, lag_count: u64, count: usize, config: SearchConfig, seed: Option<u64>) -> Result<()> {
    let seed = match seed {
        Some(seed) => seed,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
    };
    info!(modulus, lag_count, count, seed, "searching");

    let mut stdout = std::io::stdout().lock();
    for result in search_many(modulus, lag_count, count, &config, seed) {
        match result {
            Ok(params) => writeln!(stdout, "CMWC({}, {}, {}) -> {}", params.multiplier, modulus, lag_count, params.period)?,
            Err(e) if e.is_retriable() => warn!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only data. LOG_FORMAT=json for structured output.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if std::env::var("LOG_FORMAT").unwrap_or_default() == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
    }

    match Cli::parse().command {
        Command::Stream { multiplier, log2_lags, seed } => stream(multiplier, log2_lags, seed),
        Command::Search { modulus, lag_count, count, attempts, rounds, seed } => {
            let config = SearchConfig { attempts, rounds, ..SearchConfig::default() };
            search(modulus, lag_count, count, config, seed)
        }
    }
}
