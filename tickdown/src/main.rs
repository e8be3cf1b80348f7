/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use tickdown::{Format, Outcome, SettingsPatch, Timer};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Tickdown countdown timer.
///
/// Example:
///   tickdown -t 90 -f int --no-day
///   tickdown --config countdown.yaml
///   tickdown --from 1700000000 --until 1700000300
#[derive(Debug, Parser)]
#[command(
    name = "tickdown",
    about = "One-second countdown with day/hour/minute/second breakdown",
    long_about = None,
)]
struct Cli {
    /// Countdown length in seconds (default 60).
    #[arg(short = 't', long = "time")]
    time: Option<u64>,

    /// Output format: "string" (zero-padded) or "int".
    #[arg(short = 'f', long = "format", value_parser = parse_format)]
    format: Option<Format>,

    /// Do not split out hours; minutes absorb them.
    #[arg(long = "no-hour", default_value_t = false)]
    no_hour: bool,

    /// Do not split out days; hours run past 24.
    #[arg(long = "no-day", default_value_t = false)]
    no_day: bool,

    /// YAML settings file, applied before the flags above.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Start of a time range (unix seconds); the countdown runs for until - from.
    #[arg(long = "from", requires = "until", allow_hyphen_values = true)]
    from: Option<i64>,

    /// End of a time range (unix seconds).
    #[arg(long = "until", requires = "from", allow_hyphen_values = true)]
    until: Option<i64>,
}

impl Cli {
    /// Settings carried by the command-line flags alone.
    fn patch(&self) -> SettingsPatch {
        SettingsPatch {
            time: self.time,
            format: self.format,
            with_hour: self.no_hour.then_some(false),
            with_day: self.no_day.then_some(false),
        }
    }
}

fn parse_format(s: &str) -> Result<Format, String> {
    Format::from_name(s).ok_or_else(|| format!("unknown format '{s}' (valid: string, int)"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so stdout carries only the ticks.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        time    = ?cli.time,
        format  = ?cli.format,
        no_hour = cli.no_hour,
        no_day  = cli.no_day,
        config  = ?cli.config,
        from    = ?cli.from,
        until   = ?cli.until,
        "Configuration"
    );

    // ── Resolve settings: file, then flags, then range ────────────────────────
    let mut patch = SettingsPatch::default();

    if let Some(path) = &cli.config {
        match SettingsPatch::load_from_file(path) {
            Ok(from_file) => patch = from_file,
            Err(e) => {
                error!("Failed to load settings: {:#}", e);
                process::exit(1);
            }
        }
    }

    let mut timer = Timer::new();
    timer.initialize(Some(patch.overlay(cli.patch())));

    if let (Some(from), Some(until)) = (cli.from, cli.until) {
        if let Err(e) = timer.try_diff(from, until) {
            error!("{e}");
            process::exit(2);
        }
    }

    // ── Run ───────────────────────────────────────────────────────────────────
    let handle = timer.run(None, |tick| {
        if tick.finished {
            println!("{tick}  done");
        } else {
            println!("{tick}");
        }
    });

    let token = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling countdown");
            token.cancel();
        }
    });

    match handle.wait().await {
        Ok(Outcome::Finished) => info!("Countdown complete"),
        Ok(Outcome::Cancelled) => process::exit(130),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}
