//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_notify_adapter::ConsoleNotifyAdapter;
use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_store_adapter::CsvStoreAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_watch_config, DEFAULT_SNAPSHOT_ROWS};
use crate::domain::error::StockwatchError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::instrument::Instrument;
use crate::domain::recency;
use crate::domain::scan::{self, parse_symbols};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::notify_port::NotifyPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "stockwatch", about = "Technical indicator scanner and alert engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the watchlist and report fresh alerts
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        /// Reference time, RFC3339 (default: now)
        #[arg(long)]
        at: Option<String>,
        /// Emit alerts as one JSON document
        #[arg(long)]
        json: bool,
        /// Skip writing the annotated CSV
        #[arg(long)]
        no_store: bool,
    },
    /// Write one instrument's annotated series as CSV
    Annotate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show the latest alert for one symbol and whether it is fresh
    Check {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
        /// Reference time, RFC3339 (default: now)
        #[arg(long)]
        at: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            at,
            json,
            no_store,
        } => run_watch_scan(&config, at.as_deref(), json, no_store),
        Command::Annotate {
            config,
            symbol,
            out,
        } => run_annotate(&config, &symbol, out.as_ref()),
        Command::Check { config, symbol, at } => run_check(&config, &symbol, at.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StockwatchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Orchestration settings read from the INI file. Indicator parameters are
/// fixed constants and deliberately not configurable here.
#[derive(Debug)]
pub struct WatchConfig {
    pub csv_dir: String,
    pub symbols: Vec<String>,
    pub timezone: Tz,
    pub snapshot_rows: usize,
    pub annotated_csv: Option<String>,
}

pub fn build_watch_config(adapter: &dyn ConfigPort) -> Result<WatchConfig, StockwatchError> {
    let csv_dir =
        adapter
            .get_string("data", "csv_dir")
            .ok_or_else(|| StockwatchError::ConfigMissing {
                section: "data".into(),
                key: "csv_dir".into(),
            })?;

    let symbols_raw =
        adapter
            .get_string("watch", "symbols")
            .ok_or_else(|| StockwatchError::ConfigMissing {
                section: "watch".into(),
                key: "symbols".into(),
            })?;
    let symbols = parse_symbols(&symbols_raw).map_err(|e| StockwatchError::ConfigInvalid {
        section: "watch".into(),
        key: "symbols".into(),
        reason: e.to_string(),
    })?;

    let timezone = match adapter.get_string("watch", "timezone") {
        Some(raw) => {
            raw.trim()
                .parse::<Tz>()
                .map_err(|_| StockwatchError::ConfigInvalid {
                    section: "watch".into(),
                    key: "timezone".into(),
                    reason: format!("unknown timezone '{}'", raw.trim()),
                })?
        }
        None => chrono_tz::Europe::Bucharest,
    };

    let snapshot_rows = adapter.get_int("watch", "snapshot_rows", DEFAULT_SNAPSHOT_ROWS);
    if snapshot_rows < 1 {
        return Err(StockwatchError::ConfigInvalid {
            section: "watch".into(),
            key: "snapshot_rows".into(),
            reason: format!("must be at least 1, got {snapshot_rows}"),
        });
    }

    Ok(WatchConfig {
        csv_dir,
        symbols,
        timezone,
        snapshot_rows: snapshot_rows as usize,
        annotated_csv: adapter.get_string("output", "annotated_csv"),
    })
}

/// `--at` pins the reference time for deterministic runs; otherwise now,
/// expressed in the configured timezone either way.
pub fn resolve_reference(at: Option<&str>, timezone: &Tz) -> Result<DateTime<Tz>, String> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(timezone))
            .map_err(|e| format!("invalid --at value: {e} (expected RFC3339 datetime)")),
        None => Ok(Utc::now().with_timezone(timezone)),
    }
}

pub fn run_watch_scan(
    config_path: &PathBuf,
    at: Option<&str>,
    json: bool,
    no_store: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_watch_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let watch = match build_watch_config(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Resolve the reference time
    let reference = match resolve_reference(at, &watch.timezone) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::from(2);
        }
    };

    // Stage 3: Scan the watchlist
    eprintln!(
        "Scanning {} symbols from {} (reference {})",
        watch.symbols.len(),
        watch.csv_dir,
        reference.format("%Y-%m-%d %H:%M %Z"),
    );
    let data_port = CsvDataAdapter::new(PathBuf::from(&watch.csv_dir));
    let params = IndicatorParams::default();
    let outcome = scan::run_scan(
        &data_port,
        &watch.symbols,
        &params,
        &reference,
        watch.snapshot_rows,
    );

    if !watch.symbols.is_empty() && outcome.skipped.len() == watch.symbols.len() {
        eprintln!("error: no symbol could be scanned");
        return ExitCode::from(3);
    }

    // Stage 4: Persist the annotated tables of alerted instruments
    if !no_store && !outcome.alerted.is_empty() {
        if let Some(path) = &watch.annotated_csv {
            if let Err(e) = CsvStoreAdapter.save_annotated(&outcome.alerted, path) {
                eprintln!("error: {e}");
                return (&e).into();
            }
            eprintln!("Annotated CSV written to {path}");
        }
    }

    // Stage 5: Report
    let notifier = ConsoleNotifyAdapter::new(json);
    if let Err(e) = notifier.notify(&outcome.alerts) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!(
        "{} fresh alerts, {} symbols skipped",
        outcome.alerts.len(),
        outcome.skipped.len(),
    );
    ExitCode::SUCCESS
}

pub fn run_annotate(config_path: &PathBuf, symbol: &str, out: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_watch_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let watch = match build_watch_config(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let out_path = match out {
        Some(p) => p.display().to_string(),
        None => match &watch.annotated_csv {
            Some(p) => p.clone(),
            None => {
                eprintln!("error: no output path (use --out or set [output] annotated_csv)");
                return ExitCode::from(2);
            }
        },
    };

    let instrument = match build_instrument(&watch.csv_dir, symbol) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Err(e) = CsvStoreAdapter.save_annotated(&[instrument], &out_path) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Annotated CSV written to {out_path}");
    ExitCode::SUCCESS
}

pub fn run_check(config_path: &PathBuf, symbol: &str, at: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_watch_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let watch = match build_watch_config(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let reference = match resolve_reference(at, &watch.timezone) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::from(2);
        }
    };

    let instrument = match build_instrument(&watch.csv_dir, symbol) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match instrument.latest_alert() {
        None => println!("{}: no alert in history", instrument.symbol()),
        Some((timestamp, alert)) => {
            let when = DateTime::from_timestamp(timestamp, 0)
                .map(|dt| {
                    dt.with_timezone(&watch.timezone)
                        .format("%Y-%m-%d %H:%M %Z")
                        .to_string()
                })
                .unwrap_or_else(|| timestamp.to_string());
            let state = if recency::is_fresh(instrument.annotated(), &reference) {
                "fresh"
            } else {
                "stale"
            };
            println!("{}: {} on {} ({})", instrument.symbol(), alert, when, state);
        }
    }
    ExitCode::SUCCESS
}

fn build_instrument(csv_dir: &str, symbol: &str) -> Result<Instrument, StockwatchError> {
    let symbol = symbol.trim().to_uppercase();
    let data_port = CsvDataAdapter::new(PathBuf::from(csv_dir));
    let bars = data_port.fetch_bars(&symbol)?;
    Instrument::from_bars(&symbol, bars, &IndicatorParams::default())
}
