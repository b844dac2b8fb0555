//! Watchlist scanning: fetch bars per symbol, run the pipeline, and collect
//! the instruments whose latest alert is still fresh.
//!
//! A failing symbol is warned about and skipped so one bad file or feed does
//! not abort the batch; whether an all-failed scan is fatal is the caller's
//! call.

use chrono::{DateTime, TimeZone};
use std::collections::HashSet;

use crate::domain::indicator::IndicatorParams;
use crate::domain::instrument::{AlertRecord, Instrument};
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, thiserror::Error)]
pub enum WatchlistError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

/// Splits a comma-separated watchlist, trimming and uppercasing each symbol.
pub fn parse_symbols(input: &str) -> Result<Vec<String>, WatchlistError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(WatchlistError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if seen.contains(&symbol) {
            return Err(WatchlistError::DuplicateSymbol(symbol));
        }
        seen.insert(symbol.clone());
        symbols.push(symbol);
    }

    Ok(symbols)
}

pub struct ScanOutcome {
    /// Instruments with a fresh alert, in watchlist order.
    pub alerted: Vec<Instrument>,
    /// One record per alerted instrument, parallel to `alerted`.
    pub alerts: Vec<AlertRecord>,
    pub skipped: Vec<SkippedSymbol>,
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

pub fn run_scan<Tz: TimeZone>(
    data_port: &dyn DataPort,
    symbols: &[String],
    params: &IndicatorParams,
    reference: &DateTime<Tz>,
    snapshot_rows: usize,
) -> ScanOutcome {
    let mut alerted = Vec::new();
    let mut alerts = Vec::new();
    let mut skipped = Vec::new();

    for symbol in symbols {
        let bars = match data_port.fetch_bars(symbol) {
            Ok(bars) => bars,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", symbol, e);
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let instrument = match Instrument::from_bars(symbol, bars, params) {
            Ok(instrument) => instrument,
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", symbol, e);
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match instrument.fresh_alert(reference, snapshot_rows) {
            Some(record) => {
                eprintln!("  {}: {} [ALERT]", symbol, record.alert_type);
                alerts.push(record);
                alerted.push(instrument);
            }
            None => eprintln!("  {}: no fresh alert", symbol),
        }
    }

    ScanOutcome {
        alerted,
        alerts,
        skipped,
    }
}
