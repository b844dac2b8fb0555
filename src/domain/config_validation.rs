//! Watch configuration validation.
//!
//! Checks every field a scan needs before any data is read.

use crate::domain::error::StockwatchError;
use crate::domain::scan;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_SNAPSHOT_ROWS: i64 = 5;

pub fn validate_watch_config(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    validate_csv_dir(config)?;
    validate_symbols(config)?;
    validate_timezone(config)?;
    validate_snapshot_rows(config)?;
    Ok(())
}

fn validate_csv_dir(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    match config.get_string("data", "csv_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(StockwatchError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        }),
    }
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    let raw = match config.get_string("watch", "symbols") {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            return Err(StockwatchError::ConfigMissing {
                section: "watch".to_string(),
                key: "symbols".to_string(),
            });
        }
    };

    scan::parse_symbols(&raw).map_err(|e| StockwatchError::ConfigInvalid {
        section: "watch".to_string(),
        key: "symbols".to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// The timezone key is optional; when present it must name an IANA zone.
fn validate_timezone(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    let raw = match config.get_string("watch", "timezone") {
        Some(s) => s,
        None => return Ok(()),
    };

    raw.trim()
        .parse::<chrono_tz::Tz>()
        .map_err(|_| StockwatchError::ConfigInvalid {
            section: "watch".to_string(),
            key: "timezone".to_string(),
            reason: format!("unknown timezone '{}'", raw.trim()),
        })?;
    Ok(())
}

fn validate_snapshot_rows(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    let value = config.get_int("watch", "snapshot_rows", DEFAULT_SNAPSHOT_ROWS);
    if value < 1 {
        return Err(StockwatchError::ConfigInvalid {
            section: "watch".to_string(),
            key: "snapshot_rows".to_string(),
            reason: "snapshot_rows must be at least 1".to_string(),
        });
    }
    Ok(())
}
