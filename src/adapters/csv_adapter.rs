//! CSV file data adapter.
//!
//! Reads `<base>/<SYMBOL>.csv` with a `timestamp,open,high,low,close,volume`
//! header. The timestamp column holds epoch seconds or a YYYY-MM-DD session
//! date. Duplicate timestamps keep the last row seen, matching how refreshed
//! exports overwrite stale rows.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::bar::Bar;
use crate::domain::error::StockwatchError;
use crate::ports::data_port::DataPort;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, StockwatchError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StockwatchError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let file = path.display().to_string();

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        // keyed by timestamp: keep-last dedup and ascending order in one go
        let mut bars: BTreeMap<i64, Bar> = BTreeMap::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockwatchError::DataFormat {
                file: file.clone(),
                reason: format!("CSV parse error: {}", e),
            })?;

            let raw_timestamp = record.get(0).ok_or_else(|| StockwatchError::DataFormat {
                file: file.clone(),
                reason: "missing timestamp column".to_string(),
            })?;
            let timestamp = parse_timestamp(raw_timestamp, &file)?;

            let bar = Bar {
                timestamp,
                open: parse_field(&record, 1, "open", &file)?,
                high: parse_field(&record, 2, "high", &file)?,
                low: parse_field(&record, 3, "low", &file)?,
                close: parse_field(&record, 4, "close", &file)?,
                volume: parse_field(&record, 5, "volume", &file)?,
            };
            bars.insert(timestamp, bar);
        }

        Ok(bars.into_values().collect())
    }
}

/// Epoch seconds, or a YYYY-MM-DD session date taken as midnight UTC.
fn parse_timestamp(raw: &str, file: &str) -> Result<i64, StockwatchError> {
    let trimmed = raw.trim();
    if let Ok(epoch) = trimmed.parse::<i64>() {
        return Ok(epoch);
    }

    let date =
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| StockwatchError::DataFormat {
            file: file.to_string(),
            reason: format!(
                "invalid timestamp '{}': expected epoch seconds or YYYY-MM-DD",
                trimmed
            ),
        })?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp())
}

fn parse_field(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    file: &str,
) -> Result<f64, StockwatchError> {
    let raw = record.get(index).ok_or_else(|| StockwatchError::DataFormat {
        file: file.to_string(),
        reason: format!("missing {} column", column),
    })?;
    raw.trim().parse().map_err(|_| StockwatchError::DataFormat {
        file: file.to_string(),
        reason: format!("invalid {} value '{}'", column, raw),
    })
}
