//! Console notification adapter.
//!
//! Prints fresh alerts to stdout, either as a readable text block per
//! instrument or as one JSON document wrapping every alert record.

use chrono::DateTime;

use crate::domain::instrument::AlertRecord;
use crate::domain::error::StockwatchError;
use crate::ports::notify_port::NotifyPort;

pub struct ConsoleNotifyAdapter {
    json: bool,
}

impl ConsoleNotifyAdapter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn render_text(alerts: &[AlertRecord]) -> String {
        if alerts.is_empty() {
            return "No fresh alerts.\n".to_string();
        }
        let mut out = String::new();
        for record in alerts {
            out.push_str(&format!(
                "{}: {} ({})\n",
                record.symbol,
                record.alert_type,
                format_date(record.timestamp)
            ));
            out.push_str(&format!(
                "  {:<10} {:>10} {:>10} {:>8}  {}\n",
                "date", "close", "macd", "rsi", "alert"
            ));
            for row in &record.snapshot {
                out.push_str(&format!(
                    "  {:<10} {:>10.2} {:>10} {:>8}  {}\n",
                    format_date(row.timestamp),
                    row.close,
                    cell(row.macd),
                    cell(row.rsi),
                    row.alert_type
                ));
            }
            out.push('\n');
        }
        out
    }

    fn render_json(alerts: &[AlertRecord]) -> Result<String, StockwatchError> {
        serde_json::to_string_pretty(&serde_json::json!({ "alerts": alerts }))
            .map_err(|e| StockwatchError::Encode {
                reason: e.to_string(),
            })
    }
}

impl NotifyPort for ConsoleNotifyAdapter {
    fn notify(&self, alerts: &[AlertRecord]) -> Result<(), StockwatchError> {
        if self.json {
            println!("{}", Self::render_json(alerts)?);
        } else {
            print!("{}", Self::render_text(alerts));
        }
        Ok(())
    }
}

fn format_date(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => timestamp.to_string(),
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}
