//! CSV persistence adapter.
//!
//! Concatenates the full annotated table of every alerted instrument into
//! one CSV document, symbol column first. Undefined indicator cells are left
//! empty, never written as zero.

use crate::domain::error::StockwatchError;
use crate::domain::instrument::Instrument;
use crate::ports::store_port::StorePort;

pub struct CsvStoreAdapter;

impl StorePort for CsvStoreAdapter {
    fn save_annotated(
        &self,
        instruments: &[Instrument],
        output_path: &str,
    ) -> Result<(), StockwatchError> {
        let first = match instruments.first() {
            Some(instrument) => instrument,
            None => return Ok(()),
        };

        let store_err = |e: &dyn std::fmt::Display| StockwatchError::Store {
            path: output_path.to_string(),
            reason: e.to_string(),
        };

        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| store_err(&e))?;

        let mut header = vec![
            "symbol".to_string(),
            "timestamp".to_string(),
            "open".to_string(),
            "high".to_string(),
            "low".to_string(),
            "close".to_string(),
            "volume".to_string(),
            "macd".to_string(),
            "signal".to_string(),
            "histogram".to_string(),
            "rsi".to_string(),
            "ISA_9".to_string(),
            "ISB_26".to_string(),
            "ema".to_string(),
            "sma20".to_string(),
            "sma50".to_string(),
        ];
        for st in &first.annotated().supertrend {
            header.push(st.value_column());
            header.push(st.direction_column());
        }
        header.push("alert_type".to_string());
        wtr.write_record(&header).map_err(|e| store_err(&e))?;

        for instrument in instruments {
            let table = instrument.annotated();
            for i in 0..table.len() {
                let mut row = vec![
                    instrument.symbol().to_string(),
                    table.timestamps[i].to_string(),
                    table.open[i].to_string(),
                    table.high[i].to_string(),
                    table.low[i].to_string(),
                    table.close[i].to_string(),
                    table.volume[i].to_string(),
                    format_opt(table.macd[i]),
                    format_opt(table.signal[i]),
                    format_opt(table.histogram[i]),
                    format_opt(table.rsi[i]),
                    format_opt(table.isa_9[i]),
                    format_opt(table.isb_26[i]),
                    format_opt(table.ema[i]),
                    format_opt(table.sma20[i]),
                    format_opt(table.sma50[i]),
                ];
                for st in &table.supertrend {
                    row.push(format_opt(st.values[i]));
                    row.push(
                        st.directions[i]
                            .map(|d| d.sign().to_string())
                            .unwrap_or_default(),
                    );
                }
                row.push(
                    table.alert_type[i]
                        .map(|a| a.label().to_string())
                        .unwrap_or_default(),
                );
                wtr.write_record(&row).map_err(|e| store_err(&e))?;
            }
        }

        wtr.flush().map_err(|e| store_err(&e))?;
        Ok(())
    }
}

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
