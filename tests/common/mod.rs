#![allow(dead_code)]

use std::collections::HashMap;
use stockwatch::domain::bar::Bar;
use stockwatch::domain::error::StockwatchError;
use stockwatch::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, StockwatchError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockwatchError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) => Ok(bars.clone()),
            None => Err(StockwatchError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no bars registered".to_string(),
            }),
        }
    }
}

/// 2023-01-02 00:00 UTC, a Monday. Daily bars count forward from here.
pub const BASE_TS: i64 = 1_672_617_600;

pub fn make_bar(timestamp: i64, close: f64) -> Bar {
    Bar {
        timestamp,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000.0,
    }
}

pub fn generate_bars(count: usize, start_price: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| make_bar(BASE_TS + i as i64 * 86_400, start_price + i as f64 * 0.5))
        .collect()
}

/// A long steady decline with a sharp final-bar rally. Every supertrend
/// config flips down during the slide and back up on the last bar, which
/// trips the supertrend rules at full default warmup.
pub fn decline_then_spike(count: usize) -> Vec<Bar> {
    let mut bars: Vec<Bar> = (0..count)
        .map(|i| make_bar(BASE_TS + i as i64 * 86_400, 200.0 - i as f64 * 0.5))
        .collect();
    if let Some(last) = bars.last_mut() {
        let close = last.close + 20.0;
        last.open = close - 1.0;
        last.high = close + 1.0;
        last.low = last.close - 1.0;
        last.close = close;
    }
    bars
}
