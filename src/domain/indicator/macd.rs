//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! The line is defined once the slow EMA is (slow - 1 bars in), the signal
//! and histogram a further (signal - 1) bars later.

use crate::domain::indicator::ema::calculate_ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let len = closes.len();
    let mut series = MacdSeries {
        macd: vec![None; len],
        signal: vec![None; len],
        histogram: vec![None; len],
    };
    if fast == 0 || slow == 0 || signal_period == 0 {
        return series;
    }

    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    for i in 0..len {
        if let (Some(f), Some(s)) = (ema_fast[i], ema_slow[i]) {
            series.macd[i] = Some(f - s);
        }
    }

    let line_start = match series.macd.iter().position(|v| v.is_some()) {
        Some(i) => i,
        None => return series,
    };

    // Seed the signal EMA with the SMA of the first signal_period line values.
    if line_start + signal_period > len {
        return series;
    }
    let k = 2.0 / (signal_period as f64 + 1.0);
    let mut sum = 0.0;
    for value in series.macd[line_start..line_start + signal_period].iter() {
        sum += value.unwrap_or(0.0);
    }
    let mut signal_ema = sum / signal_period as f64;
    series.signal[line_start + signal_period - 1] = Some(signal_ema);

    for i in (line_start + signal_period)..len {
        if let Some(line) = series.macd[i] {
            signal_ema = line * k + signal_ema * (1.0 - k);
            series.signal[i] = Some(signal_ema);
        }
    }

    for i in 0..len {
        if let (Some(line), Some(signal)) = (series.macd[i], series.signal[i]) {
            series.histogram[i] = Some(line - signal);
        }
    }

    series
}

pub fn calculate_macd_default(closes: &[f64]) -> MacdSeries {
    calculate_macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
