//! Shared helper functions for indicator calculations.

use crate::domain::bar::Bar;

/// Wilder-smoothed Average True Range.
///
/// The first bar has no previous close, so its true range never enters the
/// calculation: the seed is the simple average of the true ranges of bars
/// 1..=period, placed at index `period`, and the Wilder recursion
/// `atr = (prev * (period - 1) + tr) / period` follows. Indices before
/// `period` carry no value.
pub fn calc_atr(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let mut atr: Vec<Option<f64>> = vec![None; bars.len()];
    if period == 0 || bars.len() <= period {
        return atr;
    }

    let mut tr = vec![0.0; bars.len()];
    for i in 1..bars.len() {
        tr[i] = bars[i].true_range(bars[i - 1].close);
    }

    let seed = tr[1..=period].iter().sum::<f64>() / period as f64;
    atr[period] = Some(seed);
    let mut prev = seed;
    for i in (period + 1)..bars.len() {
        let value = (prev * (period - 1) as f64 + tr[i]) / period as f64;
        atr[i] = Some(value);
        prev = value;
    }

    atr
}
