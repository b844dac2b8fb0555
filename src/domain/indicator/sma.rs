//! Simple Moving Average.
//!
//! Rolling mean over a fixed window. A window narrower than its length
//! yields no value, so the first (n-1) entries are empty.

pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut window_sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(window_sum / period as f64);

    for i in period..values.len() {
        window_sum += values[i] - values[i - period];
        out[i] = Some(window_sum / period as f64);
    }

    out
}
