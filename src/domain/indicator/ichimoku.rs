//! Ichimoku leading spans.
//!
//! conversion = midpoint(9), base = midpoint(26), where midpoint(w) is
//! (highest high + lowest low) / 2 over the trailing window w.
//! Span A = (conversion + base) / 2, Span B = midpoint(52), and both spans
//! are plotted `base` bars ahead: the value at row i was computed from the
//! window ending at row i - base.

use crate::domain::bar::Bar;

pub const DEFAULT_CONVERSION: usize = 9;
pub const DEFAULT_BASE: usize = 26;
pub const DEFAULT_SPAN_B: usize = 52;

#[derive(Debug, Clone)]
pub struct IchimokuSpans {
    pub span_a: Vec<Option<f64>>,
    pub span_b: Vec<Option<f64>>,
}

pub fn calculate_ichimoku(
    bars: &[Bar],
    conversion: usize,
    base: usize,
    span_b: usize,
) -> IchimokuSpans {
    let len = bars.len();
    let conversion_line = window_midpoint(bars, conversion);
    let base_line = window_midpoint(bars, base);
    let raw_b = window_midpoint(bars, span_b);

    let mut raw_a: Vec<Option<f64>> = vec![None; len];
    for i in 0..len {
        if let (Some(c), Some(b)) = (conversion_line[i], base_line[i]) {
            raw_a[i] = Some((c + b) / 2.0);
        }
    }

    IchimokuSpans {
        span_a: shift_forward(&raw_a, base),
        span_b: shift_forward(&raw_b, base),
    }
}

/// (highest high + lowest low) / 2 over the trailing window; no value until
/// the window is full.
fn window_midpoint(bars: &[Bar], window: usize) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = vec![None; bars.len()];
    if window == 0 || bars.len() < window {
        return out;
    }

    for i in (window - 1)..bars.len() {
        let slice = &bars[i + 1 - window..=i];
        let highest = slice.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let lowest = slice.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        out[i] = Some((highest + lowest) / 2.0);
    }

    out
}

fn shift_forward(values: &[Option<f64>], offset: usize) -> Vec<Option<f64>> {
    let mut out: Vec<Option<f64>> = vec![None; values.len()];
    for i in offset..values.len() {
        out[i] = values[i - offset];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(day: i64, high: f64, low: f64) -> Bar {
        Bar {
            timestamp: day * 86_400,
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
            volume: 1000.0,
        }
    }

    fn ramp_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| make_bar(i as i64 + 1, 110.0 + i as f64, 90.0 + i as f64))
            .collect()
    }

    #[test]
    fn midpoint_over_window() {
        let bars = vec![
            make_bar(1, 110.0, 90.0),
            make_bar(2, 120.0, 100.0),
            make_bar(3, 115.0, 95.0),
        ];

        let mid = window_midpoint(&bars, 3);
        assert!(mid[0].is_none());
        assert!(mid[1].is_none());
        // highest 120, lowest 90
        assert!((mid[2].unwrap() - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_warmup_indices() {
        let bars = ramp_bars(120);
        let spans = calculate_ichimoku(&bars, 9, 26, 52);

        // raw span A defined from 25, shifted 26 forward → 51
        assert!(spans.span_a[50].is_none());
        assert!(spans.span_a[51].is_some());

        // raw span B defined from 51, shifted 26 forward → 77
        assert!(spans.span_b[76].is_none());
        assert!(spans.span_b[77].is_some());
    }

    #[test]
    fn spans_are_shifted_by_base_period() {
        let bars = ramp_bars(30);
        let spans = calculate_ichimoku(&bars, 2, 3, 4);

        let conversion = window_midpoint(&bars, 2);
        let base_line = window_midpoint(&bars, 3);
        let raw_b = window_midpoint(&bars, 4);

        for i in 3..bars.len() {
            match (conversion[i - 3], base_line[i - 3]) {
                (Some(c), Some(b)) => {
                    assert!((spans.span_a[i].unwrap() - (c + b) / 2.0).abs() < 1e-9);
                }
                _ => assert!(spans.span_a[i].is_none()),
            }
            assert_eq!(spans.span_b[i], raw_b[i - 3]);
        }
        for i in 0..3 {
            assert!(spans.span_a[i].is_none());
            assert!(spans.span_b[i].is_none());
        }
    }

    #[test]
    fn empty_bars() {
        let spans = calculate_ichimoku(&[], 9, 26, 52);
        assert!(spans.span_a.is_empty());
        assert!(spans.span_b.is_empty());
    }

    #[test]
    fn series_shorter_than_lookback() {
        let bars = ramp_bars(40);
        let spans = calculate_ichimoku(&bars, 9, 26, 52);
        assert!(spans.span_b.iter().all(|v| v.is_none()));
    }
}
