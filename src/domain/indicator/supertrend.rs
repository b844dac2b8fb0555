//! Supertrend, an ATR band that flips between tracking below and above price.
//!
//! Bands are centred on the hl2 midpoint at `multiplier` ATRs. The close is
//! compared against the previous row's final bands: above the upper band
//! flips the trend up, below the lower band flips it down, otherwise the
//! trend persists and the active band ratchets (it may tighten toward price
//! but never widen away from it). The reported value is the lower band while
//! the trend is up and the upper band while it is down.

use crate::domain::bar::Bar;
use crate::domain::indicator_helpers::calc_atr;

pub const DEFAULT_CONFIGS: [(usize, f64); 3] = [(10, 1.0), (11, 2.0), (12, 3.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// +1 for up, -1 for down, the usual wire encoding.
    pub fn sign(self) -> i8 {
        match self {
            TrendDirection::Up => 1,
            TrendDirection::Down => -1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SupertrendSeries {
    pub period: usize,
    pub multiplier: f64,
    pub values: Vec<Option<f64>>,
    pub directions: Vec<Option<TrendDirection>>,
}

impl SupertrendSeries {
    pub fn value_column(&self) -> String {
        format!("SUPERT_{}_{:?}", self.period, self.multiplier)
    }

    pub fn direction_column(&self) -> String {
        format!("SUPERTd_{}_{:?}", self.period, self.multiplier)
    }
}

pub fn calculate_supertrend(bars: &[Bar], period: usize, multiplier: f64) -> SupertrendSeries {
    let len = bars.len();
    let mut values: Vec<Option<f64>> = vec![None; len];
    let mut directions: Vec<Option<TrendDirection>> = vec![None; len];

    if period == 0 || len <= period {
        return SupertrendSeries { period, multiplier, values, directions };
    }

    let atr = calc_atr(bars, period);
    let mut upper: Vec<Option<f64>> = vec![None; len];
    let mut lower: Vec<Option<f64>> = vec![None; len];
    for i in 0..len {
        if let Some(range) = atr[i] {
            let basis = bars[i].hl2();
            upper[i] = Some(basis + multiplier * range);
            lower[i] = Some(basis - multiplier * range);
        }
    }

    // The first defined row has no previous band to compare against and
    // starts the series trending up.
    let mut direction = TrendDirection::Up;
    for i in period..len {
        let close = bars[i].close;
        match (upper[i - 1], lower[i - 1]) {
            (Some(prev_upper), _) if close > prev_upper => direction = TrendDirection::Up,
            (_, Some(prev_lower)) if close < prev_lower => direction = TrendDirection::Down,
            (Some(prev_upper), Some(prev_lower)) => match direction {
                TrendDirection::Up => {
                    if lower[i].is_some_and(|band| band < prev_lower) {
                        lower[i] = Some(prev_lower);
                    }
                }
                TrendDirection::Down => {
                    if upper[i].is_some_and(|band| band > prev_upper) {
                        upper[i] = Some(prev_upper);
                    }
                }
            },
            _ => {}
        }

        directions[i] = Some(direction);
        values[i] = match direction {
            TrendDirection::Up => lower[i],
            TrendDirection::Down => upper[i],
        };
    }

    SupertrendSeries { period, multiplier, values, directions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bar(day: i64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            timestamp: day * 86_400,
            open: close,
            high,
            low,
            close,
            volume: 1000.0,
        }
    }

    /// Unit-wide bars around the close so hl2 == close and the true range is
    /// 2.0 whenever the close moves less than a point.
    fn band_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar(i as i64 + 1, c + 1.0, c - 1.0, c))
            .collect()
    }

    #[test]
    fn undefined_until_period_bars_seen() {
        let bars = band_bars(&[10.0, 10.5, 11.0, 11.5]);
        let st = calculate_supertrend(&bars, 2, 1.0);

        assert!(st.values[0].is_none());
        assert!(st.directions[1].is_none());
        assert!(st.values[2].is_some());
        assert_eq!(st.directions[2], Some(TrendDirection::Up));
    }

    #[test]
    fn flips_and_tracks_the_active_band() {
        let closes = [10.0, 10.5, 11.0, 11.5, 6.0, 5.8, 5.6, 12.0];
        let st = calculate_supertrend(&band_bars(&closes), 2, 1.0);

        // rising closes hold the up trend with the lower band below price
        assert_eq!(st.directions[3], Some(TrendDirection::Up));
        assert_relative_eq!(st.values[3].unwrap(), 9.5);

        // the drop to 6.0 breaks the previous lower band (9.5)
        assert_eq!(st.directions[4], Some(TrendDirection::Down));
        assert_relative_eq!(st.values[4].unwrap(), 10.25);

        // down trend persists while the close stays inside the bands
        assert_eq!(st.directions[6], Some(TrendDirection::Down));
        assert_relative_eq!(st.values[6].unwrap(), 8.1625);

        // the surge to 12.0 clears the previous upper band and flips up
        assert_eq!(st.directions[7], Some(TrendDirection::Up));
        assert_relative_eq!(st.values[7].unwrap(), 7.01875);
    }

    #[test]
    fn lower_band_never_widens_while_trend_holds() {
        // flat closes with a volatility burst at row 3: the raw lower band
        // would drop from 8.0 to 6.0 but must hold at 8.0
        let bars = vec![
            bar(1, 11.0, 9.0, 10.0),
            bar(2, 11.0, 9.0, 10.0),
            bar(3, 11.0, 9.0, 10.0),
            bar(4, 13.0, 7.0, 10.0),
        ];
        let st = calculate_supertrend(&bars, 2, 1.0);

        assert_eq!(st.directions[3], Some(TrendDirection::Up));
        assert_relative_eq!(st.values[2].unwrap(), 8.0);
        assert_relative_eq!(st.values[3].unwrap(), 8.0);
    }

    #[test]
    fn direction_signs() {
        assert_eq!(TrendDirection::Up.sign(), 1);
        assert_eq!(TrendDirection::Down.sign(), -1);
    }

    #[test]
    fn column_names_keep_the_decimal_point() {
        let st = calculate_supertrend(&band_bars(&[10.0, 10.5, 11.0]), 10, 1.0);
        assert_eq!(st.value_column(), "SUPERT_10_1.0");
        assert_eq!(st.direction_column(), "SUPERTd_10_1.0");

        let st = calculate_supertrend(&band_bars(&[10.0, 10.5, 11.0]), 12, 3.0);
        assert_eq!(st.direction_column(), "SUPERTd_12_3.0");
    }

    #[test]
    fn insufficient_history() {
        let bars = band_bars(&[10.0, 10.5]);
        let st = calculate_supertrend(&bars, 10, 1.0);
        assert!(st.values.iter().all(|v| v.is_none()));
        assert!(st.directions.iter().all(|d| d.is_none()));

        let st = calculate_supertrend(&bars, 0, 1.0);
        assert!(st.values.iter().all(|v| v.is_none()));
    }
}
