//! Alert rule engine.
//!
//! Six rules run in a fixed order over the annotated table, each writing its
//! label into a per-row buffer. A later rule overwrites whatever an earlier
//! rule put on the same row: later rules are composite, higher-conviction
//! signals and take precedence. Every rule compares the current row against
//! the previous one and skips rows where a referenced column is undefined.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::domain::annotated::AnnotatedSeries;
use crate::domain::indicator::supertrend::TrendDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    MacdUp,
    MacdDown,
    RsiUp,
    RsiWatch,
    RsiSecure,
    SupertrendWatch,
    SupertrendUp,
    SupertrendDown,
    SupertrendIchimokuUp,
    SupertrendSma20Up,
}

impl AlertType {
    pub fn label(self) -> &'static str {
        match self {
            AlertType::MacdUp => "MACD UP",
            AlertType::MacdDown => "MACD DOWN",
            AlertType::RsiUp => "RSI UP",
            AlertType::RsiWatch => "RSI WATCH",
            AlertType::RsiSecure => "RSI SECURE",
            AlertType::SupertrendWatch => "Supertrend WATCH",
            AlertType::SupertrendUp => "Supertrend UP",
            AlertType::SupertrendDown => "Supertrend DOWN",
            AlertType::SupertrendIchimokuUp => "Supertrend + Ichimoku UP",
            AlertType::SupertrendSma20Up => "supertrend + sma20 UP",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for AlertType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

/// Recomputes the `alert_type` column from the indicator columns. Any labels
/// already present are discarded.
pub fn apply_alert_rules(series: &mut AnnotatedSeries) {
    let mut labels: Vec<Option<AlertType>> = vec![None; series.len()];

    apply_macd_cross(series, &mut labels);
    apply_rsi_levels(series, &mut labels);
    apply_supertrend_watch(series, &mut labels);
    apply_supertrend_consensus(series, &mut labels);
    apply_supertrend_ichimoku(series, &mut labels);
    apply_supertrend_sma20(series, &mut labels);

    series.alert_type = labels;
}

/// Rule 1: the histogram leaves non-positive territory upward or
/// non-negative territory downward.
fn apply_macd_cross(series: &AnnotatedSeries, labels: &mut [Option<AlertType>]) {
    for i in 1..series.len() {
        if let (Some(prev), Some(cur)) = (series.histogram[i - 1], series.histogram[i]) {
            if prev <= 0.0 && cur > 0.0 {
                labels[i] = Some(AlertType::MacdUp);
            } else if prev >= 0.0 && cur < 0.0 {
                labels[i] = Some(AlertType::MacdDown);
            }
        }
    }
}

/// Rule 2: strict crossings of the 30 and 70 levels. The sub-rules run in
/// order and overwrite each other, so a single bar jumping from below 30 to
/// above 70 ends up labeled "RSI WATCH".
fn apply_rsi_levels(series: &AnnotatedSeries, labels: &mut [Option<AlertType>]) {
    for i in 1..series.len() {
        if let (Some(prev), Some(cur)) = (series.rsi[i - 1], series.rsi[i]) {
            if prev < 30.0 && cur > 30.0 {
                labels[i] = Some(AlertType::RsiUp);
            }
            if prev < 70.0 && cur > 70.0 {
                labels[i] = Some(AlertType::RsiWatch);
            }
            if prev > 70.0 && cur < 70.0 {
                labels[i] = Some(AlertType::RsiSecure);
            }
        }
    }
}

/// Rule 3: any one of the three configurations flips from down to up.
fn apply_supertrend_watch(series: &AnnotatedSeries, labels: &mut [Option<AlertType>]) {
    for i in 1..series.len() {
        if any_flip_up(series, i) {
            labels[i] = Some(AlertType::SupertrendWatch);
        }
    }
}

/// Rule 4: all three configurations agree on the current bar and at least
/// one of them pointed the other way on the previous bar.
fn apply_supertrend_consensus(series: &AnnotatedSeries, labels: &mut [Option<AlertType>]) {
    for i in 1..series.len() {
        let all_up = series
            .supertrend
            .iter()
            .all(|st| st.directions[i] == Some(TrendDirection::Up));
        let any_prev_down = series
            .supertrend
            .iter()
            .any(|st| st.directions[i - 1] == Some(TrendDirection::Down));
        if all_up && any_prev_down {
            labels[i] = Some(AlertType::SupertrendUp);
            continue;
        }

        let all_down = series
            .supertrend
            .iter()
            .all(|st| st.directions[i] == Some(TrendDirection::Down));
        let any_prev_up = series
            .supertrend
            .iter()
            .any(|st| st.directions[i - 1] == Some(TrendDirection::Up));
        if all_down && any_prev_up {
            labels[i] = Some(AlertType::SupertrendDown);
        }
    }
}

/// Rule 5: both Ichimoku spans drop below the lowest of the three band
/// values after at least one of them sat above it on the previous bar.
fn apply_supertrend_ichimoku(series: &AnnotatedSeries, labels: &mut [Option<AlertType>]) {
    for i in 1..series.len() {
        let (floor, prev_floor) =
            match (supertrend_floor(series, i), supertrend_floor(series, i - 1)) {
                (Some(now), Some(prev)) => (now, prev),
                _ => continue,
            };
        let (span_a, span_b) = match (series.isa_9[i], series.isb_26[i]) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };

        let below_now = span_a < floor && span_b < floor;
        let above_before = series.isa_9[i - 1].is_some_and(|v| v > prev_floor)
            || series.isb_26[i - 1].is_some_and(|v| v > prev_floor);
        if below_now && above_before {
            labels[i] = Some(AlertType::SupertrendIchimokuUp);
        }
    }
}

/// Rule 6: the rule-3 trigger with the close above sma20.
fn apply_supertrend_sma20(series: &AnnotatedSeries, labels: &mut [Option<AlertType>]) {
    for i in 1..series.len() {
        if !any_flip_up(series, i) {
            continue;
        }
        if series.sma20[i].is_some_and(|sma| series.close[i] > sma) {
            labels[i] = Some(AlertType::SupertrendSma20Up);
        }
    }
}

fn any_flip_up(series: &AnnotatedSeries, index: usize) -> bool {
    series.supertrend.iter().any(|st| {
        st.directions[index] == Some(TrendDirection::Up)
            && st.directions[index - 1] == Some(TrendDirection::Down)
    })
}

/// Minimum of the three band values; None unless all three are defined.
fn supertrend_floor(series: &AnnotatedSeries, index: usize) -> Option<f64> {
    let [a, b, c] = &series.supertrend;
    match (a.values[index], b.values[index], c.values[index]) {
        (Some(x), Some(y), Some(z)) => Some(x.min(y).min(z)),
        _ => None,
    }
}
