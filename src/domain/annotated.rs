//! The indicator-annotated view of a bar series.
//!
//! One column per indicator, row-aligned with the source bars. Columns hold
//! `Option<f64>` because every indicator has a warmup stretch with no value;
//! rules and reports must treat `None` as "not computable yet", never as
//! zero.

use serde::Serialize;

use crate::domain::alert::AlertType;
use crate::domain::indicator::supertrend::{SupertrendSeries, TrendDirection};

#[derive(Debug, Clone)]
pub struct AnnotatedSeries {
    pub timestamps: Vec<i64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub isa_9: Vec<Option<f64>>,
    pub isb_26: Vec<Option<f64>>,
    pub ema: Vec<Option<f64>>,
    pub sma20: Vec<Option<f64>>,
    pub sma50: Vec<Option<f64>>,
    pub supertrend: [SupertrendSeries; 3],
    pub alert_type: Vec<Option<AlertType>>,
}

/// One row of the annotated table, in serializable form. Span columns keep
/// the names downstream consumers already grep for.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRow {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
    pub rsi: Option<f64>,
    #[serde(rename = "ISA_9")]
    pub isa_9: Option<f64>,
    #[serde(rename = "ISB_26")]
    pub isb_26: Option<f64>,
    pub ema: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub supertrend: Vec<SupertrendCell>,
    pub alert_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupertrendCell {
    pub period: usize,
    pub multiplier: f64,
    pub value: Option<f64>,
    pub direction: Option<i8>,
}

impl AnnotatedSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn row(&self, index: usize) -> AnnotatedRow {
        AnnotatedRow {
            timestamp: self.timestamps[index],
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
            macd: self.macd[index],
            signal: self.signal[index],
            histogram: self.histogram[index],
            rsi: self.rsi[index],
            isa_9: self.isa_9[index],
            isb_26: self.isb_26[index],
            ema: self.ema[index],
            sma20: self.sma20[index],
            sma50: self.sma50[index],
            supertrend: self
                .supertrend
                .iter()
                .map(|st| SupertrendCell {
                    period: st.period,
                    multiplier: st.multiplier,
                    value: st.values[index],
                    direction: st.directions[index].map(TrendDirection::sign),
                })
                .collect(),
            alert_type: self.alert_type[index]
                .map(|alert| alert.label().to_string())
                .unwrap_or_default(),
        }
    }

    /// The last `rows` rows, oldest first.
    pub fn snapshot(&self, rows: usize) -> Vec<AnnotatedRow> {
        let start = self.len().saturating_sub(rows);
        (start..self.len()).map(|i| self.row(i)).collect()
    }

    /// A row only counts for reporting once every indicator has warmed up.
    pub fn row_fully_defined(&self, index: usize) -> bool {
        let columns = [
            &self.macd,
            &self.signal,
            &self.histogram,
            &self.rsi,
            &self.isa_9,
            &self.isb_26,
            &self.ema,
            &self.sma20,
            &self.sma50,
        ];
        if columns.iter().any(|column| column[index].is_none()) {
            return false;
        }
        self.supertrend
            .iter()
            .all(|st| st.values[index].is_some() && st.directions[index].is_some())
    }

    /// Indices of labeled rows with a full indicator set, the view handed to
    /// collaborators. Labeled warmup rows are dropped, not defaulted.
    pub fn alerted_indices(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.alert_type[i].is_some() && self.row_fully_defined(i))
            .collect()
    }

    pub fn latest_alert(&self) -> Option<(i64, AlertType)> {
        (0..self.len())
            .rev()
            .find(|&i| self.alert_type[i].is_some() && self.row_fully_defined(i))
            .and_then(|i| self.alert_type[i].map(|alert| (self.timestamps[i], alert)))
    }
}
