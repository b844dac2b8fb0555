//! OHLCV bar representation and series validation.

/// One OHLCV record. `timestamp` is epoch seconds and acts as the unique key
/// within a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// (high + low) / 2
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SeriesError {
    #[error("timestamps not strictly increasing at index {index}")]
    OutOfOrder { index: usize },

    #[error("non-finite {field} at index {index}")]
    NonFinite { index: usize, field: &'static str },
}

/// Ordered OHLCV series for one instrument. Timestamps are strictly
/// increasing and every field is finite; both are checked at construction
/// and relied on by every downstream computation.
#[derive(Debug, Clone)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for (i, bar) in bars.iter().enumerate() {
            let fields = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
                ("volume", bar.volume),
            ];
            for (field, value) in fields {
                if !value.is_finite() {
                    return Err(SeriesError::NonFinite { index: i, field });
                }
            }
            if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
                return Err(SeriesError::OutOfOrder { index: i });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
