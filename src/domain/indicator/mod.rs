//! Indicator computation over a bar series.
//!
//! `compute` runs every indicator the alert rules consume and assembles the
//! annotated table. Indicators are independent: none reads another's output,
//! and a row without enough trailing history carries `None` in that column.

pub mod ema;
pub mod ichimoku;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod supertrend;

use crate::domain::annotated::AnnotatedSeries;
use crate::domain::bar::BarSeries;

pub const DEFAULT_EMA_PERIOD: usize = 200;
pub const DEFAULT_SMA_SHORT: usize = 20;
pub const DEFAULT_SMA_LONG: usize = 50;

/// Parameters for one pipeline run. Alternate values are passed in here;
/// nothing is read from the environment.
#[derive(Debug, Clone)]
pub struct IndicatorParams {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub ichimoku_conversion: usize,
    pub ichimoku_base: usize,
    pub ichimoku_span_b: usize,
    pub ema_period: usize,
    pub sma_short: usize,
    pub sma_long: usize,
    pub supertrend: [(usize, f64); 3],
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            rsi_period: rsi::DEFAULT_PERIOD,
            ichimoku_conversion: ichimoku::DEFAULT_CONVERSION,
            ichimoku_base: ichimoku::DEFAULT_BASE,
            ichimoku_span_b: ichimoku::DEFAULT_SPAN_B,
            ema_period: DEFAULT_EMA_PERIOD,
            sma_short: DEFAULT_SMA_SHORT,
            sma_long: DEFAULT_SMA_LONG,
            supertrend: supertrend::DEFAULT_CONFIGS,
        }
    }
}

/// Bar series in, annotated table out. An empty series yields an empty table
/// with no error, and the `alert_type` column starts blank.
pub fn compute(series: &BarSeries, params: &IndicatorParams) -> AnnotatedSeries {
    let bars = series.bars();
    let closes = series.closes();

    let macd =
        macd::calculate_macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
    let rsi = rsi::calculate_rsi(&closes, params.rsi_period);
    let spans = ichimoku::calculate_ichimoku(
        bars,
        params.ichimoku_conversion,
        params.ichimoku_base,
        params.ichimoku_span_b,
    );
    let supertrend = params
        .supertrend
        .map(|(period, multiplier)| supertrend::calculate_supertrend(bars, period, multiplier));

    AnnotatedSeries {
        timestamps: bars.iter().map(|bar| bar.timestamp).collect(),
        open: bars.iter().map(|bar| bar.open).collect(),
        high: bars.iter().map(|bar| bar.high).collect(),
        low: bars.iter().map(|bar| bar.low).collect(),
        close: bars.iter().map(|bar| bar.close).collect(),
        volume: bars.iter().map(|bar| bar.volume).collect(),
        macd: macd.macd,
        signal: macd.signal,
        histogram: macd.histogram,
        rsi,
        isa_9: spans.span_a,
        isb_26: spans.span_b,
        ema: ema::calculate_ema(&closes, params.ema_period),
        sma20: sma::calculate_sma(&closes, params.sma_short),
        sma50: sma::calculate_sma(&closes, params.sma_long),
        supertrend,
        alert_type: vec![None; bars.len()],
    }
}
