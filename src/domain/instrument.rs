//! The per-symbol aggregate: one bar series plus the annotated table derived
//! from it.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::domain::alert::{AlertType, apply_alert_rules};
use crate::domain::annotated::{AnnotatedRow, AnnotatedSeries};
use crate::domain::bar::{Bar, BarSeries};
use crate::domain::error::StockwatchError;
use crate::domain::indicator::{self, IndicatorParams};
use crate::domain::recency;

#[derive(Debug, Clone)]
pub struct Instrument {
    symbol: String,
    bars: BarSeries,
    annotated: AnnotatedSeries,
}

/// What collaborators receive for a fresh alert: identity, the label, and a
/// short tail of the annotated table for context.
#[derive(Debug, Clone, Serialize)]
pub struct AlertRecord {
    pub symbol: String,
    pub timestamp: i64,
    pub alert_type: AlertType,
    pub snapshot: Vec<AnnotatedRow>,
}

impl Instrument {
    /// Validates the bars, runs the indicator pipeline and the rule engine.
    /// Each call recomputes from the full provided history.
    pub fn from_bars(
        symbol: &str,
        bars: Vec<Bar>,
        params: &IndicatorParams,
    ) -> Result<Self, StockwatchError> {
        let series = BarSeries::new(bars).map_err(|source| StockwatchError::InvalidSeries {
            symbol: symbol.to_string(),
            source,
        })?;
        let mut annotated = indicator::compute(&series, params);
        apply_alert_rules(&mut annotated);

        Ok(Instrument {
            symbol: symbol.to_string(),
            bars: series,
            annotated,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &BarSeries {
        &self.bars
    }

    pub fn annotated(&self) -> &AnnotatedSeries {
        &self.annotated
    }

    pub fn latest_alert(&self) -> Option<(i64, AlertType)> {
        self.annotated.latest_alert()
    }

    /// The alert record when the latest alert still falls inside the
    /// freshness window ending at `reference`, None otherwise.
    pub fn fresh_alert<Tz: TimeZone>(
        &self,
        reference: &DateTime<Tz>,
        snapshot_rows: usize,
    ) -> Option<AlertRecord> {
        if !recency::is_fresh(&self.annotated, reference) {
            return None;
        }
        let (timestamp, alert_type) = self.annotated.latest_alert()?;

        Some(AlertRecord {
            symbol: self.symbol.clone(),
            timestamp,
            alert_type,
            snapshot: self.annotated.snapshot(snapshot_rows),
        })
    }
}
