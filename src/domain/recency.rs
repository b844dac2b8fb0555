//! Freshness window for the most recent alert.
//!
//! The window approximates "has a new session closed since the last check".
//! Session closes publish around 18:30 local time, so before that cutoff the
//! window reaches back one day (three on Mondays, which must clear the
//! weekend), and after it one day further.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

use crate::domain::annotated::AnnotatedSeries;

const SECONDS_PER_DAY: i64 = 86_400;

/// Calendar-aware lookback in days for a reference instant, evaluated in the
/// reference's own timezone.
pub fn lookback_days<Tz: TimeZone>(reference: &DateTime<Tz>) -> i64 {
    let before_close =
        reference.hour() < 18 || (reference.hour() == 18 && reference.minute() < 30);
    if reference.weekday() == Weekday::Mon {
        if before_close { 3 } else { 4 }
    } else if before_close {
        1
    } else {
        2
    }
}

/// True iff the latest alerted row falls inside the lookback window ending
/// at `reference`. A series without alerts is stale, not an error.
pub fn is_fresh<Tz: TimeZone>(series: &AnnotatedSeries, reference: &DateTime<Tz>) -> bool {
    let last_alert = match series.latest_alert() {
        Some((timestamp, _)) => timestamp,
        None => return false,
    };
    let threshold = reference.timestamp() - lookback_days(reference) * SECONDS_PER_DAY;
    last_alert > threshold
}
