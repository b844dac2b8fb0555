//! Alert delivery port trait.

use crate::domain::error::StockwatchError;
use crate::domain::instrument::AlertRecord;

/// Port for handing fresh alerts to whoever wants them.
pub trait NotifyPort {
    fn notify(&self, alerts: &[AlertRecord]) -> Result<(), StockwatchError>;
}
