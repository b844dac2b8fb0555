//! Annotated-table persistence port trait.

use crate::domain::error::StockwatchError;
use crate::domain::instrument::Instrument;

/// Port for writing annotated tables somewhere durable.
pub trait StorePort {
    /// Persists the full annotated table of each instrument as one
    /// concatenated document at `output_path`.
    fn save_annotated(
        &self,
        instruments: &[Instrument],
        output_path: &str,
    ) -> Result<(), StockwatchError>;
}
