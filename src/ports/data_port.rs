//! Data access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::StockwatchError;

pub trait DataPort {
    /// Full available history for one symbol, deduplicated by timestamp and
    /// sorted ascending.
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, StockwatchError>;
}
