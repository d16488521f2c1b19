//! Data access port trait.
//!
//! Implementations hand the engine a complete universe and a complete
//! price map. They must not invent values for anything they cannot read.

use crate::domain::error::StockCheckError;
use crate::domain::output::PriceMap;
use crate::domain::universe::UniverseEntry;

pub trait DataPort {
    fn load_universe(&self) -> Result<Vec<UniverseEntry>, StockCheckError>;

    /// Prices keyed by upper-cased ticker.
    fn load_prices(&self) -> Result<PriceMap, StockCheckError>;
}
