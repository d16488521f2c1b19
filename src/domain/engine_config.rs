//! Engine constants carried as an explicit value.

pub const MODEL_VERSION: &str = "Stock Check v1.0";
pub const MIN_UNIVERSE_SIZE: usize = 100;
pub const TOP_N: usize = 10;
pub const REQUIRED_TICKER: &str = "INTC";
pub const TRADE_MIN_AVERAGE: f64 = 0.50;
pub const TRADE_MIN_DISPERSION: f64 = 0.60;
pub const SECTOR_WARNING_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub model_version: String,
    pub min_universe_size: usize,
    pub top_n: usize,
    pub required_ticker: String,
    pub trade_min_average: f64,
    pub trade_min_dispersion: f64,
    pub sector_warning_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_version: MODEL_VERSION.to_string(),
            min_universe_size: MIN_UNIVERSE_SIZE,
            top_n: TOP_N,
            required_ticker: REQUIRED_TICKER.to_string(),
            trade_min_average: TRADE_MIN_AVERAGE,
            trade_min_dispersion: TRADE_MIN_DISPERSION,
            sector_warning_count: SECTOR_WARNING_COUNT,
        }
    }
}

impl EngineConfig {
    /// Upper-cased required ticker.
    pub fn required_key(&self) -> String {
        self.required_ticker.trim().to_uppercase()
    }
}
