#![allow(dead_code)]

use std::collections::BTreeMap;
use stockcheck::domain::error::StockCheckError;
use stockcheck::domain::factor_model::{FactorInputs, FACTORS_43};
use stockcheck::domain::output::PriceMap;
use stockcheck::domain::stock_check::StockCheckInput;
use stockcheck::domain::universe::{TrailingReturns, UniverseEntry};
use stockcheck::ports::data_port::DataPort;

pub struct MockDataPort {
    pub universe: Vec<UniverseEntry>,
    pub prices: PriceMap,
    pub universe_error: Option<String>,
}

impl MockDataPort {
    pub fn new(universe: Vec<UniverseEntry>) -> Self {
        let prices = flat_prices(&universe, 100.0);
        Self {
            universe,
            prices,
            universe_error: None,
        }
    }

    pub fn with_prices(mut self, prices: PriceMap) -> Self {
        self.prices = prices;
        self
    }

    pub fn with_universe_error(mut self, reason: &str) -> Self {
        self.universe_error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_universe(&self) -> Result<Vec<UniverseEntry>, StockCheckError> {
        if let Some(reason) = &self.universe_error {
            return Err(StockCheckError::DataParse {
                file: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(self.universe.clone())
    }

    fn load_prices(&self) -> Result<PriceMap, StockCheckError> {
        Ok(self.prices.clone())
    }
}

pub fn returns() -> TrailingReturns {
    TrailingReturns {
        three_month: 1.5,
        six_month: 3.0,
        twelve_month: 6.0,
    }
}

pub fn entry(ticker: &str, sector: &str, growth: f64) -> UniverseEntry {
    UniverseEntry::with_growth(
        ticker,
        &format!("{ticker} Inc"),
        sector,
        growth,
        returns(),
    )
}

/// Sectors cycled across filler entries so no sector dominates by accident.
pub const FILLER_SECTORS: [&str; 5] = ["Energy", "Utilities", "Materials", "Financials", "Telecom"];

/// `count` filler entries `S000..` with growth strictly below `ceiling`,
/// descending in 0.001 steps.
pub fn filler(count: usize, ceiling: f64) -> Vec<UniverseEntry> {
    (0..count)
        .map(|i| {
            entry(
                &format!("S{i:03}"),
                FILLER_SECTORS[i % FILLER_SECTORS.len()],
                ceiling - 0.001 * (i as f64 + 1.0),
            )
        })
        .collect()
}

/// Universe whose top ten carry exactly `top` (ticker, sector, growth),
/// plus `INTC` at `intc_growth` and filler to reach `size`.
pub fn universe_with_top(
    top: &[(&str, &str, f64)],
    intc_growth: f64,
    size: usize,
) -> Vec<UniverseEntry> {
    let floor = top
        .iter()
        .map(|(_, _, g)| *g)
        .fold(f64::INFINITY, f64::min)
        .min(intc_growth);
    let mut universe: Vec<UniverseEntry> = top
        .iter()
        .map(|(t, s, g)| entry(t, s, *g))
        .collect();
    universe.push(entry("INTC", "Tech", intc_growth));
    let remaining = size.saturating_sub(universe.len());
    universe.extend(filler(remaining, floor));
    universe
}

pub fn flat_prices(universe: &[UniverseEntry], price: f64) -> PriceMap {
    universe.iter().map(|e| (e.ticker_key(), price)).collect()
}

/// Factor inputs with every factor set to `raw`.
pub fn uniform_factors(raw: f64) -> FactorInputs {
    FACTORS_43
        .iter()
        .map(|f| (f.id.to_string(), raw))
        .collect::<BTreeMap<_, _>>()
}

pub fn input(universe: Vec<UniverseEntry>, manual_override: bool) -> StockCheckInput {
    let prices = flat_prices(&universe, 100.0);
    StockCheckInput {
        current_date: "2026-02-14".into(),
        prediction_date: "2026-02-15".into(),
        universe,
        prices,
        manual_override,
    }
}
