//! Output assembly: joins the selection with user-supplied prices.

use crate::domain::error::StockCheckError;
use crate::domain::numeric::{round_pct, round_price};
use crate::domain::output::{PriceMap, RankedResult};
use crate::domain::ranking::{RankedEntry, Selection};

/// Build one result row per selected entry, ranked 1.. in selection order.
///
/// Every selected ticker needs a positive, finite price. Prices are never
/// looked up anywhere but `prices`.
pub fn assemble(
    selection: &Selection<'_>,
    prices: &PriceMap,
) -> Result<Vec<RankedResult>, StockCheckError> {
    selection
        .iter()
        .enumerate()
        .map(|(idx, ranked)| build_row(idx + 1, ranked, prices))
        .collect()
}

fn build_row(
    rank: usize,
    ranked: &RankedEntry<'_>,
    prices: &PriceMap,
) -> Result<RankedResult, StockCheckError> {
    let current_price = lookup_price(&ranked.ticker, prices)?;
    let growth = round_pct(ranked.growth_pct());
    let entry = ranked.entry;

    Ok(RankedResult {
        rank,
        ticker: ranked.ticker.clone(),
        company_name: entry.company_name.clone(),
        sector: entry.sector.clone(),
        current_price: round_price(current_price),
        predicted_price: round_price(current_price * (1.0 + growth / 100.0)),
        predicted_growth_pct: growth,
        three_month: round_pct(entry.returns.three_month),
        six_month: round_pct(entry.returns.six_month),
        twelve_month: round_pct(entry.returns.twelve_month),
    })
}

fn lookup_price(ticker: &str, prices: &PriceMap) -> Result<f64, StockCheckError> {
    match prices.get(ticker) {
        Some(&p) if p.is_finite() && p > 0.0 => Ok(p),
        _ => Err(StockCheckError::MissingPrice {
            ticker: ticker.to_string(),
        }),
    }
}
