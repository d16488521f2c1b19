//! Ranking engine: full-universe sort, top-N selection and the
//! required-ticker append.

use crate::domain::engine_config::EngineConfig;
use crate::domain::error::StockCheckError;
use crate::domain::factor_model::FactorModel;
use crate::domain::universe::{resolve_growth, ResolvedGrowth, UniverseEntry};
use std::cmp::Ordering;
use tracing::debug;

/// A universe entry with its resolved growth and normalized ticker.
#[derive(Debug, Clone)]
pub struct RankedEntry<'u> {
    pub entry: &'u UniverseEntry,
    pub ticker: String,
    pub growth: ResolvedGrowth,
}

impl RankedEntry<'_> {
    pub fn growth_pct(&self) -> f64 {
        self.growth.growth_pct()
    }
}

/// The rows that go into the output, in output order.
#[derive(Debug, Clone)]
pub struct Selection<'u> {
    pub primary: Vec<RankedEntry<'u>>,
    pub appended: Option<RankedEntry<'u>>,
}

impl<'u> Selection<'u> {
    /// Primary rows first, then the appended row if any.
    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry<'u>> {
        self.primary.iter().chain(self.appended.iter())
    }

    pub fn len(&self) -> usize {
        self.primary.len() + usize::from(self.appended.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tickers(&self) -> Vec<String> {
        self.iter().map(|r| r.ticker.clone()).collect()
    }
}

/// Growth descending, then upper-cased ticker ascending.
pub fn compare_growth_then_ticker(
    a_growth: f64,
    a_ticker: &str,
    b_growth: f64,
    b_ticker: &str,
) -> Ordering {
    b_growth
        .partial_cmp(&a_growth)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a_ticker.cmp(b_ticker))
}

/// Resolve growth for every entry and sort the whole universe.
pub fn rank_universe<'u>(
    universe: &'u [UniverseEntry],
    model: &FactorModel<'_>,
    min_universe_size: usize,
) -> Result<Vec<RankedEntry<'u>>, StockCheckError> {
    if universe.len() < min_universe_size {
        return Err(StockCheckError::InsufficientUniverse {
            size: universe.len(),
            minimum: min_universe_size,
        });
    }

    let mut ranked = Vec::with_capacity(universe.len());
    for (position, entry) in universe.iter().enumerate() {
        entry.check_fields(position)?;
        let growth = resolve_growth(entry, model)?;
        ranked.push(RankedEntry {
            entry,
            ticker: entry.ticker_key(),
            growth,
        });
    }

    ranked.sort_by(|a, b| {
        compare_growth_then_ticker(a.growth_pct(), &a.ticker, b.growth_pct(), &b.ticker)
    });

    debug!(
        universe = ranked.len(),
        computed = ranked.iter().filter(|r| r.growth.is_computed()).count(),
        "universe ranked"
    );
    Ok(ranked)
}

/// Take the top `top_n` and append `required_ticker` when it is not
/// among them.
pub fn select<'u>(
    ranked: &[RankedEntry<'u>],
    top_n: usize,
    required_ticker: &str,
) -> Result<Selection<'u>, StockCheckError> {
    let required = required_ticker.trim().to_uppercase();
    let primary: Vec<RankedEntry<'u>> = ranked.iter().take(top_n).cloned().collect();

    let appended = if primary.iter().any(|r| r.ticker == required) {
        None
    } else {
        let position = ranked
            .iter()
            .position(|r| r.ticker == required)
            .ok_or_else(|| StockCheckError::RequiredTickerMissing {
                ticker: required.clone(),
            })?;
        debug!(ticker = %required, universe_rank = position + 1, "required ticker appended");
        Some(ranked[position].clone())
    };

    Ok(Selection { primary, appended })
}

/// Rank the universe and produce the output selection.
pub fn rank<'u>(
    universe: &'u [UniverseEntry],
    model: &FactorModel<'_>,
    config: &EngineConfig,
) -> Result<Selection<'u>, StockCheckError> {
    let ranked = rank_universe(universe, model, config.min_universe_size)?;
    select(&ranked, config.top_n, &config.required_ticker)
}
