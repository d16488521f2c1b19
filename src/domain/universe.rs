//! Universe entries and predicted-growth resolution.
//!
//! An entry carries its predicted 1-day growth either directly or as a
//! complete set of factor inputs. [`resolve_growth`] turns that into a
//! tagged [`ResolvedGrowth`] so the path a value took stays visible.

use crate::domain::error::StockCheckError;
use crate::domain::factor_model::{FactorInputs, FactorModel, GrowthEstimate};

/// Trailing total-return percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailingReturns {
    pub three_month: f64,
    pub six_month: f64,
    pub twelve_month: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniverseEntry {
    pub ticker: String,
    pub company_name: String,
    pub sector: String,
    pub returns: TrailingReturns,
    pub predicted_growth_pct: Option<f64>,
    pub factors: Option<FactorInputs>,
}

impl UniverseEntry {
    /// Entry with a directly supplied growth value.
    pub fn with_growth(
        ticker: &str,
        company_name: &str,
        sector: &str,
        growth_pct: f64,
        returns: TrailingReturns,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            company_name: company_name.to_string(),
            sector: sector.to_string(),
            returns,
            predicted_growth_pct: Some(growth_pct),
            factors: None,
        }
    }

    /// Entry whose growth is derived from factor inputs.
    pub fn with_factors(
        ticker: &str,
        company_name: &str,
        sector: &str,
        factors: FactorInputs,
        returns: TrailingReturns,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            company_name: company_name.to_string(),
            sector: sector.to_string(),
            returns,
            predicted_growth_pct: None,
            factors: Some(factors),
        }
    }

    /// Case-normalized ticker used for ordering, price lookup and output.
    pub fn ticker_key(&self) -> String {
        self.ticker.trim().to_uppercase()
    }

    /// Checks the fields every output row needs.
    pub fn check_fields(&self, position: usize) -> Result<(), StockCheckError> {
        if self.ticker.trim().is_empty() {
            return Err(StockCheckError::InputContract {
                field: format!("universe[{position}].ticker"),
            });
        }
        let ticker = self.ticker_key();
        if self.company_name.trim().is_empty() {
            return Err(StockCheckError::InputContract {
                field: format!("{ticker}.company_name"),
            });
        }
        if self.sector.trim().is_empty() {
            return Err(StockCheckError::InputContract {
                field: format!("{ticker}.sector"),
            });
        }
        let trailing = [
            ("3_month", self.returns.three_month),
            ("6_month", self.returns.six_month),
            ("12_month", self.returns.twelve_month),
        ];
        for (name, value) in trailing {
            if !value.is_finite() {
                return Err(StockCheckError::InputContract {
                    field: format!("{ticker}.{name}"),
                });
            }
        }
        Ok(())
    }
}

/// How an entry's growth value was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedGrowth {
    Direct(f64),
    Computed(GrowthEstimate),
}

impl ResolvedGrowth {
    pub fn growth_pct(&self) -> f64 {
        match self {
            ResolvedGrowth::Direct(g) => *g,
            ResolvedGrowth::Computed(est) => est.growth_pct,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, ResolvedGrowth::Computed(_))
    }
}

/// A finite direct value wins; otherwise the factor model must succeed.
pub fn resolve_growth(
    entry: &UniverseEntry,
    model: &FactorModel<'_>,
) -> Result<ResolvedGrowth, StockCheckError> {
    match (entry.predicted_growth_pct, &entry.factors) {
        (Some(g), _) if g.is_finite() => Ok(ResolvedGrowth::Direct(g)),
        (_, Some(inputs)) => model.compute_growth(inputs).map(ResolvedGrowth::Computed),
        _ => Err(StockCheckError::MissingGrowth {
            ticker: entry.ticker_key(),
        }),
    }
}
