//! Locked 43-factor model.
//!
//! The factor table is versioned reference data: identifiers `f01`..`f43`
//! never change meaning, and any weight revision ships under a new version
//! tag. The model turns a complete set of raw factor inputs into a weighted
//! score in [0, 1] and a predicted 1-day growth percentage.

use crate::domain::error::StockCheckError;
use crate::domain::numeric::round_pct;
use std::collections::BTreeMap;
use tracing::trace;

pub const MODEL43_SPEC_VERSION: &str = "43-factor-spec@2026-02-14";

/// Growth at a weighted score of 0.0 or 1.0 (symmetric around 0.5).
pub const GROWTH_EXTREME_PCT: f64 = 3.0;

/// Z-score magnitude cap applied before logistic compression.
const Z_CLAMP: f64 = 12.0;

const WEIGHT_SUM_MIN: f64 = 0.999;
const WEIGHT_SUM_MAX: f64 = 1.001;

/// Raw factor inputs keyed by factor id.
pub type FactorInputs = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorDef {
    pub id: &'static str,
    pub group: &'static str,
    pub name: &'static str,
    pub definition: &'static str,
    pub weight_pct: f64,
}

const fn factor(
    id: &'static str,
    group: &'static str,
    name: &'static str,
    definition: &'static str,
    weight_pct: f64,
) -> FactorDef {
    FactorDef {
        id,
        group,
        name,
        definition,
        weight_pct,
    }
}

const MOMENTUM: &str = "Momentum & Price Structure";
const EARNINGS: &str = "Earnings & Revenue Acceleration";
const OPTIONS: &str = "Options & Flow Signals";
const VOLATILITY: &str = "Volatility Structure";
const RELATIVE: &str = "Relative Strength & Sector Rotation";
const LIQUIDITY: &str = "Liquidity & Institutional Behavior";
const RISK: &str = "Risk Compression & Acceleration";
const MACRO: &str = "Macro Overlay Inputs";

pub static FACTORS_43: [FactorDef; 43] = [
    // Momentum & Price Structure (18%)
    factor("f01", MOMENTUM, "5-Day Momentum", "% change over 5 trading days", 2.0),
    factor("f02", MOMENTUM, "10-Day Momentum", "% change over 10 days", 2.0),
    factor("f03", MOMENTUM, "20-Day Momentum", "% change over 20 days", 2.0),
    factor("f04", MOMENTUM, "50-Day Trend Position", "% above/below 50DMA", 2.5),
    factor("f05", MOMENTUM, "200-Day Trend Position", "% above/below 200DMA", 2.5),
    factor("f06", MOMENTUM, "RSI Compression", "RSI normalized 0-100", 2.0),
    factor("f07", MOMENTUM, "MACD Slope", "Rate of change of MACD", 2.0),
    factor("f08", MOMENTUM, "Breakout Velocity", "Distance from 30-day high", 3.0),
    // Earnings & Revenue Acceleration (16%)
    factor("f09", EARNINGS, "EPS YoY Growth", "Year-over-year EPS growth", 3.0),
    factor("f10", EARNINGS, "EPS QoQ Acceleration", "Sequential acceleration", 3.0),
    factor("f11", EARNINGS, "Revenue YoY Growth", "Revenue growth YoY", 3.0),
    factor("f12", EARNINGS, "Revenue QoQ Acceleration", "Sequential revenue change", 3.0),
    factor("f13", EARNINGS, "Earnings Surprise", "Last earnings beat %", 2.0),
    factor("f14", EARNINGS, "Forward Guidance Revision", "Analyst upward revisions", 2.0),
    // Options & Flow Signals (14%)
    factor("f15", OPTIONS, "Call/Put Volume Ratio", "Relative bullish flow", 3.0),
    factor("f16", OPTIONS, "Unusual Options Activity", "Z-score vs 30-day avg", 3.0),
    factor("f17", OPTIONS, "Open Interest Expansion", "OI % increase", 2.0),
    factor("f18", OPTIONS, "Dark Pool Flow Bias", "Net institutional prints", 3.0),
    factor("f19", OPTIONS, "Block Trade Accumulation", "Large trade clustering", 3.0),
    // Volatility Structure (10%)
    factor("f20", VOLATILITY, "Implied Volatility Rank", "IV vs 1Y range", 2.5),
    factor("f21", VOLATILITY, "IV Skew", "Call vs put skew", 2.0),
    factor("f22", VOLATILITY, "Volatility Compression", "Bollinger Band width", 2.5),
    factor("f23", VOLATILITY, "ATR Expansion", "ATR vs 20-day baseline", 3.0),
    // Relative Strength & Sector Rotation (12%)
    factor("f24", RELATIVE, "Relative Strength vs SPY", "20-day relative return", 3.0),
    factor("f25", RELATIVE, "Relative Strength vs Sector ETF", "Relative to sector", 3.0),
    factor("f26", RELATIVE, "Sector Momentum Rank", "Sector percentile", 3.0),
    factor("f27", RELATIVE, "Cross-Sector Capital Rotation", "ETF flow direction", 3.0),
    // Liquidity & Institutional Behavior (10%)
    factor("f28", LIQUIDITY, "Volume Surge Ratio", "Volume vs 30-day avg", 3.0),
    factor("f29", LIQUIDITY, "Institutional Ownership Change", "QoQ change", 2.5),
    factor("f30", LIQUIDITY, "Insider Buying Activity", "Net insider accumulation", 2.5),
    factor("f31", LIQUIDITY, "Short Interest Compression", "Days-to-cover trend", 2.0),
    // Risk Compression & Acceleration (10%)
    factor("f32", RISK, "Beta Adjustment", "Risk-normalized return", 2.0),
    factor("f33", RISK, "Downside Deviation", "30-day downside risk", 2.0),
    factor("f34", RISK, "Price Gap Frequency", "Positive gaps last 30d", 2.0),
    factor("f35", RISK, "Accumulation/Distribution", "Money flow trend", 2.0),
    factor("f36", RISK, "Acceleration Curve Fit", "2nd derivative momentum", 2.0),
    // Macro Overlay Inputs (10%)
    factor("f37", MACRO, "Market Breadth", "Adv/Decline ratio", 2.0),
    factor("f38", MACRO, "VIX Direction", "5-day VIX trend", 2.0),
    factor("f39", MACRO, "Treasury Yield Trend", "10Y rate direction", 2.0),
    factor("f40", MACRO, "Dollar Index Trend", "DXY direction", 1.5),
    factor("f41", MACRO, "Fed Liquidity Proxy", "Balance sheet change", 1.5),
    factor("f42", MACRO, "Economic Surprise Index", "Macro surprise score", 0.5),
    factor("f43", MACRO, "Risk-On / Risk-Off Composite", "Cross-asset signal", 0.5),
];

/// Read-only view of a factor table.
#[derive(Debug, Clone, Copy)]
pub struct FactorSpec<'a> {
    pub version: &'a str,
    pub total_weight_pct: f64,
    pub factors: &'a [FactorDef],
}

/// Output of [`FactorModel::compute_growth`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthEstimate {
    pub weighted_score: f64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct FactorModel<'a> {
    version: &'a str,
    factors: &'a [FactorDef],
}

impl FactorModel<'static> {
    /// The locked production table.
    pub fn locked() -> Self {
        Self {
            version: MODEL43_SPEC_VERSION,
            factors: &FACTORS_43,
        }
    }
}

impl Default for FactorModel<'static> {
    fn default() -> Self {
        Self::locked()
    }
}

impl<'a> FactorModel<'a> {
    pub fn with_factors(version: &'a str, factors: &'a [FactorDef]) -> Self {
        Self { version, factors }
    }

    pub fn spec(&self) -> FactorSpec<'a> {
        FactorSpec {
            version: self.version,
            total_weight_pct: self.factors.iter().map(|f| f.weight_pct).sum(),
            factors: self.factors,
        }
    }

    /// Compute the weighted score and predicted growth for one instrument.
    ///
    /// Every factor in the table must be present and finite; unknown extra
    /// keys are ignored.
    pub fn compute_growth(&self, inputs: &FactorInputs) -> Result<GrowthEstimate, StockCheckError> {
        let mut weighted_score = 0.0;
        let mut weight_sum = 0.0;

        for f in self.factors {
            let raw = *inputs
                .get(f.id)
                .ok_or_else(|| StockCheckError::MissingFactor {
                    factor: f.id.to_string(),
                })?;
            if !raw.is_finite() {
                return Err(StockCheckError::InvalidFactor {
                    factor: f.id.to_string(),
                });
            }

            let w = f.weight_pct / 100.0;
            weighted_score += normalize(raw) * w;
            weight_sum += w;
        }

        if !(WEIGHT_SUM_MIN..=WEIGHT_SUM_MAX).contains(&weight_sum) {
            return Err(StockCheckError::WeightIntegrity {
                total_pct: weight_sum * 100.0,
            });
        }

        let score = weighted_score.clamp(0.0, 1.0);
        let growth_pct = score_to_growth_pct(score);
        trace!(version = self.version, score, growth_pct, "factor model evaluated");

        Ok(GrowthEstimate {
            weighted_score: round_pct(score),
            growth_pct: round_pct(growth_pct),
        })
    }
}

/// Values already in [0, 1] pass through; anything else is read as a
/// z-score, capped at +/-12 and squashed through the logistic function.
pub fn normalize(raw: f64) -> f64 {
    if (0.0..=1.0).contains(&raw) {
        return raw;
    }
    let z = raw.clamp(-Z_CLAMP, Z_CLAMP);
    1.0 / (1.0 + (-z).exp())
}

/// 0.0 -> -3%, 0.5 -> 0%, 1.0 -> +3%.
pub fn score_to_growth_pct(score: f64) -> f64 {
    let s = score.clamp(0.0, 1.0);
    (s - 0.5) * 2.0 * GROWTH_EXTREME_PCT
}
