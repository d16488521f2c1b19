//! Trade header and sector-concentration warning.
//!
//! Computed from the primary rows only. The appended required ticker never
//! reaches this module.

use crate::domain::engine_config::EngineConfig;
use crate::domain::output::{RankedResult, TradeHeader};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub trade_header: TradeHeader,
    pub sector_warning: bool,
    /// Header the rule produced before any manual override.
    pub computed_header: TradeHeader,
    pub average_growth: f64,
    pub dispersion: f64,
}

pub fn decide(primary: &[RankedResult], manual_override: bool, config: &EngineConfig) -> Decision {
    let (average_growth, dispersion) = growth_stats(primary);

    let computed_header = if !primary.is_empty()
        && average_growth >= config.trade_min_average
        && dispersion >= config.trade_min_dispersion
    {
        TradeHeader::Trade
    } else {
        TradeHeader::NoTrade
    };

    let sector_warning = dominant_sector(primary)
        .is_some_and(|(_, count)| count >= config.sector_warning_count);

    let trade_header = if manual_override {
        if computed_header == TradeHeader::Trade {
            warn!("manual override suppressed a computed TRADE header");
        }
        TradeHeader::NoTrade
    } else {
        computed_header
    };

    debug!(
        average_growth,
        dispersion,
        %computed_header,
        %trade_header,
        sector_warning,
        "decision computed"
    );

    Decision {
        trade_header,
        sector_warning,
        computed_header,
        average_growth,
        dispersion,
    }
}

/// Mean growth and max - min spread.
fn growth_stats(rows: &[RankedResult]) -> (f64, f64) {
    if rows.is_empty() {
        return (0.0, 0.0);
    }
    let sum: f64 = rows.iter().map(|r| r.predicted_growth_pct).sum();
    let max = rows
        .iter()
        .map(|r| r.predicted_growth_pct)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = rows
        .iter()
        .map(|r| r.predicted_growth_pct)
        .fold(f64::INFINITY, f64::min);
    (sum / rows.len() as f64, max - min)
}

/// Most frequent sector and its count; ties resolve to the name that sorts first.
fn dominant_sector(rows: &[RankedResult]) -> Option<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        *counts.entry(r.sector.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
}
