//! Output contract types.
//!
//! Field names and their serialized keys are a permanent external contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// User-supplied end-of-day prices keyed by upper-cased ticker.
pub type PriceMap = HashMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeHeader {
    #[serde(rename = "TRADE")]
    Trade,
    #[serde(rename = "NO TRADE")]
    NoTrade,
}

impl TradeHeader {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeHeader::Trade => "TRADE",
            TradeHeader::NoTrade => "NO TRADE",
        }
    }
}

impl fmt::Display for TradeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub rank: usize,
    pub ticker: String,
    pub company_name: String,
    pub sector: String,
    pub current_price: f64,
    pub predicted_price: f64,
    #[serde(rename = "predicted_1day_growth_pct")]
    pub predicted_growth_pct: f64,
    #[serde(rename = "3_month")]
    pub three_month: f64,
    #[serde(rename = "6_month")]
    pub six_month: f64,
    #[serde(rename = "12_month")]
    pub twelve_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub model_version: String,
    pub current_date: String,
    pub prediction_date: String,
    pub trade_header: TradeHeader,
    pub sector_warning: bool,
    pub results: Vec<RankedResult>,
}
