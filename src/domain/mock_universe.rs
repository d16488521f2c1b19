//! Deterministic synthetic universe for demos and tests.
//!
//! This is scaffolding data with direct growth values, not model output.

use crate::domain::numeric::round_pct;
use crate::domain::universe::{TrailingReturns, UniverseEntry};

pub const MOCK_SECTORS: [&str; 7] = [
    "Tech",
    "Healthcare",
    "Industrials",
    "Financials",
    "Consumer",
    "Energy",
    "Utilities",
];

/// Position of the required ticker in the mock universe.
pub const MOCK_REQUIRED_INDEX: usize = 50;

/// Growth falls by 0.01 per position from 2.2, so larger universes reach
/// negative values. Index 50 is `INTC`; every other ticker is `Tnnn`.
pub fn make_mock_universe(size: usize) -> Vec<UniverseEntry> {
    (0..size)
        .map(|i| {
            let x = i as f64;
            let ticker = if i == MOCK_REQUIRED_INDEX {
                "INTC".to_string()
            } else {
                format!("T{i:03}")
            };
            let company = if i == MOCK_REQUIRED_INDEX {
                "Intel".to_string()
            } else {
                format!("Company {ticker}")
            };
            UniverseEntry::with_growth(
                &ticker,
                &company,
                MOCK_SECTORS[i % MOCK_SECTORS.len()],
                round_pct(2.2 - x * 0.01),
                TrailingReturns {
                    three_month: round_pct(4.5 - x * 0.02),
                    six_month: round_pct(8.2 - x * 0.03),
                    twelve_month: round_pct(16.4 - x * 0.05),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn layout_is_deterministic() {
        let universe = make_mock_universe(250);
        assert_eq!(universe.len(), 250);
        assert_eq!(universe[0].ticker, "T000");
        assert_eq!(universe[50].ticker, "INTC");
        assert_eq!(universe[50].company_name, "Intel");
        assert_eq!(universe[51].ticker, "T051");
        assert_eq!(universe[7].sector, "Tech");
        assert_eq!(universe[12].sector, "Energy");
        assert_eq!(make_mock_universe(250), universe);
    }

    #[test]
    fn values_follow_linear_schedule() {
        let universe = make_mock_universe(250);
        assert_eq!(universe[0].predicted_growth_pct, Some(2.2));
        assert_abs_diff_eq!(
            universe[249].predicted_growth_pct.unwrap(),
            -0.29,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(universe[10].returns.three_month, 4.3, epsilon = 1e-12);
        assert_abs_diff_eq!(universe[10].returns.six_month, 7.9, epsilon = 1e-12);
        assert_abs_diff_eq!(universe[10].returns.twelve_month, 15.9, epsilon = 1e-12);
    }

    #[test]
    fn small_universe_has_no_required_ticker() {
        let universe = make_mock_universe(50);
        assert!(universe.iter().all(|e| e.ticker != "INTC"));
    }
}
