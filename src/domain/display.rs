//! Presentation ordering. Never feeds back into ranking or decisions.

use crate::domain::output::RankedResult;
use crate::domain::ranking::compare_growth_then_ticker;

/// Permanent column sequence for every table rendering of the results.
pub const CANONICAL_COLUMNS: [&str; 10] = [
    "Rank",
    "Ticker",
    "Company Name",
    "Sector",
    "Current Price",
    "Predicted Price",
    "Predicted 1-Day % Growth",
    "3-Month",
    "6-Month",
    "12-Month",
];

/// Non-negative growth rows first, then negative; each group descending
/// by growth with the ranking tie-break. Ranks are left untouched.
pub fn sort_for_display(results: &[RankedResult]) -> Vec<RankedResult> {
    let (mut gains, mut losses): (Vec<_>, Vec<_>) = results
        .iter()
        .cloned()
        .partition(|r| r.predicted_growth_pct >= 0.0);

    let by_growth = |a: &RankedResult, b: &RankedResult| {
        compare_growth_then_ticker(
            a.predicted_growth_pct,
            &a.ticker.to_uppercase(),
            b.predicted_growth_pct,
            &b.ticker.to_uppercase(),
        )
    };
    gains.sort_by(by_growth);
    losses.sort_by(by_growth);

    gains.extend(losses);
    gains
}
