//! Output contract enforcement.
//!
//! Runs on every document before it leaves the engine. The first violation
//! fails the whole document.

use crate::domain::error::StockCheckError;
use crate::domain::output::{OutputDocument, RankedResult};

pub fn validate(document: &OutputDocument, model_version: &str) -> Result<(), StockCheckError> {
    if document.model_version != model_version {
        return Err(StockCheckError::schema(
            "model_version",
            format!("must be \"{model_version}\""),
        ));
    }
    require_text("current_date", &document.current_date)?;
    require_text("prediction_date", &document.prediction_date)?;

    for (idx, row) in document.results.iter().enumerate() {
        validate_row(idx + 1, row)?;
    }
    Ok(())
}

fn validate_row(expected_rank: usize, row: &RankedResult) -> Result<(), StockCheckError> {
    let field = |name: &str| format!("results[{}].{name}", expected_rank - 1);

    if row.rank != expected_rank {
        return Err(StockCheckError::schema(
            field("rank"),
            format!("expected contiguous rank {expected_rank}, got {}", row.rank),
        ));
    }
    require_text(&field("ticker"), &row.ticker)?;
    require_text(&field("company_name"), &row.company_name)?;
    require_text(&field("sector"), &row.sector)?;

    if !row.current_price.is_finite() || row.current_price <= 0.0 {
        return Err(StockCheckError::schema(
            field("current_price"),
            "must be a finite number > 0",
        ));
    }

    let numbers = [
        ("predicted_price", row.predicted_price),
        ("predicted_1day_growth_pct", row.predicted_growth_pct),
        ("3_month", row.three_month),
        ("6_month", row.six_month),
        ("12_month", row.twelve_month),
    ];
    for (name, value) in numbers {
        if !value.is_finite() {
            return Err(StockCheckError::schema(field(name), "must be a finite number"));
        }
    }
    Ok(())
}

/// Whitespace-only text counts as empty, which is stricter than a bare
/// `""` check.
fn require_text(field: &str, value: &str) -> Result<(), StockCheckError> {
    if value.trim().is_empty() {
        return Err(StockCheckError::schema(field, "must be a non-empty string"));
    }
    Ok(())
}
