//! Configuration validation.
//!
//! Validates the `[engine]` and `[run]` sections before anything runs.
//! Absent keys fall back to the locked defaults; present keys must parse.

use crate::domain::engine_config::{
    MIN_UNIVERSE_SIZE, SECTOR_WARNING_COUNT, TOP_N,
};
use crate::domain::error::StockCheckError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const REPORT_FORMATS: [&str; 3] = ["json", "csv", "text"];

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), StockCheckError> {
    validate_text(config, "engine", "model_version")?;
    validate_text(config, "engine", "required_ticker")?;
    let min_size = validate_count(config, "min_universe_size")?.unwrap_or(MIN_UNIVERSE_SIZE);
    let top_n = validate_count(config, "top_n")?.unwrap_or(TOP_N);
    let sector_count =
        validate_count(config, "sector_warning_count")?.unwrap_or(SECTOR_WARNING_COUNT);
    validate_threshold(config, "trade_min_average")?;
    validate_threshold(config, "trade_min_dispersion")?;

    if top_n > min_size {
        return Err(invalid(
            "engine",
            "top_n",
            format!("top_n ({top_n}) must not exceed min_universe_size ({min_size})"),
        ));
    }
    if sector_count > top_n {
        return Err(invalid(
            "engine",
            "sector_warning_count",
            format!("sector_warning_count ({sector_count}) must not exceed top_n ({top_n})"),
        ));
    }
    Ok(())
}

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), StockCheckError> {
    let current = parse_date(config.get_string("run", "current_date").as_deref(), "current_date")?;
    if let Some(s) = config.get_string("run", "prediction_date") {
        let prediction = parse_date(Some(&s), "prediction_date")?;
        if prediction <= current {
            return Err(invalid(
                "run",
                "prediction_date",
                "prediction_date must be after current_date",
            ));
        }
    }
    if let Some(s) = config.get_string("run", "manual_override") {
        parse_bool(&s).ok_or_else(|| {
            invalid("run", "manual_override", "manual_override must be true or false")
        })?;
    }
    if let Some(s) = config.get_string("run", "format") {
        let format = s.trim().to_lowercase();
        if !REPORT_FORMATS.contains(&format.as_str()) {
            return Err(invalid(
                "run",
                "format",
                format!("format must be one of {}", REPORT_FORMATS.join(", ")),
            ));
        }
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, StockCheckError> {
    match value {
        None => Err(StockCheckError::ConfigMissing {
            section: "run".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
            invalid(
                "run",
                field,
                format!("invalid {field} format, expected YYYY-MM-DD"),
            )
        }),
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn validate_text(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), StockCheckError> {
    match config.get_string(section, key) {
        Some(s) if s.trim().is_empty() => {
            Err(invalid(section, key, format!("{key} must not be empty")))
        }
        _ => Ok(()),
    }
}

fn validate_count(config: &dyn ConfigPort, key: &str) -> Result<Option<usize>, StockCheckError> {
    let value: Option<i64> = parse_present(config, "engine", key)?;
    match value {
        None => Ok(None),
        Some(v) if v >= 1 => Ok(Some(v as usize)),
        Some(_) => Err(invalid("engine", key, format!("{key} must be at least 1"))),
    }
}

fn validate_threshold(config: &dyn ConfigPort, key: &str) -> Result<(), StockCheckError> {
    let value: Option<f64> = parse_present(config, "engine", key)?;
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(invalid(
            "engine",
            key,
            format!("{key} must be a finite, non-negative number"),
        )),
        _ => Ok(()),
    }
}

fn parse_present<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, StockCheckError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("{key} is not a valid number"))),
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> StockCheckError {
    StockCheckError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    fn invalid_key(err: StockCheckError) -> String {
        match err {
            StockCheckError::ConfigInvalid { key, .. } => key,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_engine_config_passes() {
        let config = make_config(
            r#"
[engine]
model_version = Stock Check v1.0
min_universe_size = 100
top_n = 10
required_ticker = INTC
trade_min_average = 0.5
trade_min_dispersion = 0.6
sector_warning_count = 7
"#,
        );
        assert!(validate_engine_config(&config).is_ok());
    }

    #[test]
    fn empty_engine_section_uses_defaults() {
        assert!(validate_engine_config(&make_config("[engine]\n")).is_ok());
        assert!(validate_engine_config(&make_config("")).is_ok());
    }

    #[test]
    fn non_numeric_size_fails() {
        let err = validate_engine_config(&make_config("[engine]\nmin_universe_size = lots\n"))
            .unwrap_err();
        assert_eq!(invalid_key(err), "min_universe_size");
    }

    #[test]
    fn zero_top_n_fails() {
        let err = validate_engine_config(&make_config("[engine]\ntop_n = 0\n")).unwrap_err();
        assert_eq!(invalid_key(err), "top_n");
    }

    #[test]
    fn top_n_above_min_universe_fails() {
        let err = validate_engine_config(&make_config(
            "[engine]\nmin_universe_size = 5\ntop_n = 10\nsector_warning_count = 3\n",
        ))
        .unwrap_err();
        assert_eq!(invalid_key(err), "top_n");
    }

    #[test]
    fn sector_count_above_top_n_fails() {
        let err = validate_engine_config(&make_config("[engine]\nsector_warning_count = 11\n"))
            .unwrap_err();
        assert_eq!(invalid_key(err), "sector_warning_count");
    }

    #[test]
    fn negative_threshold_fails() {
        let err = validate_engine_config(&make_config("[engine]\ntrade_min_dispersion = -0.1\n"))
            .unwrap_err();
        assert_eq!(invalid_key(err), "trade_min_dispersion");
    }

    #[test]
    fn valid_run_config_passes() {
        let config = make_config(
            "[run]\ncurrent_date = 2026-02-14\nprediction_date = 2026-02-15\nmanual_override = no\nformat = CSV\n",
        );
        assert!(validate_run_config(&config).is_ok());
    }

    #[test]
    fn missing_current_date() {
        let err = validate_run_config(&make_config("[run]\n")).unwrap_err();
        assert!(
            matches!(err, StockCheckError::ConfigMissing { key, .. } if key == "current_date")
        );
    }

    #[test]
    fn malformed_current_date() {
        let err =
            validate_run_config(&make_config("[run]\ncurrent_date = 14/02/2026\n")).unwrap_err();
        assert_eq!(invalid_key(err), "current_date");
    }

    #[test]
    fn prediction_date_must_follow_current() {
        let err = validate_run_config(&make_config(
            "[run]\ncurrent_date = 2026-02-14\nprediction_date = 2026-02-14\n",
        ))
        .unwrap_err();
        assert_eq!(invalid_key(err), "prediction_date");
    }

    #[test]
    fn bad_override_flag() {
        let err = validate_run_config(&make_config(
            "[run]\ncurrent_date = 2026-02-14\nmanual_override = maybe\n",
        ))
        .unwrap_err();
        assert_eq!(invalid_key(err), "manual_override");
    }

    #[test]
    fn unknown_format() {
        let err = validate_run_config(&make_config(
            "[run]\ncurrent_date = 2026-02-14\nformat = xml\n",
        ))
        .unwrap_err();
        assert_eq!(invalid_key(err), "format");
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("on"), None);
    }
}
