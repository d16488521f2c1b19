//! Domain error types.

/// Top-level error type for stockcheck.
///
/// Every variant names the field, ticker or factor that caused it. Nothing
/// in the engine recovers from these; they propagate to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum StockCheckError {
    #[error("input contract violated: {field} is required")]
    InputContract { field: String },

    #[error("universe size ({size}) is below required minimum ({minimum}); refusing partial-universe ranking")]
    InsufficientUniverse { size: usize, minimum: usize },

    #[error("missing predicted_1day_growth_pct for {ticker}: no direct value and no factor inputs")]
    MissingGrowth { ticker: String },

    #[error("missing factor input: {factor}")]
    MissingFactor { factor: String },

    #[error("invalid factor input for {factor}: must be a finite number")]
    InvalidFactor { factor: String },

    #[error("model weights do not sum to 100%: got {total_pct:.4}%")]
    WeightIntegrity { total_pct: f64 },

    #[error("{ticker} must be appended, but {ticker} is not present in the universe")]
    RequiredTickerMissing { ticker: String },

    #[error("missing or invalid user-supplied EOD price for {ticker}")]
    MissingPrice { ticker: String },

    #[error("schema violation in {field}: {reason}")]
    SchemaViolation { field: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data file error in {file}: {reason}")]
    DataParse { file: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockCheckError {
    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        StockCheckError::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<&StockCheckError> for std::process::ExitCode {
    fn from(err: &StockCheckError) -> Self {
        let code: u8 = match err {
            StockCheckError::Io(_) | StockCheckError::Report { .. } => 1,
            StockCheckError::ConfigParse { .. }
            | StockCheckError::ConfigMissing { .. }
            | StockCheckError::ConfigInvalid { .. } => 2,
            StockCheckError::DataParse { .. } => 3,
            StockCheckError::InsufficientUniverse { .. }
            | StockCheckError::MissingGrowth { .. }
            | StockCheckError::RequiredTickerMissing { .. } => 4,
            StockCheckError::MissingFactor { .. }
            | StockCheckError::InvalidFactor { .. }
            | StockCheckError::WeightIntegrity { .. } => 5,
            StockCheckError::MissingPrice { .. } => 6,
            StockCheckError::SchemaViolation { .. } | StockCheckError::InputContract { .. } => 7,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = StockCheckError::MissingPrice {
            ticker: "INTC".into(),
        };
        assert!(err.to_string().contains("INTC"));

        let err = StockCheckError::MissingFactor {
            factor: "f17".into(),
        };
        assert_eq!(err.to_string(), "missing factor input: f17");

        let err = StockCheckError::schema("results[3].ticker", "must be non-empty");
        assert_eq!(
            err.to_string(),
            "schema violation in results[3].ticker: must be non-empty"
        );
    }

    #[test]
    fn insufficient_universe_message() {
        let err = StockCheckError::InsufficientUniverse {
            size: 50,
            minimum: 100,
        };
        assert!(err.to_string().starts_with("universe size (50)"));
    }

    #[test]
    fn weight_integrity_formats_percent() {
        let err = StockCheckError::WeightIntegrity { total_pct: 99.5 };
        assert_eq!(
            err.to_string(),
            "model weights do not sum to 100%: got 99.5000%"
        );
    }
}
