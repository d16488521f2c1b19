//! INI file configuration adapter.

use crate::domain::config_validation::parse_bool;
use crate::domain::error::StockCheckError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StockCheckError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| StockCheckError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, StockCheckError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| StockCheckError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[engine]
model_version = Stock Check v1.0
min_universe_size = 120
required_ticker = INTC
trade_min_average = 0.55

[run]
current_date = 2026-02-14
manual_override = yes
universe = data/universe.csv
"#;

    #[test]
    fn reads_strings() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("engine", "model_version"),
            Some("Stock Check v1.0".to_string())
        );
        assert_eq!(
            adapter.get_string("run", "universe"),
            Some("data/universe.csv".to_string())
        );
        assert_eq!(adapter.get_string("run", "prices"), None);
        assert_eq!(adapter.get_string("missing", "key"), None);
    }

    #[test]
    fn reads_numbers_with_defaults() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("engine", "min_universe_size", 100), 120);
        assert_eq!(adapter.get_int("engine", "top_n", 10), 10);
        assert_eq!(adapter.get_double("engine", "trade_min_average", 0.5), 0.55);
        assert_eq!(adapter.get_double("engine", "trade_min_dispersion", 0.6), 0.6);
    }

    #[test]
    fn non_numeric_falls_back_to_default() {
        let adapter = FileConfigAdapter::from_string("[engine]\ntop_n = ten\n").unwrap();
        assert_eq!(adapter.get_int("engine", "top_n", 10), 10);
    }

    #[test]
    fn reads_bools() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert!(adapter.get_bool("run", "manual_override", false));
        assert!(!adapter.get_bool("run", "missing", false));

        let adapter = FileConfigAdapter::from_string("[run]\nmanual_override = 0\n").unwrap();
        assert!(!adapter.get_bool("run", "manual_override", true));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("run", "current_date"),
            Some("2026-02-14".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/stockcheck.ini").unwrap_err();
        assert!(matches!(err, StockCheckError::ConfigParse { file, .. } if file.contains("stockcheck.ini")));
    }
}
