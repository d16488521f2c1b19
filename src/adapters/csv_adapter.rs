//! CSV file data adapter.
//!
//! Universe file: `ticker,company_name,sector,3_month,6_month,12_month`
//! plus an optional `predicted_1day_growth_pct` column and optional factor
//! columns `f01`..`f43`. Blank numeric cells are absent values, never zero.
//!
//! Prices file: `ticker,price`.

use crate::domain::error::StockCheckError;
use crate::domain::factor_model::{FactorInputs, FACTORS_43};
use crate::domain::output::PriceMap;
use crate::domain::universe::{TrailingReturns, UniverseEntry};
use crate::ports::data_port::DataPort;
use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const GROWTH_COLUMN: &str = "predicted_1day_growth_pct";
const UNIVERSE_COLUMNS: [&str; 6] = [
    "ticker",
    "company_name",
    "sector",
    "3_month",
    "6_month",
    "12_month",
];

pub struct CsvAdapter {
    universe_path: PathBuf,
    prices_path: Option<PathBuf>,
}

impl CsvAdapter {
    pub fn new(universe_path: PathBuf) -> Self {
        Self {
            universe_path,
            prices_path: None,
        }
    }

    pub fn with_prices(mut self, prices_path: PathBuf) -> Self {
        self.prices_path = Some(prices_path);
        self
    }
}

impl DataPort for CsvAdapter {
    fn load_universe(&self) -> Result<Vec<UniverseEntry>, StockCheckError> {
        let file = Table::read(&self.universe_path)?;
        let ticker = file.require("ticker")?;
        let company = file.require("company_name")?;
        let sector = file.require("sector")?;
        let three = file.require("3_month")?;
        let six = file.require("6_month")?;
        let twelve = file.require("12_month")?;
        let growth = file.column(GROWTH_COLUMN);
        let factor_columns: Vec<(&str, usize)> = FACTORS_43
            .iter()
            .filter_map(|f| file.column(f.id).map(|idx| (f.id, idx)))
            .collect();

        let mut seen = HashSet::new();
        let mut universe = Vec::with_capacity(file.records.len());

        for record in &file.records {
            let key = file.text(record, ticker).to_uppercase();
            if !key.is_empty() && !seen.insert(key.clone()) {
                return Err(file.error(record, "ticker", format!("duplicate ticker {key}")));
            }

            let mut factors = FactorInputs::new();
            for &(id, idx) in &factor_columns {
                if let Some(v) = file.number(record, idx, id)? {
                    factors.insert(id.to_string(), v);
                }
            }

            universe.push(UniverseEntry {
                ticker: file.text(record, ticker).to_string(),
                company_name: file.text(record, company).to_string(),
                sector: file.text(record, sector).to_string(),
                returns: TrailingReturns {
                    three_month: file.required_number(record, three, "3_month")?,
                    six_month: file.required_number(record, six, "6_month")?,
                    twelve_month: file.required_number(record, twelve, "12_month")?,
                },
                predicted_growth_pct: match growth {
                    Some(idx) => file.number(record, idx, GROWTH_COLUMN)?,
                    None => None,
                },
                factors: (!factors.is_empty()).then_some(factors),
            });
        }

        debug!(
            path = %self.universe_path.display(),
            entries = universe.len(),
            factor_columns = factor_columns.len(),
            "universe loaded"
        );
        Ok(universe)
    }

    fn load_prices(&self) -> Result<PriceMap, StockCheckError> {
        let path = self
            .prices_path
            .as_ref()
            .ok_or_else(|| StockCheckError::InputContract {
                field: "prices".into(),
            })?;
        let file = Table::read(path)?;
        let ticker = file.require("ticker")?;
        let price = file.require("price")?;

        let mut prices = PriceMap::new();
        for record in &file.records {
            let key = file.text(record, ticker).to_uppercase();
            if key.is_empty() {
                return Err(file.error(record, "ticker", "ticker is empty"));
            }
            let value = file.required_number(record, price, "price")?;
            if prices.insert(key.clone(), value).is_some() {
                return Err(file.error(record, "ticker", format!("duplicate ticker {key}")));
            }
        }

        debug!(path = %path.display(), prices = prices.len(), "prices loaded");
        Ok(prices)
    }
}

/// Write a universe in the layout [`CsvAdapter`] reads. Factor columns are
/// emitted only when some entry carries factor inputs.
pub fn write_universe(path: &Path, universe: &[UniverseEntry]) -> Result<(), StockCheckError> {
    let with_factors = universe.iter().any(|e| e.factors.is_some());
    let to_err = |e: csv::Error| StockCheckError::DataParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut writer = Writer::from_path(path).map_err(to_err)?;

    let mut header: Vec<&str> = UNIVERSE_COLUMNS.to_vec();
    header.push(GROWTH_COLUMN);
    if with_factors {
        header.extend(FACTORS_43.iter().map(|f| f.id));
    }
    writer.write_record(&header).map_err(to_err)?;

    for e in universe {
        let mut row = vec![
            e.ticker.clone(),
            e.company_name.clone(),
            e.sector.clone(),
            e.returns.three_month.to_string(),
            e.returns.six_month.to_string(),
            e.returns.twelve_month.to_string(),
            e.predicted_growth_pct
                .map(|g| g.to_string())
                .unwrap_or_default(),
        ];
        if with_factors {
            row.extend(FACTORS_43.iter().map(|f| {
                e.factors
                    .as_ref()
                    .and_then(|inputs| inputs.get(f.id))
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }));
        }
        writer.write_record(&row).map_err(to_err)?;
    }

    writer.flush()?;
    Ok(())
}

/// A fully read CSV file with a header row.
struct Table {
    file: String,
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl Table {
    fn read(path: &Path) -> Result<Self, StockCheckError> {
        let file = path.display().to_string();
        let to_err = |e: csv::Error| StockCheckError::DataParse {
            file: file.clone(),
            reason: e.to_string(),
        };

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path)
            .map_err(to_err)?;
        let headers = reader.headers().map_err(to_err)?.clone();
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_err)?;

        Ok(Self {
            file,
            headers,
            records,
        })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    }

    fn require(&self, name: &str) -> Result<usize, StockCheckError> {
        self.column(name).ok_or_else(|| StockCheckError::DataParse {
            file: self.file.clone(),
            reason: format!("missing {name} column"),
        })
    }

    fn text<'r>(&self, record: &'r StringRecord, idx: usize) -> &'r str {
        record.get(idx).unwrap_or("")
    }

    /// `None` for a blank cell; an error for anything that is not a number.
    fn number(
        &self,
        record: &StringRecord,
        idx: usize,
        column: &str,
    ) -> Result<Option<f64>, StockCheckError> {
        let raw = self.text(record, idx);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<f64>()
            .map(Some)
            .map_err(|e| self.error(record, column, format!("invalid {column} value {raw:?}: {e}")))
    }

    fn required_number(
        &self,
        record: &StringRecord,
        idx: usize,
        column: &str,
    ) -> Result<f64, StockCheckError> {
        self.number(record, idx, column)?
            .ok_or_else(|| self.error(record, column, format!("{column} is required")))
    }

    fn error(
        &self,
        record: &StringRecord,
        column: &str,
        reason: impl Into<String>,
    ) -> StockCheckError {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        StockCheckError::DataParse {
            file: self.file.clone(),
            reason: format!("line {line}, column {column}: {}", reason.into()),
        }
    }
}
