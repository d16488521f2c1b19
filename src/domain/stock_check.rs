//! The Stock Check pipeline.
//!
//! factor model -> ranking -> assembly -> decision -> schema check ->
//! display ordering. One call builds one fresh document; nothing is cached
//! between calls.

use crate::domain::assembler::assemble;
use crate::domain::decision::{decide, Decision};
use crate::domain::display::sort_for_display;
use crate::domain::engine_config::EngineConfig;
use crate::domain::error::StockCheckError;
use crate::domain::factor_model::FactorModel;
use crate::domain::output::{OutputDocument, PriceMap, RankedResult};
use crate::domain::ranking::{rank, Selection};
use crate::domain::schema::validate;
use crate::domain::universe::UniverseEntry;
use tracing::info;

#[derive(Debug, Clone)]
pub struct StockCheckInput {
    pub current_date: String,
    pub prediction_date: String,
    pub universe: Vec<UniverseEntry>,
    pub prices: PriceMap,
    pub manual_override: bool,
}

#[derive(Debug, Clone)]
pub struct StockCheckRun {
    pub document: OutputDocument,
    /// Presentation ordering of `document.results`.
    pub display: Vec<RankedResult>,
    pub decision: Decision,
    /// True when the required ticker sat outside the primary rows.
    pub required_appended: bool,
}

#[derive(Debug, Clone)]
pub struct StockCheck<'m> {
    config: EngineConfig,
    model: FactorModel<'m>,
}

impl StockCheck<'static> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            model: FactorModel::locked(),
        }
    }
}

impl<'m> StockCheck<'m> {
    pub fn with_model(config: EngineConfig, model: FactorModel<'m>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn model(&self) -> &FactorModel<'m> {
        &self.model
    }

    /// Tickers the caller must price before [`StockCheck::run`] can succeed,
    /// in output order. Prices are never filled in here.
    pub fn required_tickers(
        &self,
        universe: &[UniverseEntry],
    ) -> Result<Vec<String>, StockCheckError> {
        Ok(self.select(universe)?.tickers())
    }

    pub fn run(&self, input: &StockCheckInput) -> Result<StockCheckRun, StockCheckError> {
        check_input_contract(input)?;

        let selection = self.select(&input.universe)?;
        let required_appended = selection.appended.is_some();
        let results = assemble(&selection, &input.prices)?;

        let primary_len = selection.primary.len();
        let decision = decide(&results[..primary_len], input.manual_override, &self.config);

        let document = OutputDocument {
            model_version: self.config.model_version.clone(),
            current_date: input.current_date.clone(),
            prediction_date: input.prediction_date.clone(),
            trade_header: decision.trade_header,
            sector_warning: decision.sector_warning,
            results,
        };
        validate(&document, &self.config.model_version)?;

        info!(
            results = document.results.len(),
            trade_header = %document.trade_header,
            sector_warning = document.sector_warning,
            "stock check complete"
        );

        let display = sort_for_display(&document.results);
        Ok(StockCheckRun {
            document,
            display,
            decision,
            required_appended,
        })
    }

    fn select<'u>(&self, universe: &'u [UniverseEntry]) -> Result<Selection<'u>, StockCheckError> {
        rank(universe, &self.model, &self.config)
    }
}

fn check_input_contract(input: &StockCheckInput) -> Result<(), StockCheckError> {
    if input.current_date.trim().is_empty() {
        return Err(StockCheckError::InputContract {
            field: "current_date".into(),
        });
    }
    if input.prediction_date.trim().is_empty() {
        return Err(StockCheckError::InputContract {
            field: "prediction_date".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mock_universe::make_mock_universe;
    use crate::domain::output::TradeHeader;

    fn priced(universe: &[UniverseEntry]) -> PriceMap {
        universe
            .iter()
            .map(|e| (e.ticker_key(), 100.0))
            .collect()
    }

    fn input(universe: Vec<UniverseEntry>) -> StockCheckInput {
        StockCheckInput {
            current_date: "2026-02-14".into(),
            prediction_date: "2026-02-15".into(),
            prices: priced(&universe),
            universe,
            manual_override: false,
        }
    }

    #[test]
    fn mock_universe_run() {
        let engine = StockCheck::new(EngineConfig::default());
        let run = engine.run(&input(make_mock_universe(250))).unwrap();

        assert_eq!(run.document.results.len(), 11);
        assert!(run.required_appended);
        assert_eq!(run.document.results[10].ticker, "INTC");
        assert_eq!(run.document.results[10].rank, 11);
        assert_eq!(run.document.model_version, "Stock Check v1.0");
        // 2.2 .. 2.11: average 2.155 but dispersion only 0.09
        assert_eq!(run.document.trade_header, TradeHeader::NoTrade);
        assert!(!run.document.sector_warning);
        assert_eq!(run.display.len(), 11);
    }

    #[test]
    fn blank_dates_break_the_input_contract() {
        let engine = StockCheck::new(EngineConfig::default());
        let mut inp = input(make_mock_universe(250));
        inp.current_date = String::new();
        let err = engine.run(&inp).unwrap_err();
        assert!(matches!(err, StockCheckError::InputContract { field } if field == "current_date"));
    }

    #[test]
    fn required_tickers_lists_primary_then_appended() {
        let engine = StockCheck::new(EngineConfig::default());
        let tickers = engine.required_tickers(&make_mock_universe(250)).unwrap();
        assert_eq!(tickers.len(), 11);
        assert_eq!(tickers[0], "T000");
        assert_eq!(tickers[9], "T009");
        assert_eq!(tickers[10], "INTC");
    }

    #[test]
    fn pricing_only_the_required_tickers_is_enough() {
        let engine = StockCheck::new(EngineConfig::default());
        let universe = make_mock_universe(250);
        let prices: PriceMap = engine
            .required_tickers(&universe)
            .unwrap()
            .into_iter()
            .map(|t| (t, 42.0))
            .collect();
        let run = engine
            .run(&StockCheckInput {
                current_date: "2026-02-14".into(),
                prediction_date: "2026-02-15".into(),
                universe,
                prices,
                manual_override: false,
            })
            .unwrap();
        assert_eq!(run.document.results.len(), 11);
    }
}
