//! CSV report adapter: display-ordered rows under the canonical headers.

use crate::domain::display::CANONICAL_COLUMNS;
use crate::domain::error::StockCheckError;
use crate::domain::output::RankedResult;
use crate::domain::stock_check::StockCheckRun;
use crate::ports::report_port::ReportPort;
use csv::Writer;

pub struct CsvReportAdapter;

fn cells(r: &RankedResult) -> [String; 10] {
    [
        r.rank.to_string(),
        r.ticker.clone(),
        r.company_name.clone(),
        r.sector.clone(),
        format!("{:.2}", r.current_price),
        format!("{:.2}", r.predicted_price),
        format!("{:.4}", r.predicted_growth_pct),
        format!("{:.4}", r.three_month),
        format!("{:.4}", r.six_month),
        format!("{:.4}", r.twelve_month),
    ]
}

impl ReportPort for CsvReportAdapter {
    fn render(&self, run: &StockCheckRun) -> Result<String, StockCheckError> {
        let to_err = |e: csv::Error| StockCheckError::Report {
            reason: format!("CSV write failed: {e}"),
        };
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(CANONICAL_COLUMNS).map_err(to_err)?;
        for r in &run.display {
            writer.write_record(cells(r)).map_err(to_err)?;
        }
        let bytes = writer.into_inner().map_err(|e| StockCheckError::Report {
            reason: format!("CSV flush failed: {e}"),
        })?;
        String::from_utf8(bytes).map_err(|e| StockCheckError::Report {
            reason: format!("CSV output is not UTF-8: {e}"),
        })
    }
}
