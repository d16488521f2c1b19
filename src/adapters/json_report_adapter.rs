//! JSON report adapter: the output document exactly as the contract
//! defines it, pretty-printed.

use crate::domain::error::StockCheckError;
use crate::domain::stock_check::StockCheckRun;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn render(&self, run: &StockCheckRun) -> Result<String, StockCheckError> {
        let mut out =
            serde_json::to_string_pretty(&run.document).map_err(|e| StockCheckError::Report {
                reason: format!("JSON serialization failed: {e}"),
            })?;
        out.push('\n');
        Ok(out)
    }
}
