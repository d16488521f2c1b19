//! Report generation port trait.

use crate::domain::error::StockCheckError;
use crate::domain::stock_check::StockCheckRun;
use std::fs;
use std::path::Path;

/// Port for rendering a finished Stock Check run.
pub trait ReportPort {
    fn render(&self, run: &StockCheckRun) -> Result<String, StockCheckError>;

    /// Default implementation: writes `render` output to `output_path`.
    fn write(&self, run: &StockCheckRun, output_path: &Path) -> Result<(), StockCheckError> {
        let content = self.render(run)?;
        fs::write(output_path, content).map_err(|e| StockCheckError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }
}
