//! Plain-text report: header banner plus a fixed-width table in display
//! order under the canonical column headers.

use crate::domain::display::CANONICAL_COLUMNS;
use crate::domain::error::StockCheckError;
use crate::domain::output::RankedResult;
use crate::domain::stock_check::StockCheckRun;
use crate::ports::report_port::ReportPort;
use std::fmt::Write;

pub struct TextReportAdapter;

fn format_pct(v: f64) -> String {
    let sign = if v >= 0.0 { "+" } else { "" };
    format!("{sign}{v:.2}%")
}

fn format_money(v: f64) -> String {
    format!("${v:.2}")
}

fn row_cells(r: &RankedResult) -> Vec<String> {
    vec![
        r.rank.to_string(),
        r.ticker.clone(),
        r.company_name.clone(),
        r.sector.clone(),
        format_money(r.current_price),
        format_money(r.predicted_price),
        format_pct(r.predicted_growth_pct),
        format_pct(r.three_month),
        format_pct(r.six_month),
        format_pct(r.twelve_month),
    ]
}

/// Left-align text columns, right-align numeric ones.
fn is_numeric_column(idx: usize) -> bool {
    idx == 0 || idx >= 4
}

pub fn render_table(rows: &[RankedResult]) -> String {
    let body: Vec<Vec<String>> = rows.iter().map(row_cells).collect();
    let widths: Vec<usize> = CANONICAL_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if is_numeric_column(i) {
                    format!("{c:>w$}", w = widths[i])
                } else {
                    format!("{c:<w$}", w = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = CANONICAL_COLUMNS.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&render_line(&header[..]));
    out.push('\n');
    let rule_width: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    for cells in &body {
        out.push_str(&render_line(&cells[..]));
        out.push('\n');
    }
    out
}

impl ReportPort for TextReportAdapter {
    fn render(&self, run: &StockCheckRun) -> Result<String, StockCheckError> {
        let doc = &run.document;
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", doc.model_version);
        let _ = writeln!(
            out,
            "Current date: {}  Prediction date: {}",
            doc.current_date, doc.prediction_date
        );
        let _ = writeln!(out, "Header: {}", doc.trade_header);
        if doc.sector_warning {
            let _ = writeln!(out, "Sector warning: one sector holds most of the top picks");
        }
        out.push('\n');
        out.push_str(&render_table(&run.display));
        Ok(out)
    }
}
