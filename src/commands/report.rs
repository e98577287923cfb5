//! Rendering of check outcomes as a console table or JSON

use anyhow::Result;
use serde::Serialize;

use crate::check::{BranchComparison, CheckOutcome, PipelineError};

const HEADERS: [&str; 4] = ["STATUS", "REPOSITORY", "BRANCH", "INFO"];
const COLUMN_GAP: &str = "  ";
const ERROR_SYMBOL: &str = "🔴";

/// One printed line of the report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub symbol: String,
    pub status: String,
    pub repository: String,
    pub branch: String,
    pub info: String,
}

/// Raw git stderr can span several lines; a row must stay on one
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ReportRow {
    fn from_comparison(comparison: &BranchComparison) -> Self {
        Self {
            symbol: comparison.status.symbol().to_string(),
            status: single_line(comparison.status.text()),
            repository: comparison.directory.clone(),
            branch: comparison.branch_name.clone(),
            info: comparison.info(),
        }
    }

    fn from_error(error: &PipelineError) -> Self {
        if let Some(comparison) = &error.comparison {
            return Self::from_comparison(comparison);
        }
        Self {
            symbol: ERROR_SYMBOL.to_string(),
            status: single_line(&error.message),
            repository: error.directory.clone(),
            branch: error.branch_name.clone().unwrap_or_default(),
            info: String::new(),
        }
    }

    fn status_cell(&self) -> String {
        format!("{} {}", self.symbol, self.status)
    }
}

impl From<&CheckOutcome> for ReportRow {
    fn from(outcome: &CheckOutcome) -> Self {
        match outcome {
            Ok(comparison) => Self::from_comparison(comparison),
            Err(error) => Self::from_error(error),
        }
    }
}

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn push_line(out: &mut String, cells: [&str; 4], widths: [usize; 4]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        if i + 1 < cells.len() {
            line.push_str(&" ".repeat(widths[i].saturating_sub(width(cell))));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders one row per outcome, columns padded to the widest cell
pub fn render_table(outcomes: &[CheckOutcome]) -> String {
    let rows: Vec<ReportRow> = outcomes.iter().map(ReportRow::from).collect();
    // Header status is indented to line up with the text after the symbol
    let status_header = format!("   {}", HEADERS[0]);

    let mut widths = [
        width(&status_header),
        width(HEADERS[1]),
        width(HEADERS[2]),
        width(HEADERS[3]),
    ];
    for row in &rows {
        widths[0] = widths[0].max(width(&row.status_cell()));
        widths[1] = widths[1].max(width(&row.repository));
        widths[2] = widths[2].max(width(&row.branch));
        widths[3] = widths[3].max(width(&row.info));
    }

    let mut out = String::new();
    push_line(
        &mut out,
        [&status_header, HEADERS[1], HEADERS[2], HEADERS[3]],
        widths,
    );
    for row in &rows {
        push_line(
            &mut out,
            [&row.status_cell(), &row.repository, &row.branch, &row.info],
            widths,
        );
    }
    out
}

#[derive(Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
enum JsonEntry<'a> {
    Ok(&'a BranchComparison),
    Error(&'a PipelineError),
}

/// Renders outcomes as a pretty-printed JSON array
pub fn render_json(outcomes: &[CheckOutcome]) -> Result<String> {
    let entries: Vec<JsonEntry<'_>> = outcomes
        .iter()
        .map(|outcome| match outcome {
            Ok(comparison) => JsonEntry::Ok(comparison),
            Err(error) => JsonEntry::Error(error),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}
