//! Report rendering as box-drawn tables or JSON.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{CliError, Result};

const NO_DATA: &str = "(no data)";

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Serialises `value` as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(CliError::Output)
}

/// Plain text table with right-aligned numeric columns.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; missing cells render empty.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        if let (true, Some(first)) = (self.rows.is_empty(), widths.first_mut()) {
            *first = (*first).max(NO_DATA.len());
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    /// Renders the table.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{left}{}{right}\n", segments.join(mid))
        };
        let line = |cells: &[String], header: bool| {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    if header || i == 0 || !looks_numeric(cell) {
                        format!(" {cell:<w$} ")
                    } else {
                        format!(" {cell:>w$} ")
                    }
                })
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = rule("┌", "┬", "┐");
        out.push_str(&line(&self.headers, true));
        out.push_str(&rule("├", "┼", "┤"));
        if self.rows.is_empty() {
            out.push_str(&line(&[NO_DATA.to_string()], false));
        }
        for row in &self.rows {
            out.push_str(&line(row, false));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

fn looks_numeric(cell: &str) -> bool {
    let trimmed = cell.trim_end_matches('%');
    !trimmed.is_empty() && trimmed.replace(',', "").parse::<f64>().is_ok()
}

/// Formats an amount with thousands separators and two decimals.
pub fn amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Formats a price per unit of notional.
pub fn price(value: f64) -> String {
    format!("{value:.6}")
}

/// Formats a percentage, or `n/a`.
pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_grouping() {
        assert_eq!(amount(30_000.0), "30,000.00");
        assert_eq!(amount(-1_234_567.891), "-1,234,567.89");
        assert_eq!(amount(12.5), "12.50");
        assert_eq!(amount(-0.001), "0.00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(Some(12.346)), "12.35%");
        assert_eq!(percent(None), "n/a");
    }

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(["ID", "MTM"]);
        table.row(["C-1", "30,000.00"]).row(["P-1", "-5.00"]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("│ C-1 │ 30,000.00 │"));
        assert!(lines[4].contains("│ P-1 │     -5.00 │"));
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }

    #[test]
    fn test_empty_table() {
        let rendered = Table::new(["ID"]).render();
        assert!(rendered.contains("(no data)"));
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }
}
