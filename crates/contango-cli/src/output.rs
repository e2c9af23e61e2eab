//! Output formatting utilities.
//!
//! Tables go to stdout in the selected [`OutputFormat`]; status lines go to
//! stderr so that piped CSV or JSON stays clean.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Placeholder for an absent value.
const MISSING: &str = "-";

/// Prints `rows` in the requested format.
pub fn print_output<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
            Ok(())
        }
        OutputFormat::Csv => print_csv(rows),
        OutputFormat::Minimal => {
            // rows are date-ordered, the last one is the most recent
            if let Some(last) = rows.last() {
                println!("{}", serde_json::to_string(last)?);
            }
            Ok(())
        }
    }
}

fn print_table<T: Tabled>(rows: &[T]) -> anyhow::Result<()> {
    if rows.is_empty() {
        println!("No rows.");
        return Ok(());
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();
    println!("{table}");
    Ok(())
}

fn print_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a fractional change as a signed percentage, `-` when missing.
pub fn format_change(change: Option<Decimal>) -> String {
    change.map_or_else(
        || MISSING.to_string(),
        |c| format!("{:+.2}%", c * Decimal::ONE_HUNDRED),
    )
}

/// Prints a success line to stderr.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints a warning line to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a section title.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A labelled value in a summary table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// Creates a key-value pair from an optional value, `-` when absent.
    pub fn optional(key: impl Into<String>, value: Option<impl ToString>) -> Self {
        Self {
            key: key.into(),
            value: value.map_or_else(|| MISSING.to_string(), |v| v.to_string()),
        }
    }
}
