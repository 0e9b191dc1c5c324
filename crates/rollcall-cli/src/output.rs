//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use rollcall_domain::TableRow;
use rollcall_extractor::BatchReport;
use rollcall_store::format_timestamp;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format table rows.
    pub fn format_rows(&self, rows: &[TableRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_rows_json(rows),
            OutputFormat::Table => Ok(self.format_rows_table(rows)),
            OutputFormat::Quiet => Ok(rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join("\n")),
        }
    }

    fn format_rows_json(&self, rows: &[TableRow]) -> Result<String> {
        let json_rows: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "name": row.name,
                    "interests": row.interests.as_slice(),
                    "last_updated": format_timestamp(row.last_updated),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_rows)?)
    }

    fn format_rows_table(&self, rows: &[TableRow]) -> String {
        if rows.is_empty() {
            return self.colorize("No people recorded yet.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Name", "Interests", "Last updated"]);

        for row in rows {
            builder.push_record([
                row.name.clone(),
                row.interests.to_string(),
                format_timestamp(row.last_updated),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a batch report.
    pub fn format_report(&self, report: &BatchReport, table: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.row_count.to_string()),
            OutputFormat::Table => Ok(self.format_report_text(report, table)),
        }
    }

    fn format_report_text(&self, report: &BatchReport, table: &str) -> String {
        let mut lines = Vec::new();

        for name in &report.inserted {
            lines.push(self.colorize(&format!("+ Added: {}", name), "green"));
        }
        for name in &report.updated {
            lines.push(self.colorize(&format!("~ Updated: {}", name), "cyan"));
        }
        for failure in &report.failures {
            lines.push(self.error(&format!("{}: {}", failure.path.display(), failure.error)));
        }

        lines.push(self.info(&format!(
            "{} of {} file(s) processed successfully, {} record(s) merged",
            report.files_succeeded(),
            report.files_processed,
            report.records_merged
        )));

        let summary = format!("{} now holds {} row(s)", table, report.row_count);
        if report.is_clean() {
            lines.push(self.success(&summary));
        } else {
            lines.push(self.warning(&format!("{} ({} file(s) failed)", summary, report.failures.len())));
        }

        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
