//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use altrua_domain::{GriCategory, LlmPrompt, NormalizedDisclosure, Summary};
use colored::*;
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

    /// Format a document summary.
    pub fn format_summary(&self, summary: &Summary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
            OutputFormat::Quiet => Ok(format_summary_quiet(summary)),
        }
    }

    /// Format the summary as dashboard sections.
    fn format_summary_table(&self, summary: &Summary) -> String {
        let mut out = String::new();

        out.push_str(&self.heading(&format!("GRI disclosures: {}", summary.organization)));
        out.push('\n');
        out.push_str(&format!("  Total sections:        {}\n", summary.total_sections()));
        out.push_str(&format!("  GRI categories:        {}\n", summary.distinct_categories()));
        out.push_str(&format!(
            "  Low-confidence items:  {}\n",
            summary.low_confidence_count()
        ));

        out.push('\n');
        out.push_str(&self.heading("GRI breakdown"));
        out.push('\n');
        if summary.gri_breakdown.is_empty() {
            out.push_str(&self.colorize("No GRI codes found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Category", "Topic", "Sections"]);
            for (prefix, count) in &summary.gri_breakdown {
                let topic = GriCategory::from_prefix(prefix)
                    .map(|c| c.as_str())
                    .unwrap_or("other");
                builder.push_record([prefix.as_str(), topic, &count.to_string()]);
            }
            out.push_str(&render(builder));
        }
        out.push('\n');

        out.push('\n');
        out.push_str(&self.heading("Needs review"));
        out.push('\n');
        if summary.low_confidence.is_empty() {
            out.push_str(&self.success("No low-confidence disclosures."));
        } else {
            out.push_str(&self.warning(&format!(
                "{} disclosure(s) below the confidence threshold",
                summary.low_confidence_count()
            )));
            out.push('\n');
            out.push_str(&disclosure_table(&summary.low_confidence, false));
        }
        out.push('\n');

        out.push('\n');
        out.push_str(&self.heading("Full extraction"));
        out.push('\n');
        if summary.full_extraction.is_empty() {
            out.push_str(&self.colorize("No disclosures extracted.", "yellow"));
        } else {
            out.push_str(&disclosure_table(&summary.full_extraction, true));
        }

        out
    }

    /// Format a prompt for inspection.
    pub fn format_prompt(&self, prompt: &LlmPrompt) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "system": prompt.system,
                "user": prompt.user,
            }))?),
            OutputFormat::Quiet => Ok(prompt.user.clone()),
            OutputFormat::Table => Ok(format!(
                "{}\n{}\n\n{}\n{}",
                self.heading("System"),
                prompt.system,
                self.heading("User"),
                prompt.user
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
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
            _ => text.to_string(),
        }
    }
}

/// The three headline counts, tab separated.
fn format_summary_quiet(summary: &Summary) -> String {
    format!(
        "{}\t{}\t{}",
        summary.total_sections(),
        summary.distinct_categories(),
        summary.low_confidence_count()
    )
}

fn disclosure_table(records: &[NormalizedDisclosure], with_flags: bool) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Section", "GRI Code", "Confidence"];
    if with_flags {
        header.extend(["Topics", "Review"]);
    }
    builder.push_record(header);

    for record in records {
        let mut row = vec![
            record.section.clone().unwrap_or_else(|| "-".to_string()),
            record.gri_code.clone().unwrap_or_else(|| "-".to_string()),
            format_confidence(record.confidence),
        ];
        if with_flags {
            let topics: Vec<&str> = record.categories().iter().map(|c| c.as_str()).collect();
            row.push(if topics.is_empty() {
                "-".to_string()
            } else {
                topics.join(", ")
            });
            row.push(if record.low_confidence { "yes" } else { "" }.to_string());
        }
        builder.push_record(row);
    }

    render(builder)
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn format_confidence(confidence: Option<f64>) -> String {
    confidence
        .map(|c| format!("{:.2}", c))
        .unwrap_or_else(|| "-".to_string())
}
