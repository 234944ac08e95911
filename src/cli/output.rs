//! Output formatting helpers for CLI commands

use crate::cli::OutputFormat;
use crate::engine::DecisionRecord;
use crate::inputs::METRIC_SENTINEL;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Render a decision in the requested format
pub fn render(record: &DecisionRecord, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Provider => record.chosen().to_string(),
        OutputFormat::Json => format_record_json(record)?,
        OutputFormat::Env => record.export_lines().join("\n"),
        OutputFormat::Table => format_record_table(record),
    })
}

/// Format the record as pretty JSON
pub fn format_record_json(record: &DecisionRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Format the record as a summary line plus a per-provider table
pub fn format_record_table(record: &DecisionRecord) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Provider", "Eligible", "Credit", "RPO (s)", "RTO (s)", "Latency", "Score",
    ]);

    let inputs = record.inputs();
    for (provider, eligible) in record.eligible() {
        let metrics = inputs.metrics.get(provider).copied().unwrap_or_default();
        let credit = inputs.credits.get(provider).copied().unwrap_or(0.0);
        let eligible_str = if *eligible {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        let score = record
            .scores()
            .get(provider)
            .map(|s| format!("{:.6}", s))
            .unwrap_or_else(|| "-".to_string());
        let marker = if *provider == record.chosen() { " *" } else { "" };

        table.add_row(vec![
            Cell::new(format!("{}{}", provider, marker)),
            Cell::new(eligible_str),
            Cell::new(format!("{:.2}", credit)),
            Cell::new(metric_cell(metrics.rpo_seconds, "")),
            Cell::new(metric_cell(metrics.rto_seconds, "")),
            Cell::new(metric_cell(metrics.latency_ms, "ms")),
            Cell::new(score),
        ]);
    }

    let reason = if record.is_degraded() {
        record.reason().to_string().yellow().to_string()
    } else {
        record.reason().to_string().green().to_string()
    };

    format!(
        "Chosen: {} ({})  at {}\n{}",
        record.chosen().to_string().bold(),
        reason,
        record.timestamp_utc(),
        table
    )
}

fn metric_cell(value: f64, unit: &str) -> String {
    if value >= METRIC_SENTINEL {
        "n/a".to_string()
    } else {
        format!("{}{}", value, unit)
    }
}
