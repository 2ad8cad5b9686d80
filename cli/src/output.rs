//! Output formatting for validation snapshots and registry listings.

use uri_scheme_core::{SchemeRecord, SchemeSnapshot};

/// Supported output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Formats a validation snapshot in the requested output format.
pub fn format_snapshot(snapshot: &SchemeSnapshot, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(snapshot).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(snapshot_to_text(snapshot)),
    }
}

/// Formats registry records in the requested output format.
pub fn format_records(records: &[SchemeRecord], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(records).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(records_to_text(records)),
    }
}

fn snapshot_to_text(snapshot: &SchemeSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("scheme:    {}\n", display_or_dash(&snapshot.raw_text)));
    out.push_str(&format!("relative:  {}\n", snapshot.is_relative_reference));
    out.push_str(&format!("valid:     {}\n", snapshot.is_valid));
    if !snapshot.error_message.is_empty() {
        out.push_str(&format!("error:     {}\n", snapshot.error_message));
    }
    match (&snapshot.selected_id, &snapshot.selected_value) {
        (Some(id), Some(value)) => out.push_str(&format!("selected:  {value} (id {id})\n")),
        _ => out.push_str("selected:  -\n"),
    }
    out
}

fn records_to_text(records: &[SchemeRecord]) -> String {
    let width = records
        .iter()
        .map(|r| r.value().chars().count())
        .max()
        .unwrap_or(0)
        .max("SCHEME".len());

    let mut out = format!("{:>4}  {:<width$}  KIND\n", "ID", "SCHEME");
    for record in records {
        let kind = if record.is_builtin() { "built-in" } else { "custom" };
        out.push_str(&format!("{:>4}  {:<width$}  {kind}\n", record.id(), record.value()));
    }
    out
}

fn display_or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}
