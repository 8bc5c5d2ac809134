//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits `key=value` lines.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use flipr_core::Deviation;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Paint a deviation sector: red when out of range, yellow when drifting,
/// green on target.
pub fn paint_deviation(sector: Deviation, color: bool) -> String {
    let label = sector.to_string();
    if !color {
        return label;
    }
    match sector {
        Deviation::TooLow | Deviation::TooHigh => label.red().bold().to_string(),
        Deviation::MediumLow | Deviation::MediumHigh => label.yellow().to_string(),
        Deviation::Medium => label.green().to_string(),
        Deviation::Unknown => label.dimmed().to_string(),
    }
}

// ── Key/value rows ───────────────────────────────────────────────────

/// One line of a detail view.
#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Render key/value rows as a two-column table.
pub fn render_fields(rows: &[FieldRow]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render key/value rows as `key=value` lines.
pub fn render_plain(rows: &[FieldRow]) -> String {
    rows.iter()
        .map(|row| format!("{}={}", row.field, row.value))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a single serde-serializable item in the chosen format.
///
/// Table and plain views come from the caller's `detail_fn` / `plain_fn`;
/// structured formats serialize `data` directly.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => plain_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}
