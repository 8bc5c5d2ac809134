//! Measure command: latest survey of a device.

use chrono::{DateTime, Utc};
use serde::Serialize;

use flipr_core::{
    DataSource, DeviationReading, DisinfectantType, Flipr, Measurement, TemperatureUnit,
};

use crate::cli::MeasureArgs;
use crate::config::{self, Settings};
use crate::error::CliError;
use crate::output::{self, FieldRow};

// ── View ────────────────────────────────────────────────────────────

/// A measurement read in one unit and one raw/normalized mode.
#[derive(Debug, Serialize)]
struct MeasurementView {
    captured_at: Option<DateTime<Utc>>,
    temperature: Option<f64>,
    unit: TemperatureUnit,
    ph: Option<f64>,
    ph_deviation: DeviationReading,
    disinfectant: Option<DisinfectantType>,
    disinfectant_deviation: DeviationReading,
    battery: Option<f64>,
    cloud_coverage: Option<f64>,
    uv_index: Option<f64>,
    source: Option<DataSource>,
    raw: bool,
}

impl MeasurementView {
    fn new(m: &Measurement, unit: TemperatureUnit, raw: bool) -> Self {
        Self {
            captured_at: m.captured_at(),
            temperature: m.temperature(unit),
            unit,
            ph: m.ph_value(),
            ph_deviation: m.ph_deviation(raw),
            disinfectant: m.disinfectant_type(),
            disinfectant_deviation: m.disinfectant_deviation(raw),
            battery: m.battery_level(raw),
            cloud_coverage: m.cloud_coverage(raw),
            uv_index: m.uv_index(),
            source: m.source(),
            raw,
        }
    }

    fn table_rows(&self, color: bool) -> Vec<FieldRow> {
        vec![
            FieldRow::new(
                "Captured",
                or_dash(self.captured_at, |t| {
                    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
                }),
            ),
            FieldRow::new(
                "Temperature",
                or_dash(self.temperature, |t| format!("{t:.1} {}", self.unit.symbol())),
            ),
            FieldRow::new("pH", or_dash(self.ph, |v| format!("{v:.2}"))),
            FieldRow::new("pH deviation", reading(self.ph_deviation, color)),
            FieldRow::new("Disinfectant", or_dash(self.disinfectant, |d| d.to_string())),
            FieldRow::new(
                "Disinfectant deviation",
                reading(self.disinfectant_deviation, color),
            ),
            FieldRow::new("Battery", self.fraction(self.battery)),
            FieldRow::new("Cloud coverage", self.fraction(self.cloud_coverage)),
            FieldRow::new("UV index", or_dash(self.uv_index, |v| format!("{v:.1}"))),
            FieldRow::new("Source", or_dash(self.source, |s| s.to_string())),
        ]
    }

    fn plain_rows(&self) -> Vec<FieldRow> {
        vec![
            FieldRow::new(
                "captured_at",
                or_dash(self.captured_at, |t| t.to_rfc3339()),
            ),
            FieldRow::new("temperature", or_dash(self.temperature, |v| v.to_string())),
            FieldRow::new("unit", self.unit.to_string()),
            FieldRow::new("ph", or_dash(self.ph, |v| v.to_string())),
            FieldRow::new("ph_deviation", reading(self.ph_deviation, false)),
            FieldRow::new("disinfectant", or_dash(self.disinfectant, |d| d.to_string())),
            FieldRow::new(
                "disinfectant_deviation",
                reading(self.disinfectant_deviation, false),
            ),
            FieldRow::new("battery", or_dash(self.battery, |v| v.to_string())),
            FieldRow::new("cloud_coverage", or_dash(self.cloud_coverage, |v| v.to_string())),
            FieldRow::new("uv_index", or_dash(self.uv_index, |v| v.to_string())),
            FieldRow::new("source", or_dash(self.source, |s| s.to_string())),
        ]
    }

    fn fraction(&self, value: Option<f64>) -> String {
        if self.raw {
            or_dash(value, |v| format!("{v:.2}"))
        } else {
            or_dash(value, |v| format!("{v:.0}%"))
        }
    }
}

fn or_dash<T>(value: Option<T>, fmt: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| "-".into(), fmt)
}

fn reading(value: DeviationReading, color: bool) -> String {
    match value {
        DeviationReading::Raw(raw) => or_dash(raw, |v| format!("{v:+.2}")),
        DeviationReading::Sector(sector) => output::paint_deviation(sector, color),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(flipr: &Flipr, args: MeasureArgs, settings: &Settings) -> Result<(), CliError> {
    let unit = config::resolve_unit(args.unit, &settings.defaults);

    let measurement = flipr.last_measurement().await?;
    let view = MeasurementView::new(&measurement, unit, args.raw);

    let color = output::should_color(&settings.color);
    let out = output::render_single(
        &settings.output,
        &view,
        |v| output::render_fields(&v.table_rows(color)),
        |v| output::render_plain(&v.plain_rows()),
    );
    output::print_output(&out, settings.quiet);
    Ok(())
}
