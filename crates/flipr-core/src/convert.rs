// ── API-to-domain conversion ──
//
// Turns the open `flipr_api::RawSurvey` record into a typed `Measurement`.
// Nothing here can fail: unreadable values become unknown, unrecognized
// labels become `None`, unrecognized sectors become `Deviation::Unknown`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

use flipr_api::models::{RawDesinfectant, RawPh, RawSurvey};

use crate::model::{DataSource, Deviation, Disinfectant, DisinfectantType, Measurement, Ph};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse the survey timestamp.
///
/// Accepts RFC 3339, an ISO timestamp with a compact `+hhmm` offset, or a
/// naive ISO timestamp, which the cloud reports in UTC.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    warn!(raw, "unparseable survey timestamp");
    None
}

/// Map the French product label to a disinfectant type. Exact match only.
pub fn map_disinfectant_label(label: &str) -> Option<DisinfectantType> {
    match label {
        "Chlore" => Some(DisinfectantType::Chlorine),
        "Brome" => Some(DisinfectantType::Bromine),
        "Sel" => Some(DisinfectantType::Salt),
        _ => None,
    }
}

/// Map a deviation sector string, ignoring ASCII case. Total: anything
/// unrecognized is `Deviation::Unknown`.
pub fn map_deviation_sector(raw: Option<&str>) -> Deviation {
    let Some(raw) = raw else {
        return Deviation::Unknown;
    };
    match raw.to_ascii_uppercase().as_str() {
        "TOOHIGH" => Deviation::TooHigh,
        "MEDIUMHIGH" => Deviation::MediumHigh,
        "MEDIUM" => Deviation::Medium,
        "MEDIUMLOW" => Deviation::MediumLow,
        "TOOLOW" => Deviation::TooLow,
        _ => Deviation::Unknown,
    }
}

// ── Blocks ─────────────────────────────────────────────────────────

impl From<RawDesinfectant> for Disinfectant {
    fn from(raw: RawDesinfectant) -> Self {
        Self {
            kind: raw.label.as_deref().and_then(map_disinfectant_label),
            deviation: raw.deviation,
            deviation_sector: map_deviation_sector(raw.deviation_sector.as_deref()),
        }
    }
}

impl From<RawPh> for Ph {
    fn from(raw: RawPh) -> Self {
        Self {
            value: raw.value,
            deviation: raw.deviation,
            deviation_sector: map_deviation_sector(raw.deviation_sector.as_deref()),
        }
    }
}

// ── Measurement ────────────────────────────────────────────────────

impl From<RawSurvey> for Measurement {
    fn from(raw: RawSurvey) -> Self {
        Self {
            captured_at: parse_datetime(raw.date_time.as_deref()),
            // `Battery.Deviation` is the charge level, not a deviation.
            battery_level: raw.battery.and_then(|b| b.deviation),
            cloud_coverage: raw.cloud_coverage,
            uv_index: raw.uv_index,
            temperature: raw.temperature,
            disinfectant: raw.desinfectant.map(Disinfectant::from).unwrap_or_default(),
            ph: raw.ph.map(Ph::from).unwrap_or_default(),
            source: raw
                .source
                .and_then(|s| s.code())
                .and_then(DataSource::from_code),
        }
    }
}

impl Measurement {
    /// Build a measurement from an untyped survey payload. Never fails.
    pub fn from_payload(payload: &Value) -> Self {
        RawSurvey::from_value(payload.clone()).into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::model::{DeviationReading, TemperatureUnit};

    fn full_payload() -> Value {
        json!({
            "DateTime": "2021-06-01T08:15:00Z",
            "Battery": { "Label": "Batterie", "Deviation": 0.5 },
            "CloudCoverage": 0.25,
            "UvIndex": 4.2,
            "Temperature": 20,
            "Desinfectant": { "Label": "Chlore", "Deviation": 0.12, "DeviationSector": "Medium" },
            "PH": { "Value": 7.2, "Deviation": -0.3, "DeviationSector": "MediumLow" },
            "Source": 0
        })
    }

    #[test]
    fn full_payload_maps_every_field() {
        let m = Measurement::from_payload(&full_payload());

        assert_eq!(
            m.captured_at(),
            Some(Utc.with_ymd_and_hms(2021, 6, 1, 8, 15, 0).unwrap())
        );
        assert_eq!(m.battery_level(true), Some(0.5));
        assert_eq!(m.battery_level(false), Some(50.0));
        assert_eq!(m.cloud_coverage(true), Some(0.25));
        assert_eq!(m.uv_index(), Some(4.2));
        assert_eq!(m.temperature(TemperatureUnit::Fahrenheit), Some(68.0));
        assert_eq!(m.disinfectant_type(), Some(DisinfectantType::Chlorine));
        assert_eq!(m.disinfectant_deviation(true), DeviationReading::Raw(Some(0.12)));
        assert_eq!(
            m.disinfectant_deviation(false),
            DeviationReading::Sector(Deviation::Medium)
        );
        assert_eq!(m.ph_value(), Some(7.2));
        assert_eq!(m.ph_deviation(true), DeviationReading::Raw(Some(-0.3)));
        assert_eq!(m.ph().deviation_sector(), Deviation::MediumLow);
        assert_eq!(m.source(), Some(DataSource::Sigfox));
    }

    #[test]
    fn each_missing_field_is_unknown_alone() {
        let keys = [
            "DateTime",
            "Battery",
            "CloudCoverage",
            "UvIndex",
            "Temperature",
            "Desinfectant",
            "PH",
            "Source",
        ];
        for key in keys {
            let mut payload = full_payload();
            if let Some(obj) = payload.as_object_mut() {
                obj.remove(key);
            }
            let m = Measurement::from_payload(&payload);

            assert_eq!(m.captured_at().is_none(), key == "DateTime", "{key}");
            assert_eq!(m.battery_level(true).is_none(), key == "Battery", "{key}");
            assert_eq!(m.cloud_coverage(true).is_none(), key == "CloudCoverage", "{key}");
            assert_eq!(m.uv_index().is_none(), key == "UvIndex", "{key}");
            assert_eq!(
                m.temperature(TemperatureUnit::Celsius).is_none(),
                key == "Temperature",
                "{key}"
            );
            assert_eq!(m.disinfectant_type().is_none(), key == "Desinfectant", "{key}");
            assert_eq!(
                m.disinfectant().deviation_sector() == Deviation::Unknown,
                key == "Desinfectant",
                "{key}"
            );
            assert_eq!(m.ph_value().is_none(), key == "PH", "{key}");
            assert_eq!(m.source().is_none(), key == "Source", "{key}");
        }
    }

    #[test]
    fn empty_payload_is_all_unknown() {
        let m = Measurement::from_payload(&json!({}));
        assert_eq!(m, Measurement::default());

        let m = Measurement::from_payload(&Value::Null);
        assert_eq!(m, Measurement::default());
    }

    #[test]
    fn nested_blocks_missing_inner_fields() {
        let m = Measurement::from_payload(&json!({
            "Battery": {},
            "Desinfectant": { "Label": "Brome" },
            "PH": { "DeviationSector": "TooHigh" }
        }));
        assert_eq!(m.battery_level(false), None);
        assert_eq!(m.disinfectant_type(), Some(DisinfectantType::Bromine));
        assert_eq!(m.disinfectant().deviation(), None);
        assert_eq!(m.disinfectant().deviation_sector(), Deviation::Unknown);
        assert_eq!(m.ph_value(), None);
        assert_eq!(m.ph().deviation_sector(), Deviation::TooHigh);
    }

    #[test]
    fn disinfectant_labels() {
        assert_eq!(map_disinfectant_label("Chlore"), Some(DisinfectantType::Chlorine));
        assert_eq!(map_disinfectant_label("Brome"), Some(DisinfectantType::Bromine));
        assert_eq!(map_disinfectant_label("Sel"), Some(DisinfectantType::Salt));
        assert_eq!(map_disinfectant_label("chlore"), None);
        assert_eq!(map_disinfectant_label("Oxygène actif"), None);
        assert_eq!(map_disinfectant_label(""), None);
    }

    #[test]
    fn deviation_sector_is_case_insensitive_and_total() {
        assert_eq!(map_deviation_sector(Some("toohigh")), Deviation::TooHigh);
        assert_eq!(map_deviation_sector(Some("TOOHIGH")), Deviation::TooHigh);
        assert_eq!(map_deviation_sector(Some("ToOhIgH")), Deviation::TooHigh);
        assert_eq!(map_deviation_sector(Some("MediumHigh")), Deviation::MediumHigh);
        assert_eq!(map_deviation_sector(Some("medium")), Deviation::Medium);
        assert_eq!(map_deviation_sector(Some("mediumLow")), Deviation::MediumLow);
        assert_eq!(map_deviation_sector(Some("TooLow")), Deviation::TooLow);
        assert_eq!(map_deviation_sector(Some("too high")), Deviation::Unknown);
        assert_eq!(map_deviation_sector(Some("nonsense")), Deviation::Unknown);
        assert_eq!(map_deviation_sector(None), Deviation::Unknown);
    }

    #[test]
    fn timestamps_with_and_without_offset() {
        let expected = Utc.with_ymd_and_hms(2021, 6, 1, 8, 15, 0).unwrap();
        assert_eq!(parse_datetime(Some("2021-06-01T10:15:00+02:00")), Some(expected));
        assert_eq!(parse_datetime(Some("2021-06-01T10:15:00+0200")), Some(expected));
        assert_eq!(parse_datetime(Some("2021-06-01T08:15:00")), Some(expected));
        assert_eq!(parse_datetime(Some("2021-06-01T08:15:00.000")), Some(expected));
        assert_eq!(parse_datetime(Some("yesterday")), None);
        assert_eq!(parse_datetime(None), None);
    }

    #[test]
    fn mistyped_values_do_not_become_zero() {
        let m = Measurement::from_payload(&json!({
            "Temperature": "n/a",
            "CloudCoverage": null,
            "Battery": { "Deviation": "full" }
        }));
        assert_eq!(m.temperature(TemperatureUnit::Kelvin), None);
        assert_eq!(m.cloud_coverage(false), None);
        assert_eq!(m.battery_level(false), None);
    }
}
