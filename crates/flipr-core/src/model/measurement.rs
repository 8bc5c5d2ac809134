// ── Measurement domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::chemistry::{DeviationReading, Disinfectant, DisinfectantType, Ph};
use super::units::TemperatureUnit;

/// How a survey reached the cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[strum(to_string = "sigfox")]
    Sigfox,
    #[strum(to_string = "bluetooth")]
    Bluetooth,
    #[strum(to_string = "edited by hand")]
    EditedByHand,
}

impl DataSource {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Sigfox),
            1 => Some(Self::Bluetooth),
            10 => Some(Self::EditedByHand),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Sigfox => 0,
            Self::Bluetooth => 1,
            Self::EditedByHand => 10,
        }
    }
}

/// One survey of a Flipr device, as typed readings.
///
/// Values are stored as the device reports them (fractions, Celsius) and
/// converted on read. Built by [`Measurement::from_payload`] or from a
/// [`flipr_api::RawSurvey`]; immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub(crate) captured_at: Option<DateTime<Utc>>,
    /// Charge level, 0..=1.
    pub(crate) battery_level: Option<f64>,
    /// Sky cover, 0..=1.
    pub(crate) cloud_coverage: Option<f64>,
    pub(crate) uv_index: Option<f64>,
    /// Water temperature, Celsius.
    pub(crate) temperature: Option<f64>,
    pub(crate) disinfectant: Disinfectant,
    pub(crate) ph: Ph,
    pub(crate) source: Option<DataSource>,
}

fn fraction_or_percent(value: Option<f64>, raw: bool) -> Option<f64> {
    if raw {
        value
    } else {
        value.map(|fraction| fraction * 100.0)
    }
}

impl Measurement {
    /// When the device took the readings.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at
    }

    /// Battery level: the 0..=1 fraction when `raw`, otherwise a percentage.
    pub fn battery_level(&self, raw: bool) -> Option<f64> {
        fraction_or_percent(self.battery_level, raw)
    }

    /// Cloud coverage: the 0..=1 fraction when `raw`, otherwise a percentage.
    pub fn cloud_coverage(&self, raw: bool) -> Option<f64> {
        fraction_or_percent(self.cloud_coverage, raw)
    }

    pub fn uv_index(&self) -> Option<f64> {
        self.uv_index
    }

    /// Water temperature in the requested unit.
    pub fn temperature(&self, unit: TemperatureUnit) -> Option<f64> {
        self.temperature.map(|celsius| unit.convert_celsius(celsius))
    }

    pub fn disinfectant(&self) -> &Disinfectant {
        &self.disinfectant
    }

    pub fn disinfectant_type(&self) -> Option<DisinfectantType> {
        self.disinfectant.kind()
    }

    /// Raw disinfectant deviation when `raw`, otherwise its sector.
    pub fn disinfectant_deviation(&self, raw: bool) -> DeviationReading {
        self.disinfectant.reading(raw)
    }

    pub fn ph(&self) -> &Ph {
        &self.ph
    }

    pub fn ph_value(&self) -> Option<f64> {
        self.ph.value()
    }

    /// Raw pH deviation when `raw`, otherwise its sector.
    pub fn ph_deviation(&self, raw: bool) -> DeviationReading {
        self.ph.reading(raw)
    }

    pub fn source(&self) -> Option<DataSource> {
        self.source
    }
}
