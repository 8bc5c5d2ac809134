// ── Water chemistry types ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// Coarse bucket for how far a chemical reading sits from its target.
///
/// The numeric codes are the ones used by the Flipr apps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    #[default]
    #[strum(to_string = "unknown")]
    Unknown,
    #[strum(to_string = "too low")]
    TooLow,
    #[strum(to_string = "medium low")]
    MediumLow,
    #[strum(to_string = "medium")]
    Medium,
    #[strum(to_string = "medium high")]
    MediumHigh,
    #[strum(to_string = "too high")]
    TooHigh,
}

impl Deviation {
    pub fn code(self) -> i8 {
        match self {
            Self::Unknown => -1,
            Self::TooLow => 0,
            Self::MediumLow => 5,
            Self::Medium => 10,
            Self::MediumHigh => 15,
            Self::TooHigh => 20,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Outside the acceptable band on either side.
    pub fn needs_attention(self) -> bool {
        matches!(self, Self::TooLow | Self::TooHigh)
    }
}

/// Disinfectant product in use in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum DisinfectantType {
    Chlorine,
    Bromine,
    Salt,
}

/// A deviation read either as the raw -1..=1 value or as its sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviationReading {
    Raw(Option<f64>),
    Sector(Deviation),
}

/// Disinfectant block of a measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Disinfectant {
    pub(crate) kind: Option<DisinfectantType>,
    pub(crate) deviation: Option<f64>,
    pub(crate) deviation_sector: Deviation,
}

impl Disinfectant {
    pub fn kind(&self) -> Option<DisinfectantType> {
        self.kind
    }

    /// Raw deviation from target, -1..=1.
    pub fn deviation(&self) -> Option<f64> {
        self.deviation
    }

    pub fn deviation_sector(&self) -> Deviation {
        self.deviation_sector
    }

    pub fn reading(&self, raw: bool) -> DeviationReading {
        if raw {
            DeviationReading::Raw(self.deviation)
        } else {
            DeviationReading::Sector(self.deviation_sector)
        }
    }
}

/// pH block of a measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ph {
    pub(crate) value: Option<f64>,
    pub(crate) deviation: Option<f64>,
    pub(crate) deviation_sector: Deviation,
}

impl Ph {
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Raw deviation from target, -1..=1.
    pub fn deviation(&self) -> Option<f64> {
        self.deviation
    }

    pub fn deviation_sector(&self) -> Deviation {
        self.deviation_sector
    }

    pub fn reading(&self, raw: bool) -> DeviationReading {
        if raw {
            DeviationReading::Raw(self.deviation)
        } else {
            DeviationReading::Sector(self.deviation_sector)
        }
    }
}
