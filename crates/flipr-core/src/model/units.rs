// ── Units ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Temperature scale for [`Measurement::temperature`](super::Measurement::temperature).
///
/// Parses case-insensitively from the full name or its initial
/// (`"fahrenheit"`, `"F"`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum TemperatureUnit {
    #[default]
    #[strum(to_string = "celsius", serialize = "c")]
    Celsius,
    #[strum(to_string = "fahrenheit", serialize = "f")]
    Fahrenheit,
    #[strum(to_string = "kelvin", serialize = "k")]
    Kelvin,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit.
    pub fn convert_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Self::Kelvin => celsius + 273.15,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_initials() {
        assert_eq!("celsius".parse(), Ok(TemperatureUnit::Celsius));
        assert_eq!("Fahrenheit".parse(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("K".parse(), Ok(TemperatureUnit::Kelvin));
        assert!("rankine".parse::<TemperatureUnit>().is_err());
    }

    #[test]
    fn displays_full_name() {
        assert_eq!(TemperatureUnit::Kelvin.to_string(), "kelvin");
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }
}
