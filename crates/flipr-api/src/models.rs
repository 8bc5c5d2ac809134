// Flipr API response types
//
// The survey payload is an open record: every field may be missing, and
// the cloud has been seen to send `null` or the wrong JSON type for a
// reading when a sensor is unavailable. Fields are decoded leniently so a
// bad field reads as absent instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode an optional field, turning a type mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

// ── Survey ───────────────────────────────────────────────────────────

/// Latest survey from `GET /modules/{serial}/survey/last`.
///
/// ```json
/// {
///   "DateTime": "2021-06-01T08:15:00Z",
///   "Temperature": 24.5,
///   "Battery": { "Deviation": 0.87 },
///   "Desinfectant": { "Label": "Chlore", "Deviation": 0.1, "DeviationSector": "Medium" },
///   "PH": { "Value": 7.2, "Deviation": -0.05, "DeviationSector": "Medium" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSurvey {
    #[serde(default, deserialize_with = "lenient")]
    pub date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub battery: Option<RawBattery>,
    #[serde(default, deserialize_with = "lenient")]
    pub cloud_coverage: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub uv_index: Option<f64>,
    /// Water temperature in degrees Celsius.
    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<f64>,
    /// Spelled the French way by the API.
    #[serde(default, deserialize_with = "lenient")]
    pub desinfectant: Option<RawDesinfectant>,
    #[serde(default, rename = "PH", deserialize_with = "lenient")]
    pub ph: Option<RawPh>,
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<RawSource>,
    /// Catch-all for fields not modelled here (redox, conductivity, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl RawSurvey {
    /// Read a survey out of an arbitrary JSON value.
    ///
    /// Anything that is not a JSON object yields an empty survey.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// `Battery` block. `Deviation` carries the charge level as a 0..=1
/// fraction despite its name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBattery {
    #[serde(default, deserialize_with = "lenient")]
    pub deviation: Option<f64>,
}

/// `Desinfectant` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawDesinfectant {
    /// French product label: `Chlore`, `Brome` or `Sel`.
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub deviation: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub deviation_sector: Option<String>,
}

/// `PH` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPh {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub deviation: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub deviation_sector: Option<String>,
}

/// `Source` field: either a bare numeric code or an object carrying `Id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSource {
    Code(i64),
    Object {
        #[serde(default, rename = "Id", deserialize_with = "lenient")]
        id: Option<i64>,
        #[serde(default, rename = "Label", deserialize_with = "lenient")]
        label: Option<String>,
    },
}

impl RawSource {
    /// The numeric source code, when present.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Object { id, .. } => *id,
        }
    }
}
