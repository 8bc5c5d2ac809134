// ── Domain model ──
//
// Canonical, typed view of a Flipr survey. Every reading is optional:
// a missing or unreadable value is `None` (or `Deviation::Unknown`),
// never a zero.

pub mod chemistry;
pub mod measurement;
pub mod units;

// ── Re-exports ──────────────────────────────────────────────────────

pub use chemistry::{Deviation, DeviationReading, Disinfectant, DisinfectantType, Ph};
pub use measurement::{DataSource, Measurement};
pub use units::TemperatureUnit;
