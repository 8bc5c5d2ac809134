//! Typed access to a Flipr pool monitor between `flipr-api` and consumers.
//!
//! - **[`Flipr`]**: facade for one account: validates credentials at
//!   construction, authenticates lazily (or eagerly via
//!   [`connect()`](Flipr::connect)), and fetches the latest survey of a
//!   device as a [`Measurement`].
//!
//! - **[`Measurement`]**: immutable snapshot of one survey. Every reading
//!   is optional; conversions (percentages, temperature units, deviation
//!   sectors) happen on read.
//!
//! - **Mapping** ([`convert`]): total conversion from the raw API record:
//!   missing or malformed fields become unknown, never errors.

pub mod config;
pub mod convert;
pub mod error;
pub mod flipr;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{FliprConfig, TlsVerification};
pub use error::CoreError;
pub use flipr::Flipr;
pub use flipr_api::SessionState;

pub use model::{
    DataSource, Deviation, DeviationReading, Disinfectant, DisinfectantType, Measurement, Ph,
    TemperatureUnit,
};
