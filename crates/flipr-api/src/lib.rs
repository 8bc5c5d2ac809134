// flipr-api: Async Rust client for the Flipr pool monitor cloud API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod survey;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, FliprClient};
pub use error::Error;
pub use models::{RawBattery, RawDesinfectant, RawPh, RawSource, RawSurvey};
pub use session::{Session, SessionState};
pub use transport::{TlsMode, TransportConfig};
