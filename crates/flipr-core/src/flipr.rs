// ── Flipr facade ──
//
// Public entry point: validates credentials, owns the API client, and
// turns "latest survey of my device" into a typed `Measurement`.

use std::fmt;

use tracing::{debug, info};

use flipr_api::{FliprClient, SessionState};

use crate::config::FliprConfig;
use crate::error::CoreError;
use crate::model::Measurement;

/// Client for one Flipr account.
///
/// Construction is synchronous and makes no request. The password exchange
/// happens on the first call that needs a token, or eagerly through
/// [`connect()`](Self::connect) when bad credentials should surface before
/// the first read.
pub struct Flipr {
    config: FliprConfig,
    client: FliprClient,
}

impl fmt::Debug for Flipr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flipr")
            .field("base_url", &self.config.base_url.as_str())
            .field("username", &self.config.username)
            .field("device_serial", &self.config.device_serial)
            .finish_non_exhaustive()
    }
}

impl Flipr {
    /// Validate the configuration and build the HTTP client.
    ///
    /// Fails with [`CoreError::Config`] when the username or password is
    /// empty.
    pub fn new(config: FliprConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let client = FliprClient::new(
            config.base_url.clone(),
            config.username.clone(),
            config.password.clone(),
            &config.transport(),
        )?;
        debug!(base_url = %config.base_url, username = %config.username, "flipr client ready");

        Ok(Self { config, client })
    }

    /// Access the configuration.
    pub fn config(&self) -> &FliprConfig {
        &self.config
    }

    /// Access the underlying API client.
    pub fn client(&self) -> &FliprClient {
        &self.client
    }

    /// Authenticate now and report the resulting session.
    pub async fn connect(&self) -> Result<SessionState, CoreError> {
        self.client.authenticate().await?;
        let state = self.client.session_state().await;
        info!(username = %self.config.username, "authenticated with the Flipr cloud");
        Ok(state)
    }

    pub async fn session_state(&self) -> SessionState {
        self.client.session_state().await
    }

    /// Latest measurement of the configured device.
    pub async fn last_measurement(&self) -> Result<Measurement, CoreError> {
        let serial = self
            .config
            .device_serial()
            .ok_or_else(|| CoreError::config("You must set the deviceSerial property."))?;
        self.last_measurement_for(serial).await
    }

    /// Latest measurement of an explicit device.
    pub async fn last_measurement_for(&self, serial: &str) -> Result<Measurement, CoreError> {
        let serial = serial.trim();
        if serial.is_empty() {
            return Err(CoreError::config("device serial must not be empty"));
        }

        let survey = self.client.last_survey(serial).await?;
        let measurement = Measurement::from(survey);
        debug!(
            serial,
            captured_at = ?measurement.captured_at(),
            "mapped last survey"
        );
        Ok(measurement)
    }
}
