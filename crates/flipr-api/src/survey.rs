// Survey endpoints
//
// Device-scoped reads under `/modules/{serial}/`.

use tracing::debug;

use crate::client::FliprClient;
use crate::error::Error;
use crate::models::RawSurvey;

impl FliprClient {
    /// Fetch the most recent survey of a device.
    ///
    /// `GET /modules/{serial}/survey/last`. The body is read as an open
    /// record; only transport, status and invalid-JSON failures are errors.
    pub async fn last_survey(&self, serial: &str) -> Result<RawSurvey, Error> {
        debug!(serial, "fetching last survey");
        let value = self.get_json(&format!("/modules/{serial}/survey/last")).await?;
        Ok(RawSurvey::from_value(value))
    }
}
