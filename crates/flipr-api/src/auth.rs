// Password-grant authentication
//
// Exchanges the account credentials for a bearer token at `/OAuth2/token`
// and keeps the client's session fresh. Only HTTP 200 counts as success.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::client::FliprClient;
use crate::error::{Error, body_preview};
use crate::session::Session;

const TOKEN_PATH: &str = "/OAuth2/token";

/// Successful response of the password exchange.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Token lifetime in seconds.
    expires: i64,
}

impl FliprClient {
    /// Perform the password exchange and store the new token.
    ///
    /// On failure the previous session is left as it was.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let mut session = self.session.lock().await;
        self.login(&mut session).await.map(|_| ())
    }

    /// Make sure a usable token is held, authenticating if it is missing
    /// or expired.
    pub async fn ensure_valid_session(&self) -> Result<(), Error> {
        self.bearer_token().await.map(|_| ())
    }

    /// A valid bearer token, refreshed under the session lock if needed.
    pub(crate) async fn bearer_token(&self) -> Result<SecretString, Error> {
        let mut session = self.session.lock().await;
        if let Some(token) = session.valid_token_at(Utc::now()) {
            trace!("reusing bearer token");
            return Ok(token.clone());
        }

        debug!("no valid token, authenticating");
        self.login(&mut session).await
    }

    /// Run the exchange and return the token it issued.
    ///
    /// The issued token is handed to the pending request even when its
    /// lifetime is zero; the next request will authenticate again.
    async fn login(&self, session: &mut Session) -> Result<SecretString, Error> {
        let url = self.endpoint_url(TOKEN_PATH)?;
        debug!(username = self.username(), "logging in at {}", url);

        let form = [
            ("grant_type", "password"),
            ("username", self.username()),
            ("password", self.password().expose_secret()),
        ];

        let resp = self
            .http()
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {}", body_preview(&body)),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("invalid token response: {e}"),
                body: body_preview(&body),
            })?;

        let access_token = SecretString::from(token.access_token);
        session.store(access_token.clone(), token.expires, Utc::now());
        debug!(expires_in = token.expires, "login successful");
        Ok(access_token)
    }
}
