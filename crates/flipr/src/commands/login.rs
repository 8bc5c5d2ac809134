//! Login command: a credential check that reports the session lifetime.

use chrono::{DateTime, Utc};
use serde::Serialize;

use flipr_core::{Flipr, SessionState};

use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, FieldRow};

#[derive(Debug, Serialize)]
struct LoginView {
    username: String,
    base_url: String,
    authenticated: bool,
    expires_at: Option<DateTime<Utc>>,
}

impl LoginView {
    fn rows(&self) -> Vec<FieldRow> {
        vec![
            FieldRow::new("username", &self.username),
            FieldRow::new("base_url", &self.base_url),
            FieldRow::new("authenticated", self.authenticated.to_string()),
            FieldRow::new(
                "expires_at",
                self.expires_at
                    .map_or_else(|| "-".into(), |t| t.to_rfc3339()),
            ),
        ]
    }
}

pub async fn handle(flipr: &Flipr, settings: &Settings) -> Result<(), CliError> {
    let state = flipr.connect().await?;
    let expires_at = match state {
        SessionState::Authenticated { expires_at } => Some(expires_at),
        SessionState::Unauthenticated => None,
    };

    let view = LoginView {
        username: flipr.config().username.clone(),
        base_url: flipr.config().base_url.to_string(),
        authenticated: state.is_authenticated(),
        expires_at,
    };
    let out = output::render_single(
        &settings.output,
        &view,
        |v| output::render_fields(&v.rows()),
        |v| output::render_plain(&v.rows()),
    );
    output::print_output(&out, settings.quiet);
    Ok(())
}
