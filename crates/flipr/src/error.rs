//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use flipr_config::ConfigError;
use flipr_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Flipr cloud at {url}: {reason}")]
    #[diagnostic(
        code(flipr::connection_failed),
        help(
            "Check your network connection and the base URL.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(flipr::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(flipr::auth_failed),
        help(
            "Verify the e-mail and password of your Flipr account.\n\
             Run: flipr config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(flipr::no_credentials),
        help(
            "Configure credentials with: flipr config init\n\
             Or set FLIPR_USERNAME and FLIPR_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(flipr::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(flipr::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(flipr::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: flipr config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(flipr::no_config),
        help(
            "Create one with: flipr config init\n\
             Or pass --username and set FLIPR_PASSWORD.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("{message}")]
    #[diagnostic(
        code(flipr::config),
        help("Set the missing value in your profile or pass it as a flag (see flipr --help).")
    )]
    Config { message: String },

    #[error(transparent)]
    #[diagnostic(code(flipr::config_file))]
    ConfigFile(ConfigError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Config { .. } => exit_code::USAGE,
            Self::Api { .. } | Self::ConfigFile(_) => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to an authentication failure.
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                profile: name.into(),
                message,
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                profile: "default".into(),
                message,
            },
            CoreError::Config { message } => Self::Config { message },
            err @ (CoreError::Http { .. } | CoreError::Internal(_)) => Self::Api {
                message: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::ConfigFile(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let auth = CliError::from(CoreError::AuthenticationFailed {
            message: "login failed (HTTP 401)".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let conn = CliError::from(CoreError::ConnectionFailed {
            url: "https://apis.goflipr.com/OAuth2/token".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(conn.exit_code(), exit_code::CONNECTION);

        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);

        let http = CliError::from(CoreError::Http {
            message: "Not Found".into(),
            status: Some(404),
        });
        assert_eq!(http.exit_code(), exit_code::GENERAL);
        assert!(http.to_string().contains("HTTP 404"));

        let missing = CliError::from(CoreError::Config {
            message: "You must set the deviceSerial property.".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn missing_credentials_is_an_auth_error() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "home".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert!(err.to_string().contains("home"));
    }

    #[test]
    fn with_profile_only_touches_auth_failures() {
        let err = CliError::AuthFailed {
            profile: "default".into(),
            message: "bad password".into(),
        }
        .with_profile("cabin");
        assert!(matches!(err, CliError::AuthFailed { ref profile, .. } if profile == "cabin"));

        let other = CliError::Timeout.with_profile("cabin");
        assert!(matches!(other, CliError::Timeout));
    }
}
