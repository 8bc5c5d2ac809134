// ── Runtime connection configuration ──
//
// Describes *how* to reach the Flipr cloud and as whom. Carries credential
// data and transport tuning but never touches disk; the CLI (or any other
// consumer) builds a `FliprConfig` and hands it to `Flipr::new`.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use flipr_api::transport::{TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (intercepting proxies, local test servers).
    DangerAcceptInvalid,
}

/// Configuration for one Flipr account and device.
///
/// Only the credentials are mandatory; everything else has a default, so
/// callers merge their values over [`FliprConfig::default`]:
///
/// ```
/// use flipr_core::FliprConfig;
///
/// let config = FliprConfig {
///     username: "me@example.com".into(),
///     password: "secret".to_string().into(),
///     device_serial: Some("F1PR0042".into()),
///     ..FliprConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FliprConfig {
    /// API root (defaults to the production cloud).
    pub base_url: Url,
    pub username: String,
    pub password: SecretString,
    /// Serial of the device whose surveys are read.
    pub device_serial: Option<String>,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Parsed form of [`flipr_api::DEFAULT_BASE_URL`].
#[allow(clippy::expect_used)]
pub fn default_base_url() -> Url {
    Url::parse(flipr_api::DEFAULT_BASE_URL).expect("default base URL is valid")
}

impl Default for FliprConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: String::new(),
            password: SecretString::from(String::new()),
            device_serial: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FliprConfig {
    /// Config with the given credentials and defaults for the rest.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
            ..Self::default()
        }
    }

    pub fn with_device_serial(mut self, serial: impl Into<String>) -> Self {
        self.device_serial = Some(serial.into());
        self
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Check the required credentials are present and not blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.username.trim().is_empty() {
            return Err(CoreError::config("You must set the username property."));
        }
        if self.password.expose_secret().trim().is_empty() {
            return Err(CoreError::config("You must set the password property."));
        }
        Ok(())
    }

    /// The configured device serial, if non-empty.
    pub fn device_serial(&self) -> Option<&str> {
        self.device_serial
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = FliprConfig::default();
        assert_eq!(config.base_url.as_str(), "https://apis.goflipr.com/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn missing_credentials_fail_validation() {
        let no_user = FliprConfig::new("", SecretString::from("pw".to_string()));
        assert!(matches!(no_user.validate(), Err(CoreError::Config { .. })));

        let no_password = FliprConfig::new("me", SecretString::from(String::new()));
        let err = no_password.validate().unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn blank_credentials_fail_validation() {
        let blank_user = FliprConfig::new("  ", SecretString::from("pw".to_string()));
        let err = blank_user.validate().unwrap_err();
        assert!(err.to_string().contains("username"));

        let blank_password = FliprConfig::new("me", SecretString::from(" \t ".to_string()));
        let err = blank_password.validate().unwrap_err();
        assert!(err.to_string().contains("password"));

        let padded = FliprConfig::new("me", SecretString::from(" pw ".to_string()));
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn blank_serial_is_absent() {
        let config = FliprConfig::new("me", SecretString::from("pw".to_string()))
            .with_device_serial("  ");
        assert_eq!(config.device_serial(), None);
        let config = config.with_device_serial("F1PR0042");
        assert_eq!(config.device_serial(), Some("F1PR0042"));
    }
}
