//! CLI configuration: thin wrapper around `flipr_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--username, --serial, --base-url, ...).

use clap::ValueEnum;
use secrecy::SecretString;

use flipr_core::{FliprConfig, TemperatureUnit};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat, UnitArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use flipr_config::{Config, Defaults, Profile, config_path, load_config_or_default};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names, for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Overlay CLI flags on a profile. Flags win over profile values.
pub fn apply_overrides(profile: &Profile, global: &GlobalOpts, defaults: &Defaults) -> Profile {
    let mut merged = profile.clone();
    if let Some(ref username) = global.username {
        merged.username = Some(username.clone());
    }
    if let Some(ref serial) = global.serial {
        merged.device_serial = Some(serial.clone());
    }
    if let Some(ref base_url) = global.base_url {
        merged.base_url = Some(base_url.clone());
    }
    if global.insecure {
        merged.insecure = Some(true);
    }
    merged.timeout = global
        .timeout
        .or(profile.timeout)
        .or(Some(defaults.timeout));
    merged
}

/// Build a `FliprConfig` from the config file, the active profile, and CLI overrides.
///
/// Without a matching profile the flags alone must name an account.
pub fn resolve_flipr_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(String, FliprConfig), CliError> {
    let profile_name = active_profile_name(global, cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.username.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    let merged = apply_overrides(&profile, global, &cfg.defaults);
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => flipr_config::resolve_password(&merged, &profile_name)?,
    };

    let config = flipr_config::profile_to_flipr_config(&merged, &profile_name, password)?;
    tracing::debug!(
        profile = %profile_name,
        base_url = %config.base_url,
        serial = ?config.device_serial,
        "resolved configuration"
    );
    Ok((profile_name, config))
}

// ── Presentation ────────────────────────────────────────────────────

/// Output settings resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
    pub defaults: Defaults,
}

impl Settings {
    /// Flags and env win; `[defaults]` fills in what they leave unset.
    pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Self {
        let defaults = cfg.defaults.clone();
        Self {
            output: global
                .output
                .clone()
                .unwrap_or_else(|| default_value(&defaults.output, "output", OutputFormat::Table)),
            color: global
                .color
                .clone()
                .unwrap_or_else(|| default_value(&defaults.color, "color", ColorMode::Auto)),
            quiet: global.quiet,
            defaults,
        }
    }
}

/// Parse a `[defaults]` entry by its flag spelling, warning on unknown values.
fn default_value<T: ValueEnum>(raw: &str, key: &str, fallback: T) -> T {
    T::from_str(raw.trim(), true).unwrap_or_else(|_| {
        tracing::warn!(key, value = %raw, "unknown value in [defaults], ignoring");
        fallback
    })
}

/// Temperature unit: `--unit`, then `defaults.unit`, then Celsius.
pub fn resolve_unit(flag: Option<UnitArg>, defaults: &Defaults) -> TemperatureUnit {
    match flag {
        Some(UnitArg::Celsius) => TemperatureUnit::Celsius,
        Some(UnitArg::Fahrenheit) => TemperatureUnit::Fahrenheit,
        Some(UnitArg::Kelvin) => TemperatureUnit::Kelvin,
        None => defaults.unit.parse().unwrap_or_else(|_| {
            tracing::warn!(unit = %defaults.unit, "unknown temperature unit in config, using celsius");
            TemperatureUnit::Celsius
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["flipr"];
        argv.extend_from_slice(args);
        argv.push("login");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile_values() {
        let profile = Profile {
            username: Some("pool@example.com".into()),
            device_serial: Some("AB12CD".into()),
            timeout: Some(10),
            ..Profile::default()
        };
        let opts = global(&["--serial", "ZZ99", "--timeout", "5", "-k"]);

        let merged = apply_overrides(&profile, &opts, &Defaults::default());
        assert_eq!(merged.username.as_deref(), Some("pool@example.com"));
        assert_eq!(merged.device_serial.as_deref(), Some("ZZ99"));
        assert_eq!(merged.timeout, Some(5));
        assert_eq!(merged.insecure, Some(true));
    }

    #[test]
    fn timeout_falls_back_to_defaults() {
        let opts = global(&[]);
        let defaults = Defaults {
            timeout: 12,
            ..Defaults::default()
        };
        let merged = apply_overrides(&Profile::default(), &opts, &defaults);
        assert_eq!(merged.timeout, Some(12));
    }

    #[test]
    fn unit_flag_beats_config_default() {
        let defaults = Defaults {
            unit: "kelvin".into(),
            ..Defaults::default()
        };
        assert_eq!(
            resolve_unit(Some(UnitArg::Fahrenheit), &defaults),
            TemperatureUnit::Fahrenheit
        );
        assert_eq!(resolve_unit(None, &defaults), TemperatureUnit::Kelvin);

        let bogus = Defaults {
            unit: "rankine".into(),
            ..Defaults::default()
        };
        assert_eq!(resolve_unit(None, &bogus), TemperatureUnit::Celsius);
    }

    fn config_with(output: &str, color: &str) -> Config {
        Config {
            defaults: Defaults {
                output: output.into(),
                color: color.into(),
                ..Defaults::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn output_and_color_fall_back_to_config_defaults() {
        let settings = Settings::resolve(&global(&[]), &config_with("json-compact", "never"));
        assert_eq!(settings.output, OutputFormat::JsonCompact);
        assert_eq!(settings.color, ColorMode::Never);

        let settings = Settings::resolve(&global(&[]), &config_with("YAML", "Always"));
        assert_eq!(settings.output, OutputFormat::Yaml);
        assert_eq!(settings.color, ColorMode::Always);
    }

    #[test]
    fn output_and_color_flags_beat_config_defaults() {
        let opts = global(&["-o", "plain", "--color", "always", "-q"]);
        let settings = Settings::resolve(&opts, &config_with("json", "never"));
        assert_eq!(settings.output, OutputFormat::Plain);
        assert_eq!(settings.color, ColorMode::Always);
        assert!(settings.quiet);
    }

    #[test]
    fn unknown_output_defaults_use_builtin_values() {
        let settings = Settings::resolve(&global(&[]), &config_with("xml", "sometimes"));
        assert_eq!(settings.output, OutputFormat::Table);
        assert_eq!(settings.color, ColorMode::Auto);

        let settings = Settings::resolve(&global(&[]), &Config::default());
        assert_eq!(settings.output, OutputFormat::Table);
        assert_eq!(settings.color, ColorMode::Auto);
        assert_eq!(settings.defaults.unit, "celsius");
    }

    #[test]
    fn measure_unit_reads_loaded_defaults() {
        let mut cfg = config_with("table", "auto");
        cfg.defaults.unit = "fahrenheit".into();
        let settings = Settings::resolve(&global(&[]), &cfg);
        assert_eq!(
            resolve_unit(None, &settings.defaults),
            TemperatureUnit::Fahrenheit
        );
    }

    #[test]
    fn profile_name_prefers_flag() {
        let cfg = Config::default();
        assert_eq!(active_profile_name(&global(&[]), &cfg), "default");
        assert_eq!(active_profile_name(&global(&["-p", "cabin"]), &cfg), "cabin");
        assert_eq!(available_profiles(&cfg), "(none)");
    }
}
