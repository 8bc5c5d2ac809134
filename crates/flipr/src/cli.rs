//! Clap derive structures for the `flipr` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// flipr -- read your pool analyzer from the command line
#[derive(Debug, Parser)]
#[command(
    name = "flipr",
    version,
    about = "Read Flipr pool monitor measurements from the command line",
    long_about = "A small client for the Flipr cloud.\n\n\
        Signs in with your Flipr account, fetches the latest survey of a\n\
        device and shows water temperature, pH, disinfectant, battery and\n\
        weather readings.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "FLIPR_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Flipr account e-mail (overrides profile)
    #[arg(long, short = 'u', env = "FLIPR_USERNAME", global = true)]
    pub username: Option<String>,

    /// Flipr account password
    #[arg(long, env = "FLIPR_PASSWORD", global = true, hide = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Device serial number (overrides profile)
    #[arg(long, short = 's', env = "FLIPR_SERIAL", global = true)]
    pub serial: Option<String>,

    /// Flipr cloud base URL (overrides profile)
    #[arg(long, env = "FLIPR_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format [default: `defaults.output`, else table]
    #[arg(long, short = 'o', env = "FLIPR_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: `defaults.color`, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "FLIPR_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "FLIPR_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain `key=value` lines (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    Celsius,
    Fahrenheit,
    Kelvin,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the latest measurement of a device
    #[command(alias = "m")]
    Measure(MeasureArgs),

    /// Sign in and report how long the session token lasts
    Login,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MEASURE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MeasureArgs {
    /// Temperature unit (defaults to the `unit` setting, then celsius)
    #[arg(long)]
    pub unit: Option<UnitArg>,

    /// Show raw fractions and deviations instead of percentages and sectors
    #[arg(long)]
    pub raw: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
