//! Clap derive structures for the `pandg` CLI.
//!
//! Also compiled into `build.rs` for man page generation, so this module
//! must only depend on clap and std.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pandg -- query Panorama device groups by name or tag
#[derive(Debug, Parser)]
#[command(
    name = "pandg",
    version,
    about = "Query Panorama device groups by name or tag",
    long_about = "Reads device-group configuration from a Palo Alto Networks Panorama\n\
        appliance (or a JSON/YAML snapshot) and reports the groups matching\n\
        an exact name, an exact tag, a tag regex, or a name regex.",
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
    /// Panorama profile to use
    #[arg(long, short = 'p', env = "PANDG_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Panorama URL (overrides profile)
    #[arg(long, short = 'u', env = "PANDG_URL", global = true)]
    pub url: Option<String>,

    /// XML API key (overrides profile credentials)
    #[arg(long, env = "PANDG_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PANDG_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PANDG_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PANDG_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query device groups
    #[command(alias = "dg")]
    DeviceGroups(DeviceGroupsArgs),

    /// Show the tag color table
    Colors,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Device groups ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceGroupsArgs {
    #[command(subcommand)]
    pub command: DeviceGroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceGroupsCommand {
    /// Select device groups by name, tag, or regex
    #[command(alias = "q")]
    Query(QueryArgs),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("criterion")
        .required(true)
        .multiple(false)
        .args(["name", "name_regex", "tag", "tag_regex"])
))]
pub struct QueryArgs {
    /// Device group with exactly this name
    #[arg(long)]
    pub name: Option<String>,

    /// Device groups whose name matches this regex (detailed output)
    #[arg(long, value_name = "REGEX")]
    pub name_regex: Option<String>,

    /// Device groups carrying exactly this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Device groups with at least one tag matching this regex
    #[arg(long, value_name = "REGEX")]
    pub tag_regex: Option<String>,

    /// Read device groups from a JSON or YAML snapshot instead of Panorama
    #[arg(long, short = 'f', value_name = "PATH")]
    pub from_file: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the current configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store the active profile's API key in the system keyring
    SetKey,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
