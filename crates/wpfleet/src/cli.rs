//! Clap derive structures for the `wpfleet` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wpfleet -- manage WordPress plugins across a hosted fleet
#[derive(Debug, Parser)]
#[command(
    name = "wpfleet",
    version,
    about = "Manage WordPress plugins across all sites of a hosting account",
    long_about = "A console for operating the WordPress plugins of a multi-site\n\
        hosting account. Discovers which plugins are installed anywhere in the\n\
        fleet, lists the sites running a chosen plugin, and pushes version\n\
        updates to one site or to every site with an update available.",
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
    #[arg(long, short = 'p', env = "WPFLEET_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Vendor API base URL (overrides profile)
    #[arg(long, env = "WPFLEET_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Company (account) identifier the fleet belongs to
    #[arg(long, short = 'c', env = "WPFLEET_COMPANY", global = true)]
    pub company: Option<String>,

    /// Vendor API key
    #[arg(long, env = "WPFLEET_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WPFLEET_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "WPFLEET_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Seconds between polls of an in-flight update operation [default: 5]
    #[arg(long, env = "WPFLEET_POLL_INTERVAL", global = true)]
    pub poll_interval: Option<u64>,

    /// Give up on an operation after this many polls (default: never)
    #[arg(long, env = "WPFLEET_MAX_POLLS", global = true)]
    pub max_polls: Option<u32>,
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
    /// List the distinct plugins installed anywhere in the fleet
    #[command(alias = "pl")]
    Plugins,

    /// List the sites running a plugin, with versions and update state
    #[command(alias = "s")]
    Sites(SitesArgs),

    /// Update a plugin on one site or on every updatable site
    // --version here is the target plugin version, so the inherited
    // version flag must go.
    #[command(alias = "up", disable_version_flag = true)]
    Update(UpdateArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    /// Plugin name (matched case-insensitively)
    pub plugin: String,
}

// ── Update ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Plugin name (matched case-insensitively)
    pub plugin: String,

    /// Environment id of the site to update
    #[arg(long, short = 'e', conflicts_with = "all")]
    pub env: Option<String>,

    /// Update every displayed site with an available update
    #[arg(long, conflicts_with = "env")]
    pub all: bool,

    /// Target version (defaults to the vendor's advertised update)
    #[arg(long, conflicts_with = "all")]
    pub version: Option<String>,
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
    /// Show the effective configuration (secrets redacted)
    Show,
    /// Write a starter profile to the config file
    Init {
        /// Profile name to create
        #[arg(long, default_value = "default")]
        name: String,

        /// Company (account) identifier
        #[arg(long)]
        company: String,

        /// Vendor API base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Environment variable the API key will be read from
        #[arg(long)]
        api_key_env: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
