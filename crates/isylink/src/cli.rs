//! Clap derive structures for the `isylink` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// isylink -- ISY gateway adapter
#[derive(Debug, Parser)]
#[command(
    name = "isylink",
    version,
    about = "Bridge an ISY home-automation gateway to an IoT publisher",
    long_about = "Polls an ISY-series gateway over its XML REST interface, publishes\n\
        on/off switch state as outputs, and relays switch commands back.\n\n\
        The gateway address may be file://<path> to replay recorded documents.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "ISYLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Gateway address, http(s)://host or file://path (overrides config)
    #[arg(long, short = 'g', global = true)]
    pub gateway: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
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

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
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

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll continuously and print every published output change
    Run,

    /// Poll once and print the output updates it produced
    Poll,

    /// List gateway nodes and how the adapter classifies them
    #[command(alias = "ls")]
    Nodes,

    /// Show live status values reported by the gateway
    Status,

    /// Show gateway identity and firmware
    Info,

    /// Switch a node on or off and wait for confirmation
    #[command(alias = "sw")]
    Switch(SwitchArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SwitchArgs {
    /// Gateway node id, e.g. "15 2D A 1"
    pub node: String,

    /// "0", "off" or "false" switch off; anything else switches on
    pub value: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the resolved configuration (password masked)
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
