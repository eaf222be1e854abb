//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mplan",
    version,
    about = "Certify media plan lines against the reference hierarchy",
    long_about = "Certify media plan lines against the reference hierarchy.\n\n\
                  Checks mandatory fields, formats, Business Unit / Category / Range /\n\
                  Campaign consistency and budget totals, and decides whether a batch\n\
                  can be imported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a CSV batch of plan lines.
    Validate(ValidateArgs),

    /// List the rules in evaluation order.
    Rules(RulesArgs),

    /// Resolve campaign names, creating pending-review campaigns for unknown ones.
    CreateCampaign(CreateCampaignArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    /// CSV file with one plan line per row.
    #[arg(value_name = "ROWS.csv")]
    pub rows: PathBuf,

    /// Master-data JSON document.
    #[arg(long = "master-data", value_name = "JSON")]
    pub master_data: PathBuf,

    /// Validation options (TOML). Flags override it.
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Admit unknown campaigns as pending-review entities.
    #[arg(long = "auto-create")]
    pub auto_create: bool,

    /// Source name recorded on auto-created campaigns (default: the CSV file name).
    #[arg(long = "source", value_name = "NAME")]
    pub source: Option<String>,

    /// Create the flagged campaigns after validation.
    #[arg(long = "apply", requires = "auto_create")]
    pub apply: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Args)]
pub struct RulesArgs {
    /// Show the rule set used in auto-create mode.
    #[arg(long = "auto-create")]
    pub auto_create: bool,

    /// Validation options (TOML).
    #[arg(long = "config", value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Args)]
pub struct CreateCampaignArgs {
    /// Campaign names. Repeated names resolve to the same campaign.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Master-data JSON document used to seed the store.
    #[arg(long = "master-data", value_name = "JSON")]
    pub master_data: PathBuf,

    /// Source name recorded on created campaigns.
    #[arg(long = "source", value_name = "NAME")]
    pub source: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
