//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// authscan -- classify authentication log lines into security events.
///
/// Use `authscan <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "authscan", version, about, long_about = None)]
pub struct Cli {
    /// Path to the authscan.toml configuration file.
    #[arg(short, long, default_value = "authscan.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every line of an authentication log file.
    Scan(ScanArgs),

    /// Classify a single log line.
    Classify(ClassifyArgs),

    /// List the built-in rules in evaluation order.
    Rules,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- scan ----

/// Scan a log file and report the security-relevant events.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Log file to scan (default: `scan.input` from the configuration).
    pub path: Option<PathBuf>,

    /// Only report these event kinds (fail_unknown, fail_invalid, success,
    /// privilege_escalation). May be repeated.
    #[arg(long = "kind", value_name = "KIND")]
    pub kinds: Vec<String>,
}

// ---- classify ----

/// Classify one line given on the command line.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The raw log line.
    pub line: String,
}

// ---- config ----

/// Manage authscan configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, scan).
        #[arg(long)]
        section: Option<String>,
    },
}
