//! Library interface for the `toxiscan` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions via `xtask`.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use toxiscan_core::Limits;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                     Log filter (e.g., debug, toxiscan_core=trace)
    TOXISCAN_LOG_PATH            Explicit JSONL log file path
    TOXISCAN_LOG_DIR             Log directory
    TOXISCAN_DICTIONARY          Toxic-word dictionary file
    TOXISCAN_MAX_UNIQUE_WORDS    Distinct-word limit per analysis run
";

/// Command-line interface definition for toxiscan.
#[derive(Parser)]
#[command(name = "toxiscan")]
#[command(about = "Word-frequency and toxic-language analysis for comment dumps", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Toxic-word dictionary file [default: toxicwords.txt]
    #[arg(short, long, global = true, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Maximum number of dictionary entries to load
    #[arg(long, global = true, value_name = "N")]
    pub max_dictionary_words: Option<usize>,

    /// Engine limits (override configuration).
    #[command(flatten)]
    pub limits: Limits,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a comment file: statistics plus top words
    Analyze(commands::analyze::AnalyzeArgs),

    /// List the most frequent (or most frequent toxic) words
    Top(commands::top::TopArgs),

    /// Write the analysis report document to a file
    Report(commands::report::ReportArgs),

    /// Run the interactive menu
    #[command(visible_alias = "menu")]
    Interactive(commands::interactive::InteractiveArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
