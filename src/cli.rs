//! CLI command definitions for config-cascade.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML output (default)
    #[default]
    Yaml,
    /// Pretty-printed JSON output
    Json,
}

/// Resolve layered YAML configuration with extends-chain inheritance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the root configuration file (skips discovery)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory to start config discovery from (default: current directory)
    #[arg(short, long, global = true)]
    pub root: Option<String>,

    /// Configuration file name searched for during discovery
    #[arg(long, default_value = "config.yaml", global = true)]
    pub file_name: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the fully resolved configuration (default if no subcommand given)
    Print {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Print a single value by dotted path (e.g. `get app.port`)
    Get {
        /// Dotted path into the resolved configuration
        path: String,
    },

    /// List the documents that contributed to the merge, in merge order
    Chain {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}
