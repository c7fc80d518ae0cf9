//! CLI command definitions for powerctl
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query homes and electricity prices from Tibber
#[derive(Parser, Debug)]
#[command(name = "powerctl", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: <config dir>/powerctl/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides config and TIBBER_FORMAT)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List homes visible to the token
    Homes,

    /// Show current, today's and tomorrow's prices for a home
    Prices {
        /// Home id (default: configured home, or the only home on the account)
        #[arg(long)]
        home: Option<String>,
    },

    /// Print version information
    Version,
}
