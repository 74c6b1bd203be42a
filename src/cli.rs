//! Command-line interface definition for Pulsechat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat and route inspection.

use clap::{Parser, Subcommand};

/// Pulsechat - Chat assistant engine for the Pulseboard demo dashboard
///
/// Run the assistant in an interactive terminal session backed by canned
/// collaborator services and an optional dashboard context.
#[derive(Parser, Debug, Clone)]
#[command(name = "pulsechat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Pulsechat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start interactive chat mode with the assistant
    Chat,

    /// Print the intent dispatch table in evaluation order
    Routes,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
