//! Command-line interface.

pub mod label;
pub mod output;
pub mod seal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::error::Result;

/// Sealant - seal key/value pairs into scope-bound SealedSecret records.
#[derive(Parser, Debug)]
#[command(
    name = "sealant",
    about = "Seal key/value pairs into scope-bound SealedSecret records",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to sealant.toml
    #[arg(short, long, global = true, env = "SEALANT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seal values and print the record as JSON
    Seal(seal::SealArgs),

    /// Show the label and annotations a scope resolves to
    Label(label::LabelArgs),
}

/// Run a parsed command.
///
/// # Errors
///
/// Returns the first error the command hits.
pub fn execute(command: Command, config: Option<PathBuf>) -> Result<()> {
    match command {
        Command::Seal(args) => {
            let config = Config::load(config.as_deref())?;
            seal::execute(args, &config)
        }
        Command::Label(args) => label::execute(args),
    }
}
