//! CLI interface for signal-scraper
//!
//! Provides subcommands for:
//! - `parse`: Extract a signal from one message
//! - `scan`: Extract signals from a stream of messages, one per line
//! - `config`: Show effective configuration

mod parse;
mod scan;

pub use parse::{render_table, OutputFormat, ParseArgs};
pub use scan::{scan_lines, ScanArgs, ScanSummary};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "signal-scraper")]
#[command(about = "Extracts structured trading signals from Telegram chat messages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a signal from one message
    Parse(ParseArgs),
    /// Extract signals from a message stream, one message per line
    Scan(ScanArgs),
    /// Show effective configuration
    Config,
}
