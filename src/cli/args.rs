//! Command-line argument parsing for NeuroLink
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NeuroLink - Terminal chat with retrieval grounding
#[derive(Parser, Debug)]
#[command(name = "neurolink")]
#[command(version = "0.3.0")]
#[command(about = "Chat with a gateway-backed assistant grounded in a local knowledge base", long_about = None)]
pub struct Args {
    /// One-shot query (omit to use a subcommand)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Gateway base URL (overrides config)
    #[arg(long)]
    pub gateway_url: Option<String>,

    /// Agent/model selector forwarded to the gateway
    #[arg(short, long)]
    pub agent: Option<String>,

    /// Disable retrieval grounding for this run
    #[arg(long)]
    pub no_rag: bool,

    /// Load the corpus from a TOML file instead of the built-in one
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except the reply)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start interactive chat mode
    Start,

    /// Display current configuration
    Config,

    /// List the knowledge base documents
    Knowledge,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Check that query and subcommand are not mixed
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() && self.query.is_some() {
            return Err("Provide either a QUERY or a subcommand, not both.".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_query() {
        let args = Args::parse_from(["neurolink", "what is memory weaving"]);
        assert_eq!(args.query.as_deref(), Some("what is memory weaving"));
        assert!(args.command.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_start_subcommand() {
        let args = Args::parse_from(["neurolink", "start"]);
        assert!(matches!(args.command, Some(Commands::Start)));
    }

    #[test]
    fn test_no_rag_flag() {
        let args = Args::parse_from(["neurolink", "--no-rag", "hello"]);
        assert!(args.no_rag);
    }

    #[test]
    fn test_verbosity() {
        let args = Args::parse_from(["neurolink", "-q", "hello"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);

        let args = Args::parse_from(["neurolink", "-v", "hello"]);
        assert_eq!(args.verbosity(), Verbosity::Verbose);
    }
}
