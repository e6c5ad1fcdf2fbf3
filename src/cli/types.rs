//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tracker-proxy")]
#[command(about = "OAuth-backed proxy over a GitHub repository's issues", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to .tracker-proxy/config.yaml plus environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration and print the effective settings
    CheckConfig {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Serve {
            host: None,
            port: None,
        }
    }
}
