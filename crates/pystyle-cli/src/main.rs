//! pystyle CLI tool.
//!
//! Usage:
//! ```bash
//! pystyle check [OPTIONS] <PATH>
//! pystyle list-rules
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Style checker for Python source files with a fixed S001-S012 rule set
#[derive(Parser)]
#[command(name = "pystyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a Python file or a directory of Python files
    Check {
        /// File or directory to analyze
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the rule codes and their messages
    ListRules,
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One issue per line, report order.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { path, format } => commands::check::run(&path, format),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
    }
}
