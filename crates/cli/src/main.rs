mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use modgraph_lib::consts::DEFAULT_BUILD_FILE;

use crate::cmd::WorkspaceArgs;
use crate::output::OutputFormat;

/// modgraph - build graph generator for declared modules
#[derive(Parser)]
#[command(name = "modgraph")]
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
  /// Generate a ninja build file from the module definitions
  Generate {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// Build file to write, relative to the workspace root
    #[arg(long, default_value = DEFAULT_BUILD_FILE)]
    ninja: PathBuf,
  },

  /// Print the action graph without writing anything
  Graph {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Print the rule templates actions bind to
  Rules {
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Generate { workspace, ninja } => cmd::cmd_generate(&workspace, &ninja, cli.verbose),
    Commands::Graph { workspace, format } => cmd::cmd_graph(&workspace, format),
    Commands::Rules { format } => cmd::cmd_rules(format).map(|()| ExitCode::SUCCESS),
  }
}
